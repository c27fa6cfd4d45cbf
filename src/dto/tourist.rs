use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct AddressInput {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Partial tourist update. `is_active` is honoured on the staff path only.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateTouristRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub identity_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub is_active: Option<bool>,
    #[validate(nested)]
    pub address: Option<AddressInput>,
}
