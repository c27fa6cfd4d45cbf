use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entity::enums::PaymentMethod;

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreatePaymentRequest {
    pub trip_id: Uuid,
    #[validate(range(min = 0, message = "Amount cannot be negative"))]
    pub amount: i64,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdatePaymentRequest {
    #[validate(range(min = 0, message = "Amount cannot be negative"))]
    pub amount: Option<i64>,
    pub method: Option<PaymentMethod>,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct ConfirmPaymentRequest {
    pub transaction_id: Option<String>,
}
