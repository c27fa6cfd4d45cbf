use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    addresses, destinations,
    enums::{PaymentMethod, PaymentStatus, Role, TripStatus},
    payments, tourists, trips, users,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Compact user shape embedded in trip and payment views.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: Uuid,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tourist {
    pub id: Uuid,
    pub user_id: Uuid,
    pub membership_level: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub identity_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub total_trips: i32,
    pub total_spent: i64,
    pub loyalty_points: i32,
    pub created_at: DateTime<Utc>,
    pub user: Option<User>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TouristSummary {
    pub id: Uuid,
    pub user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentSummary {
    pub id: Uuid,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Trip joined with its tourist, destination, creator and payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Trip {
    pub id: Uuid,
    pub tourist_id: Uuid,
    pub destination_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub participants: i32,
    pub total_price: i64,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tourist: Option<TouristSummary>,
    pub destination: Option<Destination>,
    pub created_by: Option<UserSummary>,
    pub payment: Option<PaymentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub trip: Option<Trip>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<users::Model> for UserSummary {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
        }
    }
}

impl From<addresses::Model> for Address {
    fn from(model: addresses::Model) -> Self {
        Self {
            id: model.id,
            street: model.street,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            country: model.country,
        }
    }
}

impl Tourist {
    pub fn from_parts(
        model: tourists::Model,
        user: Option<users::Model>,
        address: Option<addresses::Model>,
    ) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            membership_level: model.membership_level,
            date_of_birth: model.date_of_birth,
            nationality: model.nationality,
            identity_number: model.identity_number,
            emergency_contact: model.emergency_contact,
            total_trips: model.total_trips,
            total_spent: model.total_spent,
            loyalty_points: model.loyalty_points,
            created_at: model.created_at.with_timezone(&Utc),
            user: user.map(User::from),
            address: address.map(Address::from),
        }
    }
}

impl From<destinations::Model> for Destination {
    fn from(model: destinations::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            country: model.country,
            city: model.city,
            latitude: model.latitude,
            longitude: model.longitude,
            description: model.description,
            image_url: model.image_url,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<payments::Model> for PaymentSummary {
    fn from(model: payments::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            method: model.method,
            status: model.status,
            transaction_id: model.transaction_id,
            payment_date: model.payment_date.map(|dt| dt.with_timezone(&Utc)),
            notes: model.notes,
        }
    }
}

impl From<trips::Model> for Trip {
    fn from(model: trips::Model) -> Self {
        Self {
            id: model.id,
            tourist_id: model.tourist_id,
            destination_id: model.destination_id,
            start_date: model.start_date.with_timezone(&Utc),
            end_date: model.end_date.with_timezone(&Utc),
            participants: model.participants,
            total_price: model.total_price,
            status: model.status,
            notes: model.notes,
            special_requests: model.special_requests,
            rating: model.rating,
            review: model.review,
            created_by_id: model.created_by_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            tourist: None,
            destination: None,
            created_by: None,
            payment: None,
        }
    }
}

impl From<payments::Model> for Payment {
    fn from(model: payments::Model) -> Self {
        Self {
            id: model.id,
            trip_id: model.trip_id,
            amount: model.amount,
            method: model.method,
            status: model.status,
            transaction_id: model.transaction_id,
            notes: model.notes,
            payment_date: model.payment_date.map(|dt| dt.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            trip: None,
        }
    }
}
