use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entity::enums::TripStatus;

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateTripRequest {
    pub tourist_id: Uuid,
    pub destination_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(range(min = 1, message = "Participants must be at least 1"))]
    pub participants: i32,
    #[validate(range(min = 0, message = "Total price cannot be negative"))]
    pub total_price: i64,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub status: Option<TripStatus>,
}

/// Trip booked by a tourist for themselves. Always starts as `planned`.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct BookTripRequest {
    pub destination_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(range(min = 1, message = "Participants must be at least 1"))]
    pub participants: i32,
    #[validate(range(min = 0, message = "Total price cannot be negative"))]
    pub total_price: i64,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
}

/// Partial trip update. Status is not writable here; it follows the payment.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateTripRequest {
    pub destination_id: Option<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Participants must be at least 1"))]
    pub participants: Option<i32>,
    #[validate(range(min = 0, message = "Total price cannot be negative"))]
    pub total_price: Option<i64>,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub rating: Option<i32>,
    pub review: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct RateTripRequest {
    pub rating: i32,
    pub review: Option<String>,
}
