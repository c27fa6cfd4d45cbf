use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{CreateTouristRequest, LoginRequest, LoginResponse, RegisterRequest, RegisteredTourist},
        destination::{CreateDestinationRequest, UpdateDestinationRequest},
        payment::{ConfirmPaymentRequest, CreatePaymentRequest, UpdatePaymentRequest},
        tourist::{AddressInput, UpdateTouristRequest},
        trip::{BookTripRequest, CreateTripRequest, RateTripRequest, UpdateTripRequest},
    },
    entity::enums::{PaymentMethod, PaymentStatus, Role, TripStatus},
    models::{
        Address, Destination, Payment, PaymentSummary, Tourist, TouristSummary, Trip, User,
        UserSummary,
    },
    response::{ApiResponse, Meta},
    routes::{auth, destination, health, params, payment, tourist, trip},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register_tourist,
        auth::register_employee,
        auth::register_tourist_by_employee,
        auth::approve_tourist,
        tourist::list_tourists,
        tourist::get_tourist,
        tourist::get_profile,
        tourist::update_profile,
        tourist::update_tourist,
        tourist::delete_tourist,
        destination::list_destinations,
        destination::get_destination,
        destination::create_destination,
        destination::update_destination,
        destination::delete_destination,
        trip::list_trips,
        trip::get_trip,
        trip::trips_by_tourist,
        trip::create_trip,
        trip::book_trip,
        trip::my_trips,
        trip::rate_trip,
        trip::update_trip,
        trip::delete_trip,
        payment::list_payments,
        payment::create_payment,
        payment::payment_by_trip,
        payment::my_payments,
        payment::create_my_payment,
        payment::cancel_payment,
        payment::confirm_payment,
        payment::get_payment,
        payment::update_payment,
        payment::delete_payment
    ),
    components(
        schemas(
            Role,
            TripStatus,
            PaymentStatus,
            PaymentMethod,
            User,
            UserSummary,
            Address,
            Tourist,
            TouristSummary,
            Destination,
            Trip,
            Payment,
            PaymentSummary,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            CreateTouristRequest,
            RegisteredTourist,
            AddressInput,
            UpdateTouristRequest,
            CreateDestinationRequest,
            UpdateDestinationRequest,
            CreateTripRequest,
            BookTripRequest,
            UpdateTripRequest,
            RateTripRequest,
            CreatePaymentRequest,
            UpdatePaymentRequest,
            ConfirmPaymentRequest,
            params::Pagination,
            params::TripListQuery,
            params::ScopedTripQuery,
            health::HealthData,
            Meta,
            ApiResponse<Trip>,
            ApiResponse<Payment>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Login and account registration"),
        (name = "Tourists", description = "Tourist profiles"),
        (name = "Destinations", description = "Destination catalog"),
        (name = "Trips", description = "Trip booking and lifecycle"),
        (name = "Payments", description = "Trip payments, confirmation and cancellation"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_lifecycle_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/payment/{id}/confirm"));
        assert!(paths.contains_key("/api/payment/my-payment/{id}/cancel"));
        assert!(paths.contains_key("/api/trip/rating/{id}"));
        assert!(paths.contains_key("/health"));
    }
}
