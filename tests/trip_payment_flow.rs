mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use sea_orm::EntityTrait;
use tourism_agency_api::{
    dto::{
        payment::{ConfirmPaymentRequest, CreatePaymentRequest},
        trip::{RateTripRequest, UpdateTripRequest},
    },
    entity::{
        Payments, Trips,
        enums::{PaymentMethod, PaymentStatus, Role, TripStatus},
    },
    error::AppError,
    routes::params::TripListQuery,
    services::{payment_service, trip_service},
};

use common::{create_destination, create_tourist, create_user, database_url, setup_state, trip_request};

fn payment_request(trip_id: uuid::Uuid, amount: i64) -> CreatePaymentRequest {
    CreatePaymentRequest {
        trip_id,
        amount,
        method: PaymentMethod::BankTransfer,
        transaction_id: None,
        notes: None,
    }
}

// Staff books and confirms, tourists cancel and rate; every lifecycle guard is exercised.
#[tokio::test]
async fn trip_and_payment_lifecycle() -> anyhow::Result<()> {
    let Some(database_url) = database_url() else {
        return Ok(());
    };
    let state = setup_state(&database_url).await?;

    let employee = create_user(&state, Role::Employee, "guide@example.com").await?;
    let (alice, alice_id) = create_tourist(&state, "alice@example.com").await?;
    let (bob, bob_id) = create_tourist(&state, "bob@example.com").await?;
    let destination_id = create_destination(&state, "Ubud").await?;

    // Reversed dates are rejected before anything is written.
    let mut reversed = trip_request(alice_id, destination_id, 150);
    reversed.end_date = reversed.start_date - Duration::days(5);
    let err = trip_service::create_trip(&state, &employee, reversed)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)), "got {err:?}");

    let trip = trip_service::create_trip(
        &state,
        &employee,
        trip_request(alice_id, destination_id, 150),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(trip.status, TripStatus::Planned);
    assert_eq!(trip.created_by_id, employee.user_id);
    assert_eq!(trip.destination.as_ref().map(|d| d.name.as_str()), Some("Ubud"));

    // Updating only the end date re-validates against the stored start date.
    let err = trip_service::update_trip(
        &state,
        &employee,
        trip.id,
        UpdateTripRequest {
            end_date: Some(trip.start_date - Duration::days(1)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)), "got {err:?}");

    // Planned trips cannot be rated.
    let err = trip_service::rate_trip(
        &state,
        &alice,
        trip.id,
        RateTripRequest {
            rating: 5,
            review: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)), "got {err:?}");

    // Amount must equal the trip price.
    let err = payment_service::create_payment(&state, &employee, payment_request(trip.id, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AmountMismatch), "got {err:?}");

    let payment = payment_service::create_payment(&state, &employee, payment_request(trip.id, 150))
        .await?
        .data
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);

    let err = payment_service::create_payment(&state, &employee, payment_request(trip.id, 150))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StateConflict(_)), "got {err:?}");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    // Bob does not own the trip.
    let err = payment_service::cancel_payment(&state, &bob, payment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)), "got {err:?}");

    let confirmed = payment_service::confirm_payment(
        &state,
        &employee,
        payment.id,
        ConfirmPaymentRequest {
            transaction_id: Some("TX-1".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(confirmed.status, PaymentStatus::Paid);
    assert_eq!(confirmed.transaction_id.as_deref(), Some("TX-1"));
    assert!(confirmed.payment_date.is_some());

    let stored_trip = Trips::find_by_id(trip.id).one(&state.orm).await?.unwrap();
    assert_eq!(stored_trip.status, TripStatus::Confirmed);

    // A second confirm fails and leaves both rows untouched.
    let err = payment_service::confirm_payment(
        &state,
        &employee,
        payment.id,
        ConfirmPaymentRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)), "got {err:?}");
    let stored_payment = Payments::find_by_id(payment.id).one(&state.orm).await?.unwrap();
    assert_eq!(stored_payment.status, PaymentStatus::Paid);
    assert_eq!(stored_payment.transaction_id.as_deref(), Some("TX-1"));

    // Paid payments cannot be cancelled.
    let err = payment_service::cancel_payment(&state, &alice, payment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)), "got {err:?}");

    // Confirmed trips take ratings within 1..=5, only from their owner.
    for rating in [0, 6] {
        let err = trip_service::rate_trip(
            &state,
            &alice,
            trip.id,
            RateTripRequest {
                rating,
                review: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)), "rating {rating}: {err:?}");
    }
    let err = trip_service::rate_trip(
        &state,
        &bob,
        trip.id,
        RateTripRequest {
            rating: 4,
            review: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)), "got {err:?}");

    let rated = trip_service::rate_trip(
        &state,
        &alice,
        trip.id,
        RateTripRequest {
            rating: 5,
            review: Some("Wonderful".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(rated.rating, Some(5));
    assert_eq!(rated.review.as_deref(), Some("Wonderful"));

    // A confirmed trip with a payment cannot be deleted.
    let err = trip_service::delete_trip(&state, &employee, trip.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StateConflict(_)), "got {err:?}");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    // Bob books his own trip, pays for it and cancels.
    let start = Utc::now() + Duration::days(60);
    let booked = trip_service::book_trip(
        &state,
        &bob,
        tourism_agency_api::dto::trip::BookTripRequest {
            destination_id,
            start_date: start,
            end_date: start + Duration::days(3),
            participants: 1,
            total_price: 80,
            notes: None,
            special_requests: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(booked.tourist_id, bob_id);
    assert_eq!(booked.status, TripStatus::Planned);

    let err = payment_service::create_my_payment(&state, &alice, payment_request(booked.id, 80))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)), "got {err:?}");

    let mut own = payment_request(booked.id, 80);
    own.notes = Some("Deposit".into());
    let bob_payment = payment_service::create_my_payment(&state, &bob, own)
        .await?
        .data
        .unwrap();

    let cancelled = payment_service::cancel_payment(&state, &bob, bob_payment.id)
        .await?
        .data
        .unwrap();
    assert_eq!(cancelled.status, PaymentStatus::Refunded);
    let notes = cancelled.notes.unwrap();
    assert!(notes.starts_with("Deposit - Cancelled by tourist at "), "{notes}");
    let stored_trip = Trips::find_by_id(booked.id).one(&state.orm).await?.unwrap();
    assert_eq!(stored_trip.status, TripStatus::Cancelled);

    let err = payment_service::cancel_payment(&state, &bob, bob_payment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)), "got {err:?}");

    // Trips that are not confirmed-and-paid delete normally.
    let spare = trip_service::create_trip(
        &state,
        &employee,
        trip_request(bob_id, destination_id, 40),
    )
    .await?
    .data
    .unwrap();
    trip_service::delete_trip(&state, &employee, spare.id).await?;
    assert!(Trips::find_by_id(spare.id).one(&state.orm).await?.is_none());

    // Listing filters and paginates.
    let listed = trip_service::list_all_trips(
        &state,
        &employee,
        TripListQuery {
            page: Some(1),
            limit: Some(1),
            status: None,
            tourist_id: None,
        },
    )
    .await?;
    let meta = listed.pagination.unwrap();
    assert_eq!(meta.total, 2);
    assert_eq!(meta.pages, 2);
    assert_eq!(listed.data.unwrap().len(), 1);

    let confirmed_only = trip_service::list_all_trips(
        &state,
        &employee,
        TripListQuery {
            status: Some(TripStatus::Confirmed),
            ..Default::default()
        },
    )
    .await?;
    let trips = confirmed_only.data.unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].id, trip.id);
    assert!(trips[0].payment.is_some());

    let by_trip = payment_service::payment_by_trip(&state, booked.id).await?;
    assert_eq!(by_trip.map(|p| p.id), Some(bob_payment.id));
    assert!(payment_service::payment_by_trip(&state, spare.id).await?.is_none());

    Ok(())
}
