mod common;

use std::time::Duration as StdDuration;

use axum::http::StatusCode;
use sea_orm::sea_query::LockType;
use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, Set, TransactionTrait};
use tourism_agency_api::{
    dto::payment::{ConfirmPaymentRequest, CreatePaymentRequest},
    entity::{
        Payments, Trips,
        enums::{PaymentMethod, PaymentStatus, Role, TripStatus},
        payments::ActiveModel as PaymentActive,
        trips::ActiveModel as TripActive,
    },
    error::AppError,
    services::{payment_service, trip_service},
};

use common::{create_destination, create_tourist, create_user, database_url, setup_state, trip_request};

fn payment_request(trip_id: uuid::Uuid, amount: i64) -> CreatePaymentRequest {
    CreatePaymentRequest {
        trip_id,
        amount,
        method: PaymentMethod::CreditCard,
        transaction_id: None,
        notes: None,
    }
}

// Concurrent writers on one trip: duplicate payments, deletes racing a confirm, rejected confirms.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_trip_and_payment_writes() -> anyhow::Result<()> {
    let Some(database_url) = database_url() else {
        return Ok(());
    };
    let state = setup_state(&database_url).await?;

    let employee = create_user(&state, Role::Employee, "cashier@example.com").await?;
    let (_, tourist_id) = create_tourist(&state, "carla@example.com").await?;
    let destination_id = create_destination(&state, "Lombok").await?;

    // Two payments for the same trip at once: exactly one wins.
    let trip = trip_service::create_trip(
        &state,
        &employee,
        trip_request(tourist_id, destination_id, 300),
    )
    .await?
    .data
    .unwrap();

    let (first, second) = tokio::join!(
        payment_service::create_payment(&state, &employee, payment_request(trip.id, 300)),
        payment_service::create_payment(&state, &employee, payment_request(trip.id, 300)),
    );
    let (winner, loser) = match (first, second) {
        (Ok(ok), Err(err)) | (Err(err), Ok(ok)) => (ok, err),
        (a, b) => panic!("expected one success and one conflict, got {a:?} and {b:?}"),
    };
    assert!(matches!(loser, AppError::StateConflict(_)), "got {loser:?}");
    assert_eq!(loser.status(), StatusCode::BAD_REQUEST);
    assert_eq!(loser.to_string(), "Trip already has a payment");
    let payment = winner.data.unwrap();

    // A confirm committing while the delete waits leaves the trip undeletable.
    let txn = state.orm.begin().await?;
    let locked_payment = Payments::find_by_id(payment.id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .unwrap();
    let locked_trip = Trips::find_by_id(trip.id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .unwrap();
    let mut paid: PaymentActive = locked_payment.into();
    paid.status = Set(PaymentStatus::Paid);
    paid.update(&txn).await?;
    let mut confirmed: TripActive = locked_trip.into();
    confirmed.status = Set(TripStatus::Confirmed);
    confirmed.update(&txn).await?;

    let delete = tokio::spawn({
        let state = state.clone();
        let employee = employee.clone();
        let trip_id = trip.id;
        async move { trip_service::delete_trip(&state, &employee, trip_id).await }
    });
    tokio::time::sleep(StdDuration::from_millis(300)).await;
    txn.commit().await?;

    let err = delete.await?.unwrap_err();
    assert!(matches!(err, AppError::StateConflict(_)), "got {err:?}");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(Trips::find_by_id(trip.id).one(&state.orm).await?.is_some());
    assert!(Payments::find_by_id(payment.id).one(&state.orm).await?.is_some());

    // A pending payment on a cancelled trip cannot be confirmed; neither row changes.
    let mut cancelled_trip = trip_request(tourist_id, destination_id, 90);
    cancelled_trip.status = Some(TripStatus::Cancelled);
    let cancelled_trip = trip_service::create_trip(&state, &employee, cancelled_trip)
        .await?
        .data
        .unwrap();
    let mut pending = payment_request(cancelled_trip.id, 90);
    pending.transaction_id = Some("TX-HOLD".into());
    let pending = payment_service::create_payment(&state, &employee, pending)
        .await?
        .data
        .unwrap();

    let err = payment_service::confirm_payment(
        &state,
        &employee,
        pending.id,
        ConfirmPaymentRequest {
            transaction_id: Some("TX-LATE".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)), "got {err:?}");

    let stored_payment = Payments::find_by_id(pending.id).one(&state.orm).await?.unwrap();
    assert_eq!(stored_payment.status, PaymentStatus::Pending);
    assert_eq!(stored_payment.transaction_id.as_deref(), Some("TX-HOLD"));
    assert!(stored_payment.payment_date.is_none());
    let stored_trip = Trips::find_by_id(cancelled_trip.id).one(&state.orm).await?.unwrap();
    assert_eq!(stored_trip.status, TripStatus::Cancelled);

    Ok(())
}
