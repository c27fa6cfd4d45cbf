use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    audit::record,
    dto::payment::{ConfirmPaymentRequest, CreatePaymentRequest, UpdatePaymentRequest},
    entity::{
        Trips,
        enums::PaymentStatus,
        payments::{
            ActiveModel as PaymentActive, Column as PaymentCol, Entity as Payments,
            Model as PaymentModel,
        },
        trips::Column as TripCol,
    },
    error::{AppError, AppResult},
    lifecycle::{
        Violation, found,
        payment::{PaymentTransition, check_new_payment},
    },
    middleware::auth::{AuthUser, ensure_staff, ensure_tourist},
    models::Payment,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{
        tourist_service,
        views::{payment_view, payment_views},
    },
    state::AppState,
    unit_of_work::PaymentTripUnit,
};

/// Records a pending payment for a trip. Staff only.
pub async fn create_payment(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePaymentRequest,
) -> AppResult<ApiResponse<Payment>> {
    ensure_staff(user)?;
    let payment = insert_payment(state, user, payload, None).await?;
    Ok(ApiResponse::success("Payment created", payment))
}

/// A tourist pays for one of their own trips.
pub async fn create_my_payment(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePaymentRequest,
) -> AppResult<ApiResponse<Payment>> {
    ensure_tourist(user)?;
    let tourist = tourist_service::find_by_user(&state.orm, user.user_id).await?;
    let payment = insert_payment(state, user, payload, Some(tourist.id)).await?;
    Ok(ApiResponse::success("Payment created", payment))
}

async fn insert_payment(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePaymentRequest,
    owner: Option<Uuid>,
) -> AppResult<Payment> {
    let txn = state.orm.begin().await?;

    // The trip row stays locked so its price cannot move under the amount check.
    let trip = Trips::find_by_id(payload.trip_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let trip = found(trip, "Trip")?;
    if owner.is_some_and(|tourist_id| tourist_id != trip.tourist_id) {
        return Err(Violation::Forbidden("You can only pay for your own trips").into());
    }

    let existing = trip.find_related(Payments).one(&txn).await?;
    check_new_payment(&trip, existing.is_some(), payload.amount)?;

    let payment = PaymentActive {
        id: Set(Uuid::new_v4()),
        trip_id: Set(trip.id),
        amount: Set(payload.amount),
        method: Set(payload.method),
        status: Set(PaymentStatus::Pending),
        transaction_id: Set(payload.transaction_id),
        notes: Set(payload.notes),
        payment_date: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|e| AppError::state_conflict_on_unique(e, "Trip already has a payment"))?;
    txn.commit().await?;

    record(
        &state.pool,
        user.user_id,
        "payment_create",
        "payments",
        serde_json::json!({
            "payment_id": payment.id,
            "trip_id": payment.trip_id,
            "amount": payment.amount,
        }),
    )
    .await;

    payment_view(&state.orm, payment).await
}

async fn paged_payments(
    state: &AppState,
    pagination: Pagination,
    tourist_id: Option<Uuid>,
) -> AppResult<ApiResponse<Vec<Payment>>> {
    let (page, limit, offset) = pagination.normalize();

    let mut condition = Condition::all();
    if let Some(tourist_id) = tourist_id {
        let trip_ids: Vec<Uuid> = Trips::find()
            .select_only()
            .column(TripCol::Id)
            .filter(TripCol::TouristId.eq(tourist_id))
            .into_tuple()
            .all(&state.orm)
            .await?;
        condition = condition.add(PaymentCol::TripId.is_in(trip_ids));
    }

    let finder = Payments::find()
        .filter(condition)
        .order_by_desc(PaymentCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await?;

    let rows = finder.limit(limit).offset(offset).all(&state.orm).await?;
    let items = payment_views(&state.orm, rows).await?;

    Ok(ApiResponse::paged(
        "Payments",
        items,
        Meta::new(page, limit, total),
    ))
}

pub async fn list_payments(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<Payment>>> {
    ensure_staff(user)?;
    paged_payments(state, pagination, None).await
}

/// Payments for the trips of the calling tourist.
pub async fn my_payments(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<Payment>>> {
    ensure_tourist(user)?;
    let tourist = tourist_service::find_by_user(&state.orm, user.user_id).await?;
    paged_payments(state, pagination, Some(tourist.id)).await
}

pub async fn get_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Payment>> {
    ensure_staff(user)?;
    let payment = find_payment(state, id).await?;
    let payment = payment_view(&state.orm, payment).await?;
    Ok(ApiResponse::success("Payment", payment))
}

/// The payment of a trip, if one was recorded.
pub async fn payment_by_trip(state: &AppState, trip_id: Uuid) -> AppResult<Option<Payment>> {
    let payment = Payments::find()
        .filter(PaymentCol::TripId.eq(trip_id))
        .one(&state.orm)
        .await?;
    match payment {
        Some(payment) => Ok(Some(payment_view(&state.orm, payment).await?)),
        None => Ok(None),
    }
}

/// Overwrites the supplied fields. Status is only changed through confirm and cancel.
pub async fn update_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdatePaymentRequest,
) -> AppResult<ApiResponse<Payment>> {
    ensure_staff(user)?;
    let existing = find_payment(state, id).await?;

    let mut active: PaymentActive = existing.into();
    if let Some(amount) = payload.amount {
        active.amount = Set(amount);
    }
    if let Some(method) = payload.method {
        active.method = Set(method);
    }
    if let Some(transaction_id) = payload.transaction_id {
        active.transaction_id = Set(Some(transaction_id));
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(payment_date) = payload.payment_date {
        active.payment_date = Set(Some(payment_date.fixed_offset()));
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    let payment = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "payment_update",
        "payments",
        serde_json::json!({ "payment_id": payment.id }),
    )
    .await;

    let payment = payment_view(&state.orm, payment).await?;
    Ok(ApiResponse::success("Payment updated", payment))
}

pub async fn delete_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let payment = find_payment(state, id).await?;
    payment.delete(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "payment_delete",
        "payments",
        serde_json::json!({ "payment_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Payment deleted",
        serde_json::json!({ "id": id }),
    ))
}

/// Marks a pending payment as paid and confirms its trip.
pub async fn confirm_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ConfirmPaymentRequest,
) -> AppResult<ApiResponse<Payment>> {
    ensure_staff(user)?;
    let (payment, trip) = PaymentTripUnit::new(&state.orm)
        .apply(
            id,
            PaymentTransition::Confirm {
                transaction_id: payload.transaction_id,
            },
        )
        .await?;

    record(
        &state.pool,
        user.user_id,
        "payment_confirm",
        "payments",
        serde_json::json!({ "payment_id": payment.id, "trip_id": trip.id }),
    )
    .await;

    let payment = payment_view(&state.orm, payment).await?;
    Ok(ApiResponse::success("Payment confirmed", payment))
}

/// Refunds a payment on behalf of the tourist who owns its trip and cancels the trip.
pub async fn cancel_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Payment>> {
    ensure_tourist(user)?;
    let tourist = tourist_service::find_by_user(&state.orm, user.user_id).await?;
    let (payment, trip) = PaymentTripUnit::new(&state.orm)
        .apply(
            id,
            PaymentTransition::Cancel {
                requested_by: tourist.id,
            },
        )
        .await?;

    record(
        &state.pool,
        user.user_id,
        "payment_cancel",
        "payments",
        serde_json::json!({ "payment_id": payment.id, "trip_id": trip.id }),
    )
    .await;

    let payment = payment_view(&state.orm, payment).await?;
    Ok(ApiResponse::success("Payment cancelled", payment))
}

async fn find_payment(state: &AppState, id: Uuid) -> AppResult<PaymentModel> {
    Ok(found(
        Payments::find_by_id(id).one(&state.orm).await?,
        "Payment",
    )?)
}
