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
    dto::trip::{BookTripRequest, CreateTripRequest, RateTripRequest, UpdateTripRequest},
    entity::{
        Destinations, Payments, Tourists,
        enums::TripStatus,
        payments::Column as PaymentCol,
        trips::{ActiveModel as TripActive, Column as TripCol, Entity as Trips},
    },
    error::AppResult,
    lifecycle::{Violation, found, trip as rules},
    middleware::auth::{AuthUser, ensure_staff, ensure_tourist},
    models::Trip,
    response::{ApiResponse, Meta},
    routes::params::{Pagination, ScopedTripQuery, TripListQuery},
    services::{
        tourist_service,
        views::{TripJoins, trip_view, trip_views},
    },
    state::AppState,
};

/// Inserts a trip after checking its tourist, destination and date range.
pub async fn create_trip(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTripRequest,
) -> AppResult<ApiResponse<Trip>> {
    ensure_staff(user)?;
    let trip = insert_trip(state, user, payload).await?;
    Ok(ApiResponse::success("Trip created", trip))
}

/// A tourist books a trip for themselves. The trip always starts `planned`.
pub async fn book_trip(
    state: &AppState,
    user: &AuthUser,
    payload: BookTripRequest,
) -> AppResult<ApiResponse<Trip>> {
    ensure_tourist(user)?;
    let tourist = tourist_service::find_by_user(&state.orm, user.user_id).await?;

    let request = CreateTripRequest {
        tourist_id: tourist.id,
        destination_id: payload.destination_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        participants: payload.participants,
        total_price: payload.total_price,
        notes: payload.notes,
        special_requests: payload.special_requests,
        status: None,
    };
    let trip = insert_trip(state, user, request).await?;
    Ok(ApiResponse::success("Trip booked", trip))
}

async fn insert_trip(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTripRequest,
) -> AppResult<Trip> {
    found(
        Tourists::find_by_id(payload.tourist_id).one(&state.orm).await?,
        "Tourist",
    )?;
    found(
        Destinations::find_by_id(payload.destination_id)
            .one(&state.orm)
            .await?,
        "Destination",
    )?;

    let start = payload.start_date.fixed_offset();
    let end = payload.end_date.fixed_offset();
    rules::check_date_range(start, end)?;
    rules::check_participants(payload.participants)?;
    rules::check_total_price(payload.total_price)?;

    let trip = TripActive {
        id: Set(Uuid::new_v4()),
        tourist_id: Set(payload.tourist_id),
        destination_id: Set(payload.destination_id),
        start_date: Set(start),
        end_date: Set(end),
        participants: Set(payload.participants),
        total_price: Set(payload.total_price),
        status: Set(payload.status.unwrap_or(TripStatus::Planned)),
        notes: Set(payload.notes),
        special_requests: Set(payload.special_requests),
        rating: Set(None),
        review: Set(None),
        created_by_id: Set(user.user_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "trip_create",
        "trips",
        serde_json::json!({ "trip_id": trip.id, "tourist_id": trip.tourist_id }),
    )
    .await;

    trip_view(&state.orm, trip, TripJoins::default()).await
}

/// Newest-first page of trips, optionally filtered by status and tourist.
pub async fn list_trips(
    state: &AppState,
    pagination: Pagination,
    status: Option<TripStatus>,
    tourist_id: Option<Uuid>,
) -> AppResult<ApiResponse<Vec<Trip>>> {
    let (page, limit, offset) = pagination.normalize();

    let mut condition = Condition::all();
    if let Some(status) = status {
        condition = condition.add(TripCol::Status.eq(status));
    }
    if let Some(tourist_id) = tourist_id {
        condition = condition.add(TripCol::TouristId.eq(tourist_id));
    }

    let finder = Trips::find()
        .filter(condition)
        .order_by_desc(TripCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await?;

    let rows = finder.limit(limit).offset(offset).all(&state.orm).await?;
    let items = trip_views(
        &state.orm,
        rows,
        TripJoins {
            address: false,
            payment: true,
        },
    )
    .await?;

    Ok(ApiResponse::paged(
        "Trips",
        items,
        Meta::new(page, limit, total),
    ))
}

pub async fn list_all_trips(
    state: &AppState,
    user: &AuthUser,
    query: TripListQuery,
) -> AppResult<ApiResponse<Vec<Trip>>> {
    ensure_staff(user)?;
    list_trips(state, query.pagination(), query.status, query.tourist_id).await
}

pub async fn get_trip(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Trip>> {
    ensure_staff(user)?;
    let trip = found(Trips::find_by_id(id).one(&state.orm).await?, "Trip")?;
    let trip = trip_view(
        &state.orm,
        trip,
        TripJoins {
            address: true,
            payment: true,
        },
    )
    .await?;
    Ok(ApiResponse::success("Trip", trip))
}

/// Partial update. Dates are validated on their merged values.
pub async fn update_trip(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateTripRequest,
) -> AppResult<ApiResponse<Trip>> {
    ensure_staff(user)?;
    let existing = found(Trips::find_by_id(id).one(&state.orm).await?, "Trip")?;

    if let Some(destination_id) = payload.destination_id {
        found(
            Destinations::find_by_id(destination_id)
                .one(&state.orm)
                .await?,
            "Destination",
        )?;
    }

    let dates = rules::merged_date_range(
        existing.start_date,
        existing.end_date,
        payload.start_date.map(|d| d.fixed_offset()),
        payload.end_date.map(|d| d.fixed_offset()),
    )?;
    if let Some(participants) = payload.participants {
        rules::check_participants(participants)?;
    }
    if let Some(total_price) = payload.total_price {
        rules::check_total_price(total_price)?;
    }
    if let Some(rating) = payload.rating {
        rules::check_rating(existing.status, rating)?;
    }

    let mut active: TripActive = existing.into();
    if let Some(destination_id) = payload.destination_id {
        active.destination_id = Set(destination_id);
    }
    if let Some((start, end)) = dates {
        active.start_date = Set(start);
        active.end_date = Set(end);
    }
    if let Some(participants) = payload.participants {
        active.participants = Set(participants);
    }
    if let Some(total_price) = payload.total_price {
        active.total_price = Set(total_price);
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(special_requests) = payload.special_requests {
        active.special_requests = Set(Some(special_requests));
    }
    if let Some(rating) = payload.rating {
        active.rating = Set(Some(rating));
    }
    if let Some(review) = payload.review {
        active.review = Set(Some(review));
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    let trip = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "trip_update",
        "trips",
        serde_json::json!({ "trip_id": trip.id }),
    )
    .await;

    let trip = trip_view(
        &state.orm,
        trip,
        TripJoins {
            address: false,
            payment: true,
        },
    )
    .await?;
    Ok(ApiResponse::success("Trip updated", trip))
}

pub async fn delete_trip(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let txn = state.orm.begin().await?;

    // Payment before trip, the same order confirm and cancel lock in.
    let payment = Payments::find()
        .filter(PaymentCol::TripId.eq(id))
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let trip = Trips::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let trip = found(trip, "Trip")?;
    // A payment created while this transaction waited on the trip row.
    let payment = match payment {
        Some(payment) => Some(payment),
        None => trip.find_related(Payments).one(&txn).await?,
    };

    rules::check_deletable(trip.status, payment.is_some())?;

    trip.delete(&txn).await?;
    txn.commit().await?;

    record(
        &state.pool,
        user.user_id,
        "trip_delete",
        "trips",
        serde_json::json!({ "trip_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Trip deleted",
        serde_json::json!({ "id": id }),
    ))
}

pub async fn trips_by_tourist(
    state: &AppState,
    user: &AuthUser,
    tourist_id: Uuid,
    query: ScopedTripQuery,
) -> AppResult<ApiResponse<Vec<Trip>>> {
    ensure_staff(user)?;
    found(
        Tourists::find_by_id(tourist_id).one(&state.orm).await?,
        "Tourist",
    )?;
    list_trips(state, query.pagination(), query.status, Some(tourist_id)).await
}

/// Trips of the tourist profile owned by the calling user.
pub async fn trips_by_user(
    state: &AppState,
    user: &AuthUser,
    query: ScopedTripQuery,
) -> AppResult<ApiResponse<Vec<Trip>>> {
    ensure_tourist(user)?;
    let tourist = tourist_service::find_by_user(&state.orm, user.user_id).await?;
    list_trips(state, query.pagination(), query.status, Some(tourist.id)).await
}

/// Rates a confirmed trip owned by the calling tourist.
pub async fn rate_trip(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: RateTripRequest,
) -> AppResult<ApiResponse<Trip>> {
    ensure_tourist(user)?;
    let tourist = tourist_service::find_by_user(&state.orm, user.user_id).await?;
    let trip = found(Trips::find_by_id(id).one(&state.orm).await?, "Trip")?;
    if trip.tourist_id != tourist.id {
        return Err(Violation::Forbidden("You can only rate your own trips").into());
    }

    rules::check_rating(trip.status, payload.rating)?;

    let mut active: TripActive = trip.into();
    active.rating = Set(Some(payload.rating));
    active.review = Set(payload.review);
    active.updated_at = Set(Utc::now().fixed_offset());
    let trip = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "trip_rate",
        "trips",
        serde_json::json!({ "trip_id": trip.id, "rating": payload.rating }),
    )
    .await;

    let trip = trip_view(&state.orm, trip, TripJoins::default()).await?;
    Ok(ApiResponse::success("Trip rated", trip))
}
