use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::trip::{BookTripRequest, CreateTripRequest, RateTripRequest, UpdateTripRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Trip,
    response::ApiResponse,
    routes::{
        extract::ValidatedJson,
        params::{ScopedTripQuery, TripListQuery},
    },
    services::trip_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_trips))
        .route("/detail/{id}", get(get_trip))
        .route("/tourist/{tourist_id}", get(trips_by_tourist))
        .route("/create", post(create_trip))
        .route("/book", post(book_trip))
        .route("/my-trips", get(my_trips))
        .route("/rating/{id}", patch(rate_trip))
        .route("/{id}", patch(update_trip).delete(delete_trip))
}

#[utoipa::path(
    get,
    path = "/api/trip/list",
    params(TripListQuery),
    responses(
        (status = 200, description = "Paginated trips, newest first", body = ApiResponse<Vec<Trip>>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn list_trips(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TripListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Trip>>>> {
    let resp = trip_service::list_all_trips(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/trip/detail/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip with tourist address and payment", body = ApiResponse<Trip>),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn get_trip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Trip>>> {
    let resp = trip_service::get_trip(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/trip/tourist/{tourist_id}",
    params(
        ("tourist_id" = Uuid, Path, description = "Tourist ID"),
        ScopedTripQuery
    ),
    responses(
        (status = 200, description = "Trips of one tourist", body = ApiResponse<Vec<Trip>>),
        (status = 404, description = "Tourist not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn trips_by_tourist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tourist_id): Path<Uuid>,
    Query(query): Query<ScopedTripQuery>,
) -> AppResult<Json<ApiResponse<Vec<Trip>>>> {
    let resp = trip_service::trips_by_tourist(&state, &user, tourist_id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/trip/create",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Trip created", body = ApiResponse<Trip>),
        (status = 400, description = "End date is not after start date"),
        (status = 404, description = "Tourist or destination not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn create_trip(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTripRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Trip>>)> {
    let resp = trip_service::create_trip(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/trip/book",
    request_body = BookTripRequest,
    responses(
        (status = 201, description = "Trip booked", body = ApiResponse<Trip>),
        (status = 400, description = "End date is not after start date"),
        (status = 404, description = "Destination or tourist profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn book_trip(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<BookTripRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Trip>>)> {
    let resp = trip_service::book_trip(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/trip/my-trips",
    params(ScopedTripQuery),
    responses(
        (status = 200, description = "Trips of the calling tourist", body = ApiResponse<Vec<Trip>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn my_trips(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ScopedTripQuery>,
) -> AppResult<Json<ApiResponse<Vec<Trip>>>> {
    let resp = trip_service::trips_by_user(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/trip/rating/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    request_body = RateTripRequest,
    responses(
        (status = 200, description = "Trip rated", body = ApiResponse<Trip>),
        (status = 400, description = "Trip not confirmed or rating out of range"),
        (status = 403, description = "Trip belongs to another tourist"),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn rate_trip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RateTripRequest>,
) -> AppResult<Json<ApiResponse<Trip>>> {
    let resp = trip_service::rate_trip(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/trip/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    request_body = UpdateTripRequest,
    responses(
        (status = 200, description = "Trip updated", body = ApiResponse<Trip>),
        (status = 400, description = "Invalid dates or rating"),
        (status = 404, description = "Trip or destination not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn update_trip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTripRequest>,
) -> AppResult<Json<ApiResponse<Trip>>> {
    let resp = trip_service::update_trip(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/trip/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip deleted"),
        (status = 404, description = "Trip not found"),
        (status = 400, description = "Confirmed trip with a payment")
    ),
    security(("bearer_auth" = [])),
    tag = "Trips"
)]
pub async fn delete_trip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = trip_service::delete_trip(&state, &user, id).await?;
    Ok(Json(resp))
}
