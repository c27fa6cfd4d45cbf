use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::destination::{CreateDestinationRequest, UpdateDestinationRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Destination,
    response::ApiResponse,
    routes::{extract::ValidatedJson, params::Pagination},
    services::destination_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_destinations).post(create_destination))
        .route("/detail/{id}", get(get_destination))
        .route("/{id}", put(update_destination).delete(delete_destination))
}

#[utoipa::path(
    get,
    path = "/api/destination",
    params(Pagination),
    responses(
        (status = 200, description = "Paginated destinations", body = ApiResponse<Vec<Destination>>)
    ),
    tag = "Destinations"
)]
pub async fn list_destinations(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Destination>>>> {
    let resp = destination_service::list_destinations(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/destination/detail/{id}",
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    responses(
        (status = 200, description = "Destination detail", body = ApiResponse<Destination>),
        (status = 404, description = "Destination not found")
    ),
    tag = "Destinations"
)]
pub async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Destination>>> {
    let resp = destination_service::get_destination(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/destination",
    request_body = CreateDestinationRequest,
    responses(
        (status = 201, description = "Destination created", body = ApiResponse<Destination>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Destinations"
)]
pub async fn create_destination(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateDestinationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Destination>>)> {
    let resp = destination_service::create_destination(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/destination/{id}",
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    request_body = UpdateDestinationRequest,
    responses(
        (status = 200, description = "Destination updated", body = ApiResponse<Destination>),
        (status = 404, description = "Destination not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Destinations"
)]
pub async fn update_destination(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDestinationRequest>,
) -> AppResult<Json<ApiResponse<Destination>>> {
    let resp = destination_service::update_destination(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/destination/{id}",
    params(
        ("id" = Uuid, Path, description = "Destination ID")
    ),
    responses(
        (status = 200, description = "Destination deleted"),
        (status = 404, description = "Destination not found"),
        (status = 409, description = "Destination is still used by trips")
    ),
    security(("bearer_auth" = [])),
    tag = "Destinations"
)]
pub async fn delete_destination(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = destination_service::delete_destination(&state, &user, id).await?;
    Ok(Json(resp))
}
