use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::tourist::UpdateTouristRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Tourist,
    response::ApiResponse,
    routes::{extract::ValidatedJson, params::Pagination},
    services::tourist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_tourists))
        .route("/detail/{id}", get(get_tourist))
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/{id}", axum::routing::patch(update_tourist).delete(delete_tourist))
}

#[utoipa::path(
    get,
    path = "/api/tourist/list",
    params(Pagination),
    responses(
        (status = 200, description = "Paginated tourists", body = ApiResponse<Vec<Tourist>>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Tourists"
)]
pub async fn list_tourists(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Tourist>>>> {
    let resp = tourist_service::list_tourists(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tourist/detail/{id}",
    params(
        ("id" = Uuid, Path, description = "Tourist ID")
    ),
    responses(
        (status = 200, description = "Tourist detail", body = ApiResponse<Tourist>),
        (status = 404, description = "Tourist not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tourists"
)]
pub async fn get_tourist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Tourist>>> {
    let resp = tourist_service::get_tourist(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tourist/profile",
    responses(
        (status = 200, description = "Own tourist profile", body = ApiResponse<Tourist>),
        (status = 404, description = "Tourist profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tourists"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Tourist>>> {
    let resp = tourist_service::get_profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/tourist/profile",
    request_body = UpdateTouristRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<Tourist>),
        (status = 404, description = "Tourist not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tourists"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateTouristRequest>,
) -> AppResult<Json<ApiResponse<Tourist>>> {
    let resp = tourist_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/tourist/{id}",
    params(
        ("id" = Uuid, Path, description = "Tourist ID")
    ),
    request_body = UpdateTouristRequest,
    responses(
        (status = 200, description = "Tourist updated", body = ApiResponse<Tourist>),
        (status = 404, description = "Tourist not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tourists"
)]
pub async fn update_tourist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTouristRequest>,
) -> AppResult<Json<ApiResponse<Tourist>>> {
    let resp = tourist_service::update_by_employee(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/tourist/{id}",
    params(
        ("id" = Uuid, Path, description = "Tourist ID")
    ),
    responses(
        (status = 200, description = "Tourist and owning user deleted"),
        (status = 404, description = "Tourist not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tourists"
)]
pub async fn delete_tourist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = tourist_service::delete_tourist(&state, &user, id).await?;
    Ok(Json(resp))
}
