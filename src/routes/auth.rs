use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use uuid::Uuid;

use crate::{
    dto::auth::{CreateTouristRequest, LoginRequest, LoginResponse, RegisterRequest, RegisteredTourist},
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    routes::extract::ValidatedJson,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/tourist/register", post(register_tourist))
        .route("/employee/register", post(register_employee))
        .route("/employee/tourist-register", post(register_tourist_by_employee))
        .route("/employee/tourist-approve/{id}", post(approve_tourist))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or inactive account")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/tourist/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Tourist registered, pending approval", body = ApiResponse<User>),
        (status = 409, description = "Email already exists")
    ),
    tag = "Auth"
)]
pub async fn register_tourist(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = auth_service::register_tourist(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/employee/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Employee registered", body = ApiResponse<User>),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn register_employee(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = auth_service::register_employee(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/employee/tourist-register",
    request_body = CreateTouristRequest,
    responses(
        (status = 201, description = "Tourist registered by staff", body = ApiResponse<RegisteredTourist>),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn register_tourist_by_employee(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTouristRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RegisteredTourist>>)> {
    let resp = auth_service::register_tourist_by_employee(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/employee/tourist-approve/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID of the tourist")
    ),
    responses(
        (status = 200, description = "Tourist approved", body = ApiResponse<User>),
        (status = 404, description = "User not found or not a tourist")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn approve_tourist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::approve_tourist(&state, &user, id).await?;
    Ok(Json(resp))
}
