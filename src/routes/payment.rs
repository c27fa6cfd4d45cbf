use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::payment::{ConfirmPaymentRequest, CreatePaymentRequest, UpdatePaymentRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Payment,
    response::ApiResponse,
    routes::{extract::ValidatedJson, params::Pagination},
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/trip/{trip_id}", get(payment_by_trip))
        .route("/my-payments", get(my_payments))
        .route("/my-payment", post(create_my_payment))
        .route("/my-payment/{id}/cancel", patch(cancel_payment))
        .route("/{id}/confirm", patch(confirm_payment))
        .route(
            "/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

#[utoipa::path(
    get,
    path = "/api/payment",
    params(Pagination),
    responses(
        (status = 200, description = "Paginated payments", body = ApiResponse<Vec<Payment>>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn list_payments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Payment>>>> {
    let resp = payment_service::list_payments(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/payment",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Pending payment created", body = ApiResponse<Payment>),
        (status = 400, description = "Amount does not match the trip price, or trip already has a payment"),
        (status = 404, description = "Trip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreatePaymentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Payment>>)> {
    let resp = payment_service::create_payment(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/payment/trip/{trip_id}",
    params(
        ("trip_id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Payment of the trip", body = ApiResponse<Payment>),
        (status = 404, description = "No payment for this trip")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn payment_by_trip(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let payment = payment_service::payment_by_trip(&state, trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".into()))?;
    Ok(Json(ApiResponse::success("Payment", payment)))
}

#[utoipa::path(
    get,
    path = "/api/payment/my-payments",
    params(Pagination),
    responses(
        (status = 200, description = "Payments of the calling tourist", body = ApiResponse<Vec<Payment>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn my_payments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Payment>>>> {
    let resp = payment_service::my_payments(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/payment/my-payment",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Pending payment created", body = ApiResponse<Payment>),
        (status = 400, description = "Amount does not match the trip price, or trip already has a payment"),
        (status = 403, description = "Trip belongs to another tourist")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn create_my_payment(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreatePaymentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Payment>>)> {
    let resp = payment_service::create_my_payment(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/payment/my-payment/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment refunded and trip cancelled", body = ApiResponse<Payment>),
        (status = 400, description = "Payment is paid or already cancelled"),
        (status = 403, description = "Trip belongs to another tourist"),
        (status = 404, description = "Payment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn cancel_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let resp = payment_service::cancel_payment(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/payment/{id}/confirm",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    request_body = ConfirmPaymentRequest,
    responses(
        (status = 200, description = "Payment paid and trip confirmed", body = ApiResponse<Payment>),
        (status = 400, description = "Payment is not pending"),
        (status = 404, description = "Payment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ConfirmPaymentRequest>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let resp = payment_service::confirm_payment(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/payment/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment detail", body = ApiResponse<Payment>),
        (status = 404, description = "Payment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn get_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let resp = payment_service::get_payment(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/payment/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated", body = ApiResponse<Payment>),
        (status = 404, description = "Payment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn update_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePaymentRequest>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let resp = payment_service::update_payment(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/payment/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment deleted"),
        (status = 404, description = "Payment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn delete_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = payment_service::delete_payment(&state, &user, id).await?;
    Ok(Json(resp))
}
