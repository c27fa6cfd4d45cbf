use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::record,
    dto::destination::{CreateDestinationRequest, UpdateDestinationRequest},
    entity::{
        Trips,
        destinations::{ActiveModel as DestinationActive, Column as DestCol, Entity as Destinations},
    },
    error::{AppError, AppResult},
    lifecycle::found,
    middleware::auth::{AuthUser, ensure_admin},
    models::Destination,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn create_destination(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDestinationRequest,
) -> AppResult<ApiResponse<Destination>> {
    ensure_admin(user)?;

    let destination = DestinationActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        country: Set(payload.country),
        city: Set(payload.city),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
        description: Set(payload.description),
        image_url: Set(payload.image_url),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "destination_create",
        "destinations",
        serde_json::json!({ "destination_id": destination.id, "name": destination.name }),
    )
    .await;

    Ok(ApiResponse::success(
        "Destination created",
        Destination::from(destination),
    ))
}

pub async fn list_destinations(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<Destination>>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = Destinations::find().order_by_desc(DestCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit)
        .offset(offset)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Destination::from)
        .collect();

    Ok(ApiResponse::paged(
        "Destinations",
        items,
        Meta::new(page, limit, total),
    ))
}

pub async fn get_destination(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Destination>> {
    let destination = found(
        Destinations::find_by_id(id).one(&state.orm).await?,
        "Destination",
    )?;
    Ok(ApiResponse::success(
        "Destination",
        Destination::from(destination),
    ))
}

pub async fn update_destination(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateDestinationRequest,
) -> AppResult<ApiResponse<Destination>> {
    ensure_admin(user)?;
    let existing = found(
        Destinations::find_by_id(id).one(&state.orm).await?,
        "Destination",
    )?;

    let mut active: DestinationActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(country) = payload.country {
        active.country = Set(Some(country));
    }
    if let Some(city) = payload.city {
        active.city = Set(Some(city));
    }
    if let Some(latitude) = payload.latitude {
        active.latitude = Set(Some(latitude));
    }
    if let Some(longitude) = payload.longitude {
        active.longitude = Set(Some(longitude));
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    let destination = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "destination_update",
        "destinations",
        serde_json::json!({ "destination_id": destination.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Destination updated",
        Destination::from(destination),
    ))
}

pub async fn delete_destination(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let destination = found(
        Destinations::find_by_id(id).one(&state.orm).await?,
        "Destination",
    )?;
    let in_use = destination.find_related(Trips).count(&state.orm).await?;
    if in_use > 0 {
        return Err(AppError::Conflict(
            "Destination is referenced by existing trips".into(),
        ));
    }
    destination.delete(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "destination_delete",
        "destinations",
        serde_json::json!({ "destination_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Destination deleted",
        serde_json::json!({ "id": id }),
    ))
}
