use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    audit::record,
    dto::tourist::{AddressInput, UpdateTouristRequest},
    entity::{
        addresses::{ActiveModel as AddressActive, Entity as Addresses},
        tourists::{ActiveModel as TouristActive, Column as TouristCol, Entity as Tourists, Model as TouristModel},
        users::{ActiveModel as UserActive, Entity as Users},
    },
    error::AppResult,
    lifecycle::found,
    middleware::auth::{AuthUser, ensure_staff, ensure_tourist},
    models::Tourist,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Which caller is editing the profile. Only staff may toggle `is_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Editor {
    Owner,
    Staff,
}

pub async fn list_tourists(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<Tourist>>> {
    ensure_staff(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Tourists::find().order_by_desc(TouristCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await?;

    let rows = finder.limit(limit).offset(offset).all(&state.orm).await?;
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(load_tourist(&state.orm, row).await?);
    }

    Ok(ApiResponse::paged(
        "Tourists",
        items,
        Meta::new(page, limit, total),
    ))
}

pub async fn get_tourist(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Tourist>> {
    ensure_staff(user)?;
    let tourist = found(Tourists::find_by_id(id).one(&state.orm).await?, "Tourist")?;
    let tourist = load_tourist(&state.orm, tourist).await?;
    Ok(ApiResponse::success("Tourist", tourist))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Tourist>> {
    ensure_tourist(user)?;
    let tourist = find_by_user(&state.orm, user.user_id).await?;
    let tourist = load_tourist(&state.orm, tourist).await?;
    Ok(ApiResponse::success("Tourist profile", tourist))
}

/// Tourist profile owned by `user_id`.
pub async fn find_by_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> AppResult<TouristModel> {
    let tourist = Tourists::find()
        .filter(TouristCol::UserId.eq(user_id))
        .one(conn)
        .await?;
    Ok(found(tourist, "Tourist profile")?)
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateTouristRequest,
) -> AppResult<ApiResponse<Tourist>> {
    ensure_tourist(user)?;
    let txn = state.orm.begin().await?;
    let tourist = Tourists::find()
        .filter(TouristCol::UserId.eq(user.user_id))
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let tourist = found(tourist, "Tourist")?;

    let tourist = apply_update(&txn, tourist, payload, Editor::Owner).await?;
    let view = load_tourist(&txn, tourist).await?;
    txn.commit().await?;

    record(
        &state.pool,
        user.user_id,
        "tourist_profile_update",
        "tourists",
        serde_json::json!({ "tourist_id": view.id }),
    )
    .await;

    Ok(ApiResponse::success("Profile updated", view))
}

pub async fn update_by_employee(
    state: &AppState,
    user: &AuthUser,
    tourist_id: Uuid,
    payload: UpdateTouristRequest,
) -> AppResult<ApiResponse<Tourist>> {
    ensure_staff(user)?;
    let txn = state.orm.begin().await?;
    let tourist = Tourists::find_by_id(tourist_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let tourist = found(tourist, "Tourist")?;

    let tourist = apply_update(&txn, tourist, payload, Editor::Staff).await?;
    let view = load_tourist(&txn, tourist).await?;
    txn.commit().await?;

    record(
        &state.pool,
        user.user_id,
        "tourist_update",
        "tourists",
        serde_json::json!({ "tourist_id": view.id }),
    )
    .await;

    Ok(ApiResponse::success("Tourist updated", view))
}

/// Deletes the owned address and the owning user; the tourist row cascades.
pub async fn delete_tourist(
    state: &AppState,
    user: &AuthUser,
    tourist_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let tourist = found(
        Tourists::find_by_id(tourist_id).one(&state.orm).await?,
        "Tourist",
    )?;

    let txn = state.orm.begin().await?;
    if let Some(address_id) = tourist.address_id {
        Addresses::delete_by_id(address_id).exec(&txn).await?;
    }
    Users::delete_by_id(tourist.user_id).exec(&txn).await?;
    txn.commit().await?;

    record(
        &state.pool,
        user.user_id,
        "tourist_delete",
        "tourists",
        serde_json::json!({ "tourist_id": tourist_id, "user_id": tourist.user_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Tourist deleted",
        serde_json::json!({ "id": tourist_id }),
    ))
}

async fn apply_update(
    txn: &DatabaseTransaction,
    tourist: TouristModel,
    payload: UpdateTouristRequest,
    editor: Editor,
) -> AppResult<TouristModel> {
    let UpdateTouristRequest {
        first_name,
        last_name,
        phone,
        date_of_birth,
        nationality,
        identity_number,
        emergency_contact,
        is_active,
        address,
    } = payload;
    let now = Utc::now().fixed_offset();

    let linked_address = match address {
        Some(address) => upsert_address(txn, tourist.address_id, address).await?,
        None => tourist.address_id,
    };

    let is_active = is_active.filter(|_| editor == Editor::Staff);
    if first_name.is_some() || last_name.is_some() || phone.is_some() || is_active.is_some() {
        let owner = found(Users::find_by_id(tourist.user_id).one(txn).await?, "User")?;
        let mut user: UserActive = owner.into();
        if let Some(first_name) = first_name {
            user.first_name = Set(first_name);
        }
        if let Some(last_name) = last_name {
            user.last_name = Set(last_name);
        }
        if let Some(phone) = phone {
            user.phone = Set(Some(phone));
        }
        if let Some(is_active) = is_active {
            user.is_active = Set(is_active);
        }
        user.updated_at = Set(now);
        user.update(txn).await?;
    }

    let mut active: TouristActive = tourist.into();
    active.address_id = Set(linked_address);
    if let Some(date_of_birth) = date_of_birth {
        active.date_of_birth = Set(Some(date_of_birth));
    }
    if let Some(nationality) = nationality {
        active.nationality = Set(Some(nationality));
    }
    if let Some(identity_number) = identity_number {
        active.identity_number = Set(Some(identity_number));
    }
    if let Some(emergency_contact) = emergency_contact {
        active.emergency_contact = Set(Some(emergency_contact));
    }
    active.updated_at = Set(now);
    Ok(active.update(txn).await?)
}

/// Updates the tourist's address in place, or creates one when none is linked yet.
async fn upsert_address(
    txn: &DatabaseTransaction,
    current: Option<Uuid>,
    input: AddressInput,
) -> AppResult<Option<Uuid>> {
    let existing = match current {
        Some(id) => Addresses::find_by_id(id).one(txn).await?,
        None => None,
    };

    let address = match existing {
        Some(existing) => {
            let mut active: AddressActive = existing.into();
            if let Some(street) = input.street {
                active.street = Set(Some(street));
            }
            if let Some(city) = input.city {
                active.city = Set(Some(city));
            }
            if let Some(state) = input.state {
                active.state = Set(Some(state));
            }
            if let Some(postal_code) = input.postal_code {
                active.postal_code = Set(Some(postal_code));
            }
            if let Some(country) = input.country {
                active.country = Set(Some(country));
            }
            active.update(txn).await?
        }
        None => {
            AddressActive {
                id: Set(Uuid::new_v4()),
                street: Set(input.street),
                city: Set(input.city),
                state: Set(input.state),
                postal_code: Set(input.postal_code),
                country: Set(input.country),
                created_at: NotSet,
            }
            .insert(txn)
            .await?
        }
    };

    Ok(Some(address.id))
}

async fn load_tourist<C: ConnectionTrait>(conn: &C, tourist: TouristModel) -> AppResult<Tourist> {
    let user = Users::find_by_id(tourist.user_id).one(conn).await?;
    let address = match tourist.address_id {
        Some(id) => Addresses::find_by_id(id).one(conn).await?,
        None => None,
    };
    Ok(Tourist::from_parts(tourist, user, address))
}
