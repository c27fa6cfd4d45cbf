use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::record,
    config::AuthSettings,
    dto::auth::{Claims, CreateTouristRequest, LoginRequest, LoginResponse, RegisterRequest, RegisteredTourist},
    entity::{
        addresses::ActiveModel as AddressActive,
        enums::Role,
        tourists::ActiveModel as TouristActive,
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_staff},
    models::User,
    response::ApiResponse,
    state::AppState,
};

pub const DEFAULT_MEMBERSHIP: &str = "bronze";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(user: &UserModel, settings: &AuthSettings) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(settings.token_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

async fn ensure_email_free<C: ConnectionTrait>(conn: &C, email: &str) -> AppResult<()> {
    let exist = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(conn)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }
    Ok(())
}

fn new_user(
    email: String,
    password_hash: String,
    role: Role,
    is_active: bool,
    first_name: String,
    last_name: String,
    phone: Option<String>,
) -> UserActive {
    UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role),
        is_active: Set(is_active),
        first_name: Set(first_name),
        last_name: Set(last_name),
        phone: Set(phone),
        created_at: NotSet,
        updated_at: NotSet,
    }
}

fn new_tourist(user_id: Uuid) -> TouristActive {
    TouristActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        address_id: Set(None),
        membership_level: Set(DEFAULT_MEMBERSHIP.to_string()),
        date_of_birth: Set(None),
        nationality: Set(None),
        identity_number: Set(None),
        emergency_contact: Set(None),
        total_trips: Set(0),
        total_spent: Set(0),
        loyalty_points: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    }
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    if !user.is_active {
        return Err(AppError::Unauthorized("User is not active".into()));
    }

    let token = issue_token(&user, &state.auth)?;

    record(
        &state.pool,
        user.id,
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token,
            user: User::from(user),
        },
    ))
}

/// Self-service tourist signup. The account stays inactive until staff approve it.
pub async fn register_tourist(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        email,
        password,
        first_name,
        last_name,
        phone,
        ..
    } = payload;
    ensure_email_free(&state.orm, &email).await?;
    let password_hash = hash_password(&password)?;

    let txn = state.orm.begin().await?;
    let user = new_user(
        email,
        password_hash,
        Role::Tourist,
        false,
        first_name,
        last_name,
        phone,
    )
    .insert(&txn)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Email already exists"))?;
    new_tourist(user.id).insert(&txn).await?;
    txn.commit().await?;

    record(
        &state.pool,
        user.id,
        "tourist_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("Tourist registered", User::from(user)))
}

pub async fn register_employee(
    state: &AppState,
    actor: &AuthUser,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(actor)?;
    ensure_email_free(&state.orm, &payload.email).await?;
    let password_hash = hash_password(&payload.password)?;

    let user = new_user(
        payload.email,
        password_hash,
        Role::Employee,
        true,
        payload.first_name,
        payload.last_name,
        payload.phone,
    )
    .insert(&state.orm)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Email already exists"))?;

    record(
        &state.pool,
        actor.user_id,
        "employee_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("Employee registered", User::from(user)))
}

/// Staff-assisted tourist signup: address, user and profile in one transaction.
pub async fn register_tourist_by_employee(
    state: &AppState,
    actor: &AuthUser,
    payload: CreateTouristRequest,
) -> AppResult<ApiResponse<RegisteredTourist>> {
    ensure_staff(actor)?;
    ensure_email_free(&state.orm, &payload.email).await?;
    let password_hash = hash_password(&payload.password)?;

    let txn = state.orm.begin().await?;

    let address_id = match payload.address {
        Some(address) => {
            let address = AddressActive {
                id: Set(Uuid::new_v4()),
                street: Set(address.street),
                city: Set(address.city),
                state: Set(address.state),
                postal_code: Set(address.postal_code),
                country: Set(address.country),
                created_at: NotSet,
            }
            .insert(&txn)
            .await?;
            Some(address.id)
        }
        None => None,
    };

    let user = new_user(
        payload.email,
        password_hash,
        Role::Tourist,
        true,
        payload.first_name,
        payload.last_name,
        payload.phone,
    )
    .insert(&txn)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Email already exists"))?;

    let mut tourist = new_tourist(user.id);
    tourist.address_id = Set(address_id);
    tourist.date_of_birth = Set(payload.date_of_birth);
    tourist.nationality = Set(payload.nationality);
    tourist.identity_number = Set(payload.identity_number);
    tourist.emergency_contact = Set(payload.emergency_contact);
    let tourist = tourist.insert(&txn).await?;

    txn.commit().await?;

    record(
        &state.pool,
        actor.user_id,
        "tourist_register_by_employee",
        "tourists",
        serde_json::json!({ "user_id": user.id, "tourist_id": tourist.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Tourist registered",
        RegisteredTourist {
            user: User::from(user),
            tourist_id: tourist.id,
        },
    ))
}

pub async fn approve_tourist(
    state: &AppState,
    actor: &AuthUser,
    user_id: Uuid,
) -> AppResult<ApiResponse<User>> {
    ensure_staff(actor)?;
    let user = Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .filter(|u| u.role == Role::Tourist)
        .ok_or_else(|| AppError::NotFound("User not found or not a tourist".into()))?;

    let mut active: UserActive = user.into();
    active.is_active = Set(true);
    active.updated_at = Set(Utc::now().fixed_offset());
    let user = active.update(&state.orm).await?;

    record(
        &state.pool,
        actor.user_id,
        "tourist_approve",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("Tourist approved", User::from(user)))
}
