#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use tourism_agency_api::{
    config::AuthSettings,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::trip::CreateTripRequest,
    entity::{
        destinations::ActiveModel as DestinationActive,
        enums::Role,
        tourists::ActiveModel as TouristActive,
        users::ActiveModel as UserActive,
    },
    middleware::auth::AuthUser,
    state::AppState,
};
use uuid::Uuid;

/// Database URL for integration flows, or `None` to skip them.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE payments, trips, tourists, addresses, destinations, audit_logs, users CASCADE",
    ))
    .await?;

    let pool = create_pool(database_url).await?;
    Ok(AppState {
        pool,
        orm,
        auth: Arc::new(AuthSettings {
            jwt_secret: "integration-secret".into(),
            token_ttl_hours: 1,
        }),
    })
}

pub async fn create_user(state: &AppState, role: Role, email: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        role: Set(role),
        is_active: Set(true),
        first_name: Set("Test".into()),
        last_name: Set(role.as_str().into()),
        phone: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
        first_name: user.first_name,
        last_name: user.last_name,
    })
}

/// Creates an active tourist user with its profile; returns the caller identity and tourist id.
pub async fn create_tourist(state: &AppState, email: &str) -> anyhow::Result<(AuthUser, Uuid)> {
    let user = create_user(state, Role::Tourist, email).await?;
    let tourist = TouristActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        address_id: Set(None),
        membership_level: Set("bronze".into()),
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
    .insert(&state.orm)
    .await?;
    Ok((user, tourist.id))
}

pub async fn create_destination(state: &AppState, name: &str) -> anyhow::Result<Uuid> {
    let destination = DestinationActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        country: Set(Some("Indonesia".into())),
        city: Set(None),
        latitude: Set(None),
        longitude: Set(None),
        description: Set(None),
        image_url: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(destination.id)
}

/// A one-week trip starting thirty days from now.
pub fn trip_request(tourist_id: Uuid, destination_id: Uuid, total_price: i64) -> CreateTripRequest {
    let start = Utc::now() + Duration::days(30);
    CreateTripRequest {
        tourist_id,
        destination_id,
        start_date: start,
        end_date: start + Duration::days(7),
        participants: 2,
        total_price,
        notes: None,
        special_requests: None,
        status: None,
    }
}
