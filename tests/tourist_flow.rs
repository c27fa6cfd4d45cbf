mod common;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tourism_agency_api::{
    dto::{
        auth::{CreateTouristRequest, LoginRequest, RegisterRequest},
        destination::{CreateDestinationRequest, UpdateDestinationRequest},
        tourist::{AddressInput, UpdateTouristRequest},
    },
    entity::{Addresses, AuditLogs, Tourists, Users, audit_logs, enums::Role},
    error::AppError,
    middleware::auth::decode_token,
    routes::params::Pagination,
    services::{auth_service, destination_service, tourist_service},
};

use common::{create_user, database_url, setup_state};

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.into(),
        password: "s3cret-pass".into(),
        confirm_password: "s3cret-pass".into(),
        first_name: "Made".into(),
        last_name: "Putra".into(),
        phone: None,
    }
}

// Signup, approval, login, profile edits, staff registration, catalog writes and deletion.
#[tokio::test]
async fn tourist_accounts_and_catalog() -> anyhow::Result<()> {
    let Some(database_url) = database_url() else {
        return Ok(());
    };
    let state = setup_state(&database_url).await?;

    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    let employee = create_user(&state, Role::Employee, "desk@example.com").await?;

    // Self-service signup stays inactive until approved.
    let registered = auth_service::register_tourist(&state, register_request("made@example.com"))
        .await?
        .data
        .unwrap();
    assert!(!registered.is_active);
    assert_eq!(registered.role, Role::Tourist);

    let err = auth_service::register_tourist(&state, register_request("made@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
    assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);

    let login = LoginRequest {
        email: "made@example.com".into(),
        password: "s3cret-pass".into(),
    };
    let err = auth_service::login_user(
        &state,
        LoginRequest {
            email: login.email.clone(),
            password: login.password.clone(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(ref msg) if msg == "User is not active"));

    auth_service::approve_tourist(&state, &employee, registered.id).await?;
    let err = auth_service::approve_tourist(&state, &employee, employee.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    let session = auth_service::login_user(&state, login).await?.data.unwrap();
    let claims = decode_token(&session.token, &state.auth.jwt_secret)?;
    assert_eq!(claims.sub, registered.id.to_string());
    assert_eq!(claims.role, Role::Tourist);

    let err = auth_service::login_user(
        &state,
        LoginRequest {
            email: "made@example.com".into(),
            password: "wrong-pass".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(ref msg) if msg == "Invalid email or password"));

    // Only admins register employees.
    let err = auth_service::register_employee(&state, &employee, register_request("new@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)), "got {err:?}");
    let hired = auth_service::register_employee(&state, &admin, register_request("new@example.com"))
        .await?
        .data
        .unwrap();
    assert_eq!(hired.role, Role::Employee);
    assert!(hired.is_active);

    // Profile edits create the address once, then update it in place.
    let made = tourism_agency_api::middleware::auth::AuthUser {
        user_id: registered.id,
        email: registered.email.clone(),
        role: Role::Tourist,
        first_name: registered.first_name.clone(),
        last_name: registered.last_name.clone(),
    };
    let profile = tourist_service::update_profile(
        &state,
        &made,
        UpdateTouristRequest {
            phone: Some("+62 811 000".into()),
            nationality: Some("ID".into()),
            is_active: Some(false),
            address: Some(AddressInput {
                city: Some("Denpasar".into()),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    let address_id = profile.address.as_ref().map(|a| a.id).unwrap();
    assert_eq!(profile.nationality.as_deref(), Some("ID"));
    // Owners cannot deactivate themselves.
    assert!(profile.user.as_ref().unwrap().is_active);

    let profile = tourist_service::update_by_employee(
        &state,
        &employee,
        profile.id,
        UpdateTouristRequest {
            address: Some(AddressInput {
                street: Some("Jl. Raya Ubud 1".into()),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    let address = profile.address.unwrap();
    assert_eq!(address.id, address_id);
    assert_eq!(address.city.as_deref(), Some("Denpasar"));
    assert_eq!(address.street.as_deref(), Some("Jl. Raya Ubud 1"));

    // Staff-assisted signup is active at once and may carry an address.
    let assisted = auth_service::register_tourist_by_employee(
        &state,
        &employee,
        CreateTouristRequest {
            email: "walkin@example.com".into(),
            password: "walkin-pass".into(),
            confirm_password: "walkin-pass".into(),
            first_name: "Walk".into(),
            last_name: "In".into(),
            phone: None,
            date_of_birth: None,
            nationality: None,
            identity_number: None,
            emergency_contact: None,
            address: Some(AddressInput {
                country: Some("Indonesia".into()),
                ..Default::default()
            }),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(assisted.user.is_active);

    let listed = tourist_service::list_tourists(&state, &employee, Pagination::new(1, 10)).await?;
    assert_eq!(listed.pagination.unwrap().total, 2);

    // Deleting a tourist removes the user, the profile and the address.
    let walkin = Tourists::find_by_id(assisted.tourist_id)
        .one(&state.orm)
        .await?
        .unwrap();
    tourist_service::delete_tourist(&state, &employee, assisted.tourist_id).await?;
    assert!(Tourists::find_by_id(assisted.tourist_id).one(&state.orm).await?.is_none());
    assert!(Users::find_by_id(walkin.user_id).one(&state.orm).await?.is_none());
    assert!(Addresses::find_by_id(walkin.address_id.unwrap()).one(&state.orm).await?.is_none());

    let err = tourist_service::get_tourist(&state, &employee, assisted.tourist_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    // Catalog writes are admin only; reads are open.
    let err = destination_service::create_destination(
        &state,
        &employee,
        CreateDestinationRequest {
            name: "Kyoto".into(),
            country: Some("Japan".into()),
            city: None,
            latitude: None,
            longitude: None,
            description: None,
            image_url: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)), "got {err:?}");

    let kyoto = destination_service::create_destination(
        &state,
        &admin,
        CreateDestinationRequest {
            name: "Kyoto".into(),
            country: Some("Japan".into()),
            city: Some("Kyoto".into()),
            latitude: Some(35.0116),
            longitude: Some(135.7681),
            description: None,
            image_url: None,
        },
    )
    .await?
    .data
    .unwrap();

    let renamed = destination_service::update_destination(
        &state,
        &admin,
        kyoto.id,
        UpdateDestinationRequest {
            description: Some("Temples and gardens".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(renamed.name, "Kyoto");
    assert_eq!(renamed.description.as_deref(), Some("Temples and gardens"));

    let page = destination_service::list_destinations(&state, Pagination::default()).await?;
    assert_eq!(page.data.unwrap().len(), 1);

    destination_service::delete_destination(&state, &admin, kyoto.id).await?;
    let err = destination_service::get_destination(&state, kyoto.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    // Catalog deletions are audited.
    let deletions = AuditLogs::find()
        .filter(audit_logs::Column::Action.eq("destination_delete"))
        .count(&state.orm)
        .await?;
    assert_eq!(deletions, 1);

    Ok(())
}
