use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    entity::{Users, enums::Role},
    error::AppError,
    state::AppState,
};

/// Identity of the caller, passed explicitly into every service call.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}

pub fn ensure_roles(user: &AuthUser, roles: &[Role]) -> Result<(), AppError> {
    if !roles.contains(&user.role) {
        return Err(AppError::Forbidden(
            "You do not have permission to access this resource".into(),
        ));
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_roles(user, &[Role::Admin])
}

/// Admins and employees.
pub fn ensure_staff(user: &AuthUser) -> Result<(), AppError> {
    ensure_roles(user, &[Role::Admin, Role::Employee])
}

pub fn ensure_tourist(user: &AuthUser) -> Result<(), AppError> {
    ensure_roles(user, &[Role::Tourist])
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AppError::Unauthorized("Token has expired".into()),
        _ => AppError::Unauthorized("Invalid token".into()),
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Access token is required".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Access token is required".into()))?;

        let claims = decode_token(token, &state.auth.jwt_secret)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token".into()))?;

        // Role and active flag come from the store, not the token.
        let user = Users::find_by_id(user_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

        if !user.is_active {
            return Err(AppError::Unauthorized("Account is not active".into()));
        }

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            email: "someone@example.com".into(),
            role,
            first_name: "Some".into(),
            last_name: "One".into(),
        }
    }

    #[test]
    fn staff_gate_admits_admin_and_employee() {
        assert!(ensure_staff(&user(Role::Admin)).is_ok());
        assert!(ensure_staff(&user(Role::Employee)).is_ok());
        assert!(matches!(
            ensure_staff(&user(Role::Tourist)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn admin_gate_rejects_employee() {
        assert!(ensure_admin(&user(Role::Employee)).is_err());
        assert!(ensure_tourist(&user(Role::Admin)).is_err());
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "someone@example.com".into(),
            role: Role::Tourist,
            first_name: "Some".into(),
            last_name: "One".into(),
            exp: 1_000,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        match decode_token(&token, "secret") {
            Err(AppError::Unauthorized(message)) => assert_eq!(message, "Token has expired"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "someone@example.com".into(),
            role: Role::Admin,
            first_name: "Some".into(),
            last_name: "One".into(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(matches!(
            decode_token(&token, "other"),
            Err(AppError::Unauthorized(_))
        ));
        assert_eq!(decode_token(&token, "secret").unwrap().role, Role::Admin);
    }
}
