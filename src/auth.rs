//! Request-scoped identity and capability checks.
//!
//! Session issuance belongs to the external auth service; this module only
//! verifies its bearer tokens, loads the account row, and derives the
//! capability set from the account role. Handlers receive the identity as an
//! explicit extractor argument and call [`AuthUser::require`] before doing
//! privileged work.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

use crate::entities::{prelude::*, users};
use crate::models::user::ErrorResponse;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ManageEvents,
    ManageUsers,
    Donate,
}

pub fn role_permissions(role: &users::UserRole) -> &'static [Permission] {
    match role {
        users::UserRole::Admin => &[
            Permission::ManageEvents,
            Permission::ManageUsers,
            Permission::Donate,
        ],
        users::UserRole::User => &[Permission::Donate],
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i32,
    exp: usize,
}

/// The authenticated account behind the current request.
pub struct AuthUser {
    pub user: users::Model,
}

impl AuthUser {
    pub fn can(&self, permission: Permission) -> bool {
        role_permissions(&self.user.role).contains(&permission)
    }

    /// Capability guard invoked at the top of every protected handler.
    pub fn require(
        &self,
        permission: Permission,
    ) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
        if self.can(permission) {
            Ok(())
        } else {
            Err((
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: "Insufficient permissions".to_string(),
                }),
            ))
        }
    }
}

/// Mint a bearer token for an account. Real issuance lives in the external
/// auth service; this mirrors its claim layout for the seed binary and tests.
pub fn issue_token(user_id: i32, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = Utc::now() + Duration::days(1);
    let claims = Claims {
        sub: user_id,
        exp: expiration.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Missing auth token".to_string(),
                }),
            )
        })?;

        let token_data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(state.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid auth token".to_string(),
                }),
            )
        })?;

        let user = Users::find_by_id(token_data.claims.sub)
            .one(&state.db)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Database error: {}", e),
                    }),
                )
            })?
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Unknown user".to_string(),
                    }),
                )
            })?;

        Ok(AuthUser { user })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}
