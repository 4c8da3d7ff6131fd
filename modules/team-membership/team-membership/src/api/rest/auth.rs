//! Bearer token authentication and role gating.
//!
//! `authenticate` validates the HS256 token on every request and stores the
//! resulting [`Caller`] in the request extensions. Handlers extract it with
//! [`AuthCaller`] and gate on roles with [`AuthCaller::require`].

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use team_membership_sdk::{Caller, Role};
use thiserror::Error;

use super::problem::Problem;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required: missing or invalid token")]
    Unauthenticated,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Forbidden: role {role} may not perform this operation")]
    Forbidden { role: Role },
}

impl From<AuthError> for Problem {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthenticated | AuthError::InvalidToken(_) => Problem::from_code(
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Unauthorized",
                e.to_string(),
            ),
            AuthError::Forbidden { .. } => Problem::from_code(
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Forbidden",
                e.to_string(),
            ),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Problem::from(self).into_response()
    }
}

/// Token payload issued by the account service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Credential id.
    pub id: i32,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_status: Option<String>,
    pub exp: u64,
}

/// Validates bearer tokens signed with a shared HS256 secret.
#[derive(Clone)]
pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    #[must_use]
    pub fn hs256(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decode and verify a raw token.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidToken` on a bad signature, an expired token
    /// or an unknown role.
    pub fn validate(&self, token: &str) -> Result<Caller, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let role = Role::parse(&data.claims.role)
            .ok_or_else(|| AuthError::InvalidToken(format!("unknown role {}", data.claims.role)))?;
        Ok(Caller::new(data.claims.id, role))
    }

    fn validate_header(&self, parts: &Parts) -> Result<Caller, AuthError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::Unauthenticated)?
            .to_str()
            .map_err(|_| AuthError::Unauthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Unauthenticated)?;

        self.validate(token)
    }
}

/// Middleware: authenticate the request or answer 401.
pub async fn authenticate(
    State(validator): State<Arc<JwtValidator>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    match validator.validate_header(&parts) {
        Ok(caller) => {
            tracing::debug!(credential_id = caller.credential_id, role = %caller.role, "Authenticated");
            parts.extensions.insert(caller);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected unauthenticated request");
            e.into_response()
        }
    }
}

/// Extractor for the authenticated caller; requires `authenticate` to have run.
#[derive(Debug, Clone, Copy)]
pub struct AuthCaller(pub Caller);

impl AuthCaller {
    /// Fail with 403 unless the caller holds one of `roles`.
    ///
    /// # Errors
    /// Returns `AuthError::Forbidden` for any other role.
    pub fn require(self, roles: &[Role]) -> Result<Caller, AuthError> {
        if roles.contains(&self.0.role) {
            Ok(self.0)
        } else {
            Err(AuthError::Forbidden { role: self.0.role })
        }
    }
}

impl<S> FromRequestParts<S> for AuthCaller
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Caller>()
            .copied()
            .map(AuthCaller)
            .ok_or(AuthError::Unauthenticated)
    }
}
