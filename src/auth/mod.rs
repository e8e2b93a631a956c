use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::typed_header::TypedHeaderRejection;
use axum_extra::TypedHeader;
use subtle::ConstantTimeEq;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Shared-secret bearer check for the function endpoints.
///
/// With no `FUNCTION_SECRET` configured every caller is let through.
#[derive(Clone)]
pub struct FunctionAuth {
    secret: Option<String>,
}

impl FunctionAuth {
    pub fn new(config: &Config) -> Self {
        Self {
            secret: config.function_secret.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Compare a presented bearer token against the secret in constant time
    pub fn verify(&self, token: Option<&str>) -> Result<()> {
        let Some(secret) = &self.secret else {
            return Ok(());
        };

        match token {
            Some(token) if bool::from(token.as_bytes().ct_eq(secret.as_bytes())) => Ok(()),
            _ => Err(AppError::Unauthorized("Non autorisé".to_string())),
        }
    }
}

/// Middleware guarding the function routes
pub async fn require_function_secret(
    State(state): State<AppState>,
    bearer: std::result::Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer.as_ref().ok().map(|TypedHeader(auth)| auth.token());

    if let Err(err) = state.auth.verify(token) {
        tracing::warn!(path = %request.uri().path(), "Rejected call without valid function secret");
        return Err(err);
    }

    Ok(next.run(request).await)
}
