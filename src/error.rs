use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::mail::MailError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Direct SMTP delivery failed
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Delegated delivery (invitation -> email relay) failed
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Profile store or other upstream service failed
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Mail(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Erreur du serveur: {}", err),
            ),
            // Delivery details stay in the logs
            AppError::Delivery(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erreur lors de l'envoi de l'email".to_string(),
            ),
            AppError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erreur du serveur".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Corps JSON invalide: {}", rejection.body_text()))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
