use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::error::Result;
use crate::models::{EmailPayload, RelayResponse};
use crate::state::AppState;

/// POST /functions/v1/send-email - Relay one HTML email over SMTP
pub async fn send_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EmailPayload>, JsonRejection>,
) -> Result<Json<RelayResponse>> {
    let Json(payload) = payload?;
    let email = payload.validate(&state.config.email_from)?;

    if let Err(e) = state.mailer.send(&email).await {
        tracing::error!(error = %e, to = %email.to, "Failed to send email");
        return Err(e.into());
    }

    tracing::info!(to = %email.to, subject = %email.subject, "Email sent");

    Ok(Json(RelayResponse::ok(format!("Email envoyé à {}", email.to))))
}
