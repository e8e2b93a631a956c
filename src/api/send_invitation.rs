use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::error::{AppError, Result};
use crate::mail::templates::{invitation_url, render_invitation};
use crate::models::{EmailPayload, Invitation, Profile, RelayResponse};
use crate::state::AppState;

/// POST /functions/v1/send-invitation-email - Email a team invitation
///
/// A failed inviter lookup only degrades the greeting; a failed delivery
/// fails the request.
pub async fn send_invitation_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Invitation>, JsonRejection>,
) -> Result<Json<RelayResponse>> {
    let Json(invitation) = payload?;
    let invitation = invitation.validate()?;

    let profile = match state.profiles.fetch_profile(&invitation.invited_by).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(
                error = %e,
                invited_by = %invitation.invited_by,
                "Failed to fetch inviter profile"
            );
            Profile::default()
        }
    };
    let inviter_name = profile.inviter_name();

    let url = invitation_url(&state.config.app_url, &invitation.token, &invitation.team_id);
    let rendered = render_invitation(&invitation, &inviter_name, &url);

    state
        .dispatcher
        .dispatch(EmailPayload::new(
            &invitation.email,
            rendered.subject,
            rendered.html,
        ))
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                invitation_id = ?invitation.id,
                to = %invitation.email,
                "Failed to deliver invitation email"
            );
            AppError::Delivery(e.to_string())
        })?;

    tracing::info!(
        invitation_id = ?invitation.id,
        team_id = %invitation.team_id,
        to = %invitation.email,
        "Invitation email sent"
    );

    Ok(Json(RelayResponse::ok(format!(
        "Email d'invitation envoyé à {}",
        invitation.email
    ))))
}
