//! Fixed-format invitation email.

use crate::models::ValidInvitation;

/// Days mentioned in the invitation text. Not enforced here.
pub const INVITATION_VALIDITY_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// `<app_url>/invitation?token=<token>&team=<team_id>`
pub fn invitation_url(app_url: &str, token: &str, team_id: &str) -> String {
    format!("{}/invitation?token={}&team={}", app_url, token, team_id)
}

pub fn render_invitation(invitation: &ValidInvitation, inviter_name: &str, url: &str) -> RenderedEmail {
    let team = escape_html(&invitation.team_name);
    let inviter = escape_html(inviter_name);
    let href = escape_html(url);

    let subject = format!("Invitation à rejoindre l'équipe {}", invitation.team_name);
    let html = format!(
        r#"
    <h2>Vous avez été invité à rejoindre l'équipe {team}</h2>
    <p>{inviter} vous a invité à rejoindre leur équipe sur l'application WebXIO.</p>
    <p>Pour accepter cette invitation, veuillez cliquer sur le lien ci-dessous :</p>
    <p><a href="{href}">Accepter l'invitation</a></p>
    <p>Ce lien expirera dans {days} jours.</p>
    <p>Si vous n'avez pas demandé cette invitation, vous pouvez ignorer cet email.</p>
    "#,
        days = INVITATION_VALIDITY_DAYS,
    );

    RenderedEmail { subject, html }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
