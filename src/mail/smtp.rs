use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, MailTransport};
use crate::config::{Config, SmtpTls};
use crate::models::OutgoingEmail;

/// SMTP delivery through lettre.
///
/// A transport is built for every message and dropped when `send`
/// returns, so each email gets its own connection.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    tls: SmtpTls,
    credentials: Option<Credentials>,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Self {
        let credentials = config.smtp_username.as_ref().map(|user| {
            Credentials::new(
                user.clone(),
                config.smtp_password.clone().unwrap_or_default(),
            )
        });

        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            tls: config.smtp_tls,
            credentials,
        }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let builder = match self.tls {
            SmtpTls::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
                .map_err(|e| MailError::Smtp(format!("Failed to create SMTP relay: {}", e)))?,
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
                .map_err(|e| MailError::Smtp(format!("Failed to create SMTP relay: {}", e)))?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host),
        };

        let builder = builder.port(self.port);
        let builder = match &self.credentials {
            Some(creds) => builder.credentials(creds.clone()),
            None => builder,
        };

        Ok(builder.build())
    }
}

/// Build the MIME message for an outgoing email
pub fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("{}: {}", email.from, e)))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("{}: {}", email.to, e)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;
        let transport = self.transport()?;

        tracing::debug!(host = %self.host, port = self.port, to = %email.to, "Opening SMTP session");

        let response = transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        tracing::info!(to = %email.to, code = %response.code(), "Email accepted by SMTP server");

        Ok(())
    }
}
