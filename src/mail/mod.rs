pub mod dispatch;
pub mod smtp;
pub mod templates;

pub use dispatch::{EmailDispatcher, FunctionInvoker, InProcessDispatcher};
pub use smtp::SmtpMailer;

use async_trait::async_trait;

use crate::models::OutgoingEmail;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("send-email invocation failed: {0}")]
    Invocation(String),
}

/// Something that can deliver one message
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
