use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use super::{MailError, MailTransport};
use crate::models::EmailPayload;

/// Hands a message over to the email relay
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn dispatch(&self, payload: EmailPayload) -> Result<(), MailError>;
}

/// Calls the deployed `send-email` function over HTTP
#[derive(Clone)]
pub struct FunctionInvoker {
    client: Client,
    url: String,
    service_key: String,
}

impl FunctionInvoker {
    pub fn new(url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            service_key: service_key.into(),
        }
    }
}

#[async_trait]
impl EmailDispatcher for FunctionInvoker {
    async fn dispatch(&self, payload: EmailPayload) -> Result<(), MailError> {
        let res = self
            .client
            .post(&self.url)
            .bearer_auth(&self.service_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Invocation(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(MailError::Invocation(format!("{}: {}", status, body)));
        }

        Ok(())
    }
}

/// Sends through the local transport, same path as the `send-email` route
#[derive(Clone)]
pub struct InProcessDispatcher {
    transport: Arc<dyn MailTransport>,
    default_from: String,
}

impl InProcessDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, default_from: impl Into<String>) -> Self {
        Self {
            transport,
            default_from: default_from.into(),
        }
    }
}

#[async_trait]
impl EmailDispatcher for InProcessDispatcher {
    async fn dispatch(&self, payload: EmailPayload) -> Result<(), MailError> {
        let email = payload
            .validate(&self.default_from)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(&email).await
    }
}
