//! Recording fakes for the mail, profile and dispatch seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{test_config, Config};
use crate::error::{AppError, Result};
use crate::mail::{EmailDispatcher, MailError, MailTransport};
use crate::models::{EmailPayload, OutgoingEmail, Profile};
use crate::state::AppState;

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> std::result::Result<(), MailError> {
        if self.fail {
            return Err(MailError::Smtp("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Answers every lookup with the same profile, or fails every time
pub struct StaticProfiles {
    profile: Option<Profile>,
    lookups: AtomicUsize,
}

impl StaticProfiles {
    pub fn found(display_name: &str) -> Self {
        Self {
            profile: Some(Profile {
                display_name: Some(display_name.to_string()),
                email: None,
            }),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            profile: None,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl crate::profiles::ProfileStore for StaticProfiles {
    async fn fetch_profile(&self, _user_id: &str) -> Result<Profile> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.profile
            .clone()
            .ok_or_else(|| AppError::Upstream("profiles unavailable".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingDispatcher {
    dispatched: Mutex<Vec<EmailPayload>>,
    fail: bool,
}

impl RecordingDispatcher {
    pub fn failing() -> Self {
        Self {
            dispatched: Mutex::default(),
            fail: true,
        }
    }

    pub fn dispatched(&self) -> Vec<EmailPayload> {
        self.dispatched.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailDispatcher for RecordingDispatcher {
    async fn dispatch(&self, payload: EmailPayload) -> std::result::Result<(), MailError> {
        if self.fail {
            return Err(MailError::Invocation("500 Internal Server Error".to_string()));
        }
        self.dispatched.lock().unwrap().push(payload);
        Ok(())
    }
}

pub struct Fakes {
    pub mailer: Arc<RecordingMailer>,
    pub profiles: Arc<StaticProfiles>,
    pub dispatcher: Arc<RecordingDispatcher>,
}

impl Default for Fakes {
    fn default() -> Self {
        Self {
            mailer: Arc::new(RecordingMailer::default()),
            profiles: Arc::new(StaticProfiles::found("Alice")),
            dispatcher: Arc::new(RecordingDispatcher::default()),
        }
    }
}

impl Fakes {
    pub fn state(&self) -> AppState {
        self.state_with(test_config())
    }

    pub fn state_with(&self, config: Config) -> AppState {
        AppState::new(
            config,
            self.mailer.clone(),
            self.profiles.clone(),
            self.dispatcher.clone(),
        )
    }
}
