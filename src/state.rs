use std::sync::Arc;

use crate::auth::FunctionAuth;
use crate::config::Config;
use crate::mail::{EmailDispatcher, MailTransport};
use crate::profiles::ProfileStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<FunctionAuth>,
    pub mailer: Arc<dyn MailTransport>,
    pub profiles: Arc<dyn ProfileStore>,
    pub dispatcher: Arc<dyn EmailDispatcher>,
}

impl AppState {
    pub fn new(
        config: Config,
        mailer: Arc<dyn MailTransport>,
        profiles: Arc<dyn ProfileStore>,
        dispatcher: Arc<dyn EmailDispatcher>,
    ) -> Self {
        Self {
            auth: Arc::new(FunctionAuth::new(&config)),
            config: Arc::new(config),
            mailer,
            profiles,
            dispatcher,
        }
    }
}
