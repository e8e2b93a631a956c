use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use super::ProfileStore;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Profile;

/// PostgREST media type asking for a single object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// `profiles` table behind the Supabase REST API
#[derive(Clone)]
pub struct SupabaseProfiles {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseProfiles {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            service_key: service_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.supabase_url, &config.supabase_service_key)
    }
}

#[async_trait]
impl ProfileStore for SupabaseProfiles {
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile> {
        if self.base_url.is_empty() {
            return Err(AppError::Upstream("SUPABASE_URL is not configured".to_string()));
        }

        let res = self
            .client
            .get(format!("{}/rest/v1/profiles", self.base_url))
            .query(&[
                ("select", "display_name,email".to_string()),
                ("id", format!("eq.{}", user_id)),
            ])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "profile lookup failed ({}): {}",
                status, body
            )));
        }

        Ok(res.json::<Profile>().await?)
    }
}
