pub mod supabase;

pub use supabase::SupabaseProfiles;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Profile;

/// Read access to user profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch exactly one profile by id; a missing row is an error
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile>;
}
