pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod profiles;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
