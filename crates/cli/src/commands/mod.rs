//! Command implementations.

pub mod inventory;
pub mod skus;
pub mod submit;

use print_bridge_server::config::{BridgeConfig, ConfigError};
use print_bridge_server::printify::PrintifyError;
use print_bridge_server::services::TranslateError;
use print_bridge_server::state::{AppState, StateError};
use thiserror::Error;

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client setup failed: {0}")]
    State(#[from] StateError),

    #[error("Printify error: {0}")]
    Printify(#[from] PrintifyError),

    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid order JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Order translation failed: {0}")]
    Translate(#[from] TranslateError),
}

/// Load configuration from the environment and build the shared state.
pub fn load_state() -> Result<AppState, CommandError> {
    let config = BridgeConfig::from_env()?;
    Ok(AppState::new(config)?)
}
