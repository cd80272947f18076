mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

/// Train monitored when `BENGAWAN_TARGET_TRAIN` is not set.
pub const DEFAULT_TARGET_TRAIN: &str = "BENGAWAN";

/// Only booking URLs containing this host are accepted by default.
pub const DEFAULT_ALLOWED_HOST: &str = "booking.kai.id";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
