use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, DEFAULT_ALLOWED_HOST, DEFAULT_TARGET_TRAIN};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("BENGAWAN_ENV", "development"))?;

    let bind_addr = or_default("BENGAWAN_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BENGAWAN_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("BENGAWAN_LOG_LEVEL", "info");

    let frontend_origin = or_default("FRONTEND_ORIGIN", "http://localhost:5173")
        .trim()
        .to_string();
    if frontend_origin.is_empty() {
        return Err(invalid("FRONTEND_ORIGIN", "must not be empty".to_string()));
    }

    let target_train = or_default("BENGAWAN_TARGET_TRAIN", DEFAULT_TARGET_TRAIN)
        .trim()
        .to_uppercase();
    if target_train.is_empty() {
        return Err(invalid(
            "BENGAWAN_TARGET_TRAIN",
            "must not be empty".to_string(),
        ));
    }

    let allowed_host = or_default("BENGAWAN_ALLOWED_HOST", DEFAULT_ALLOWED_HOST)
        .trim()
        .to_string();
    if allowed_host.is_empty() {
        return Err(invalid(
            "BENGAWAN_ALLOWED_HOST",
            "must not be empty".to_string(),
        ));
    }

    let request_timeout_secs = or_default("BENGAWAN_REQUEST_TIMEOUT_SECS", "10")
        .parse::<u64>()
        .map_err(|e| invalid("BENGAWAN_REQUEST_TIMEOUT_SECS", e.to_string()))?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "BENGAWAN_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let card_pattern = lookup("BENGAWAN_CARD_PATTERN")
        .ok()
        .filter(|p| !p.trim().is_empty());

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        frontend_origin,
        target_train,
        allowed_host,
        request_timeout_secs,
        card_pattern,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BENGAWAN_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
