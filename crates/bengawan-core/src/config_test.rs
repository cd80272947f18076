use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BENGAWAN_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.frontend_origin, "http://localhost:5173");
    assert_eq!(cfg.target_train, "BENGAWAN");
    assert_eq!(cfg.allowed_host, "booking.kai.id");
    assert_eq!(cfg.request_timeout_secs, 10);
    assert!(cfg.card_pattern.is_none());
}

#[test]
fn build_app_config_reads_frontend_origin() {
    let mut map = HashMap::new();
    map.insert("FRONTEND_ORIGIN", "https://bengawan.example.app");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.frontend_origin, "https://bengawan.example.app");
}

#[test]
fn build_app_config_upper_cases_target_train() {
    let mut map = HashMap::new();
    map.insert("BENGAWAN_TARGET_TRAIN", "  Jayakarta ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.target_train, "JAYAKARTA");
}

#[test]
fn build_app_config_rejects_blank_target_train() {
    let mut map = HashMap::new();
    map.insert("BENGAWAN_TARGET_TRAIN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BENGAWAN_TARGET_TRAIN"),
        "expected InvalidEnvVar(BENGAWAN_TARGET_TRAIN), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("BENGAWAN_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BENGAWAN_BIND_ADDR"),
        "expected InvalidEnvVar(BENGAWAN_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("BENGAWAN_REQUEST_TIMEOUT_SECS", "25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 25);
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("BENGAWAN_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BENGAWAN_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BENGAWAN_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("BENGAWAN_REQUEST_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_ignores_blank_card_pattern() {
    let mut map = HashMap::new();
    map.insert("BENGAWAN_CARD_PATTERN", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.card_pattern.is_none());
}

#[test]
fn build_app_config_keeps_card_pattern_override() {
    let mut map = HashMap::new();
    map.insert("BENGAWAN_CARD_PATTERN", r#"(?is)<article class="train">.*?</article>"#);
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.card_pattern.as_deref(),
        Some(r#"(?is)<article class="train">.*?</article>"#)
    );
}
