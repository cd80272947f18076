use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings shared by the server and the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// The single origin allowed by CORS.
    pub frontend_origin: String,
    /// Upper-cased name of the train being monitored.
    pub target_train: String,
    /// Substring a booking URL must contain to be checked.
    pub allowed_host: String,
    pub request_timeout_secs: u64,
    /// Replacement for the built-in listing-card boundary regex.
    pub card_pattern: Option<String>,
}
