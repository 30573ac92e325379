use pagelock_core::settings::LockSettings;

use crate::auth::jwt::JwtConfig;

/// Default feature toggles when `LOCK_TOGGLES` is unset.
const DEFAULT_LOCK_TOGGLES: &str = "longclick,locknote";

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Module-wide lock settings (toggles, allow-list, render-when-locked).
    pub locks: LockSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `LOCK_TOGGLES`           | `longclick,locknote`       |
    /// | `LOCK_USERS`             | empty                      |
    /// | `LOCK_RENDER_INPUTS_FOR` | empty                      |
    ///
    /// # Panics
    ///
    /// Panics on malformed values; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let locks = LockSettings::parse(
            &std::env::var("LOCK_TOGGLES").unwrap_or_else(|_| DEFAULT_LOCK_TOGGLES.into()),
            &std::env::var("LOCK_USERS").unwrap_or_default(),
            &std::env::var("LOCK_RENDER_INPUTS_FOR").unwrap_or_default(),
        )
        .unwrap_or_else(|e| panic!("Invalid lock settings: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            locks,
        }
    }
}
