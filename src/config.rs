//! Application configuration loaded from environment variables.
//!
//! The JWT signing secret is required: without it the credential issuer and
//! verifier cannot operate, so startup fails instead of serving traffic.

use std::env;

/// Seconds per day, for the TTL defaults below.
const DAY_SECS: u64 = 24 * 60 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL, used as the allowed CORS origin
    pub frontend_url: String,
    /// Redis connection URL (sessions, streaks, leaderboard)
    pub redis_url: String,
    /// JWT signing key for session credentials (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// Credential lifetime in seconds (default 7 days)
    pub token_ttl_secs: u64,
    /// Session record time-to-live in seconds (default 24 hours)
    pub session_ttl_secs: u64,
    /// Streak record time-to-live in seconds (default 30 days)
    pub streak_ttl_secs: u64,
    /// Points awarded when a streak extends to a new day
    pub streak_bonus_points: i64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 5000,
            frontend_url: "http://localhost:5173".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            jwt_secret: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            token_ttl_secs: 7 * DAY_SECS,
            session_ttl_secs: DAY_SECS,
            streak_ttl_secs: 30 * DAY_SECS,
            streak_bonus_points: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_secret = env::var("JWT_SECRET")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            jwt_secret: jwt_secret.into_bytes(),
            token_ttl_secs: env_secs("TOKEN_TTL_SECS", 7 * DAY_SECS),
            session_ttl_secs: env_secs("SESSION_TTL_SECS", DAY_SECS),
            streak_ttl_secs: env_secs("STREAK_TTL_SECS", 30 * DAY_SECS),
            streak_bonus_points: env::var("STREAK_BONUS_POINTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

fn env_secs(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so both cases run in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SECRET", "   ");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        env::set_var("JWT_SECRET", "test_jwt_key_32_bytes_minimum!!!");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 5000);
        assert_eq!(config.token_ttl_secs, 7 * DAY_SECS);
        assert_eq!(config.session_ttl_secs, DAY_SECS);
        assert_eq!(config.streak_bonus_points, 10);
    }
}
