//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LOANTRACK_API_URL` - Base URL of the loan-tracking API
//!   (e.g., `https://loans.example.com`)
//!
//! ## Optional
//! - `LOANTRACK_SESSION_FILE` - Path of the persisted session file
//!   (default: `<user config dir>/loantrack/session.json`)
//! - `LOANTRACK_TIMEOUT_SECS` - HTTP request timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API, without the `/api/v1` prefix and without a
    /// trailing slash.
    pub api_url: String,
    /// Where the session file lives.
    pub session_file: PathBuf,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `LOANTRACK_API_URL` is missing or not a
    /// valid absolute URL, or if `LOANTRACK_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("LOANTRACK_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("LOANTRACK_API_URL".to_string()))?;

        // Validate early so the first request doesn't fail with a confusing
        // transport error.
        let parsed = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("LOANTRACK_API_URL".to_string(), e.to_string())
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "LOANTRACK_API_URL".to_string(),
                format!("unsupported scheme: {}", parsed.scheme()),
            ));
        }

        let session_file = match std::env::var("LOANTRACK_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::default_session_file(),
        };

        let timeout = match std::env::var("LOANTRACK_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "LOANTRACK_TIMEOUT_SECS".to_string(),
                        format!("not a number: {raw}"),
                    )
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            session_file,
            timeout,
        })
    }

    /// Default location of the session file.
    ///
    /// Falls back to the current directory when the platform has no
    /// config directory.
    #[must_use]
    pub fn default_session_file() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("loantrack")
            .join("session.json")
    }
}

#[cfg(test)]
#[allow(unsafe_code)] // env::set_var is unsafe in edition 2024
mod tests {
    use super::*;

    // Env-var tests mutate process state, so each one uses distinct
    // variable values and runs against the same three variables; they are
    // serialized by a mutex to avoid interleaving.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn clear_env() {
        unsafe {
            std::env::remove_var("LOANTRACK_API_URL");
            std::env::remove_var("LOANTRACK_SESSION_FILE");
            std::env::remove_var("LOANTRACK_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_missing_api_url() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();
        let err = Config::from_env().expect_err("should fail");
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_full_config() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();
        unsafe {
            std::env::set_var("LOANTRACK_API_URL", "https://loans.example.com/");
            std::env::set_var("LOANTRACK_SESSION_FILE", "/tmp/loantrack-test/session.json");
            std::env::set_var("LOANTRACK_TIMEOUT_SECS", "5");
        }
        let config = Config::from_env().expect("valid config");
        assert_eq!(config.api_url, "https://loans.example.com");
        assert_eq!(
            config.session_file,
            PathBuf::from("/tmp/loantrack-test/session.json")
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
        clear_env();
    }

    #[test]
    fn test_invalid_url_rejected() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();
        unsafe {
            std::env::set_var("LOANTRACK_API_URL", "not a url");
        }
        let err = Config::from_env().expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
        clear_env();
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();
        unsafe {
            std::env::set_var("LOANTRACK_API_URL", "http://localhost:8000");
            std::env::set_var("LOANTRACK_TIMEOUT_SECS", "soon");
        }
        let err = Config::from_env().expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
        clear_env();
    }
}
