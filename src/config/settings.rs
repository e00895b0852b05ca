//! Application settings and paths.
//!
//! Settings are layered: built-in defaults, then an optional JSON settings
//! file, then environment variables. CLI flags are applied last by the
//! subcommands themselves.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Shared secret the scheduled trigger must present as a bearer token.
pub const ENV_CRON_SECRET: &str = "CRON_SECRET";
/// Outbound email delivery endpoint.
pub const ENV_EMAIL_SERVICE_URL: &str = "EMAIL_SERVICE_URL";
/// Bearer credential for the delivery endpoint.
pub const ENV_EMAIL_API_KEY: &str = "EMAIL_API_KEY";
/// Sender address for outgoing digests.
pub const ENV_EMAIL_FROM: &str = "EMAIL_FROM";
/// Listen address for the HTTP server.
pub const ENV_BIND: &str = "TOOLWATCH_BIND";
/// Simulated scan latency in milliseconds.
pub const ENV_SCAN_LATENCY_MS: &str = "TOOLWATCH_SCAN_LATENCY_MS";
/// Delivery pacing in messages per second.
pub const ENV_DELIVERY_RATE: &str = "TOOLWATCH_DELIVERY_RATE";

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/toolwatch)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "toolwatch", "toolwatch")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Bearer secret for the scheduled trigger; `None` disables the check.
    pub cron_secret: Option<String>,
    /// Email delivery endpoint URL.
    pub email_service_url: Option<String>,
    /// Email delivery API key.
    pub email_api_key: Option<String>,
    /// Sender address.
    pub email_from: String,
    /// Timeout for one delivery request in milliseconds.
    pub email_timeout_ms: u64,
    /// Maximum deliveries per second, 0 for unlimited.
    pub delivery_rate: u32,
    /// Simulated source latency in milliseconds.
    pub scan_latency_ms: u64,
    /// Maximum sources scanned at once.
    pub source_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            cron_secret: None,
            email_service_url: None,
            email_api_key: None,
            email_from: "noreply@aitracker.com".to_string(),
            email_timeout_ms: 10_000,
            delivery_rate: 0,
            scan_latency_ms: 1000,
            source_concurrency: 4,
        }
    }
}

impl Settings {
    /// Load settings from an explicit file or the default location, then
    /// apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut settings = match explicit {
            Some(path) => Self::load_from(path)?,
            None => {
                let file = Paths::new()?.settings_file();
                if file.exists() {
                    Self::load_from(&file)?
                } else {
                    debug!(path = %file.display(), "No settings file, using defaults");
                    Self::default()
                }
            }
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Overlay values from an environment lookup. Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(secret) = get(ENV_CRON_SECRET) {
            self.cron_secret = Some(secret);
        }
        if let Some(url) = get(ENV_EMAIL_SERVICE_URL) {
            self.email_service_url = Some(url);
        }
        if let Some(key) = get(ENV_EMAIL_API_KEY) {
            self.email_api_key = Some(key);
        }
        if let Some(from) = get(ENV_EMAIL_FROM) {
            self.email_from = from;
        }
        if let Some(bind) = get(ENV_BIND) {
            self.bind_address = bind;
        }
        if let Some(latency) = get(ENV_SCAN_LATENCY_MS) {
            self.scan_latency_ms = parse_value(ENV_SCAN_LATENCY_MS, &latency)?;
        }
        if let Some(rate) = get(ENV_DELIVERY_RATE) {
            self.delivery_rate = parse_value(ENV_DELIVERY_RATE, &rate)?;
        }

        Ok(())
    }

    /// Endpoint and key, when both are present.
    pub fn email_credentials(&self) -> Option<(&str, &str)> {
        self.email_service_url
            .as_deref()
            .zip(self.email_api_key.as_deref())
    }

    /// Whether real email delivery is configured (endpoint and key present).
    pub fn email_delivery_configured(&self) -> bool {
        self.email_credentials().is_some()
    }

    /// Simulated source latency.
    pub fn scan_latency(&self) -> Duration {
        Duration::from_millis(self.scan_latency_ms)
    }

    /// Timeout for a single delivery request.
    pub fn email_timeout(&self) -> Duration {
        Duration::from_millis(self.email_timeout_ms)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.bind_address, "0.0.0.0:3000");
        assert_eq!(settings.email_from, "noreply@aitracker.com");
        assert!(settings.cron_secret.is_none());
        assert!(!settings.email_delivery_configured());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_env(env(&[
                (ENV_CRON_SECRET, "s3cret"),
                (ENV_EMAIL_SERVICE_URL, "https://mail.example/send"),
                (ENV_EMAIL_API_KEY, "key"),
                (ENV_SCAN_LATENCY_MS, "0"),
            ]))
            .unwrap();

        assert_eq!(settings.cron_secret.as_deref(), Some("s3cret"));
        assert!(settings.email_delivery_configured());
        assert_eq!(settings.scan_latency(), Duration::ZERO);
    }

    #[test]
    fn test_empty_env_values_are_unset() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[(ENV_CRON_SECRET, "  ")])).unwrap();
        assert!(settings.cron_secret.is_none());
    }

    #[test]
    fn test_invalid_env_value() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env(env(&[(ENV_DELIVERY_RATE, "fast")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"bind_address": "127.0.0.1:8080", "delivery_rate": 5}}"#).unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.delivery_rate, 5);
        assert_eq!(settings.scan_latency_ms, 1000);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::InvalidFormat(_))
        ));
    }
}
