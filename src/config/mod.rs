//! Configuration management for toolwatch.
//!
//! Provides XDG-compliant settings file discovery plus environment
//! overrides for secrets and delivery credentials.

mod settings;

pub use settings::{
    Paths, Settings, ENV_BIND, ENV_CRON_SECRET, ENV_DELIVERY_RATE, ENV_EMAIL_API_KEY,
    ENV_EMAIL_FROM, ENV_EMAIL_SERVICE_URL, ENV_SCAN_LATENCY_MS,
};
