//! Subscriber notification cadence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a subscriber wants to hear about new tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// As soon as a scan finds something new.
    #[default]
    #[serde(alias = "realtime")]
    #[value(alias = "realtime")]
    Immediate,
    /// Once a day, at the digest hour.
    Daily,
    /// Once a week, on Monday at the digest hour.
    Weekly,
}

impl Frequency {
    /// All frequencies in cadence order.
    pub const ALL: [Frequency; 3] = [Self::Immediate, Self::Daily, Self::Weekly];

    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = FrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "immediate" | "realtime" => Ok(Self::Immediate),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(FrequencyError::Unknown(s.to_string())),
        }
    }
}

/// Error type for frequency parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FrequencyError {
    #[error("unknown frequency: {0}")]
    Unknown(String),
}
