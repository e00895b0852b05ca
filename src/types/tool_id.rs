//! Unique identifiers for discovered tools.
//!
//! `ToolId` is assigned by the store when a candidate is first inserted and
//! never changes afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a stored tool record.
///
/// Uses UUID v4 internally, so identifiers are non-empty and unique for
/// the lifetime of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolId(Uuid);

impl ToolId {
    /// Generate a new random tool ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get a short representation (first 8 characters).
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for ToolId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToolId {
    type Err = ToolIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|_| ToolIdError::InvalidFormat(s.to_string()))?;
        Ok(Self(uuid))
    }
}

/// Error type for ToolId parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToolIdError {
    #[error("invalid tool ID format: {0}")]
    InvalidFormat(String),
}
