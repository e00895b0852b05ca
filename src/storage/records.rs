//! Stored record types.

use crate::types::{EmailAddress, Frequency, ToolId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tool listing produced by a source, before it has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Canonical URL; the deduplication key once stored.
    pub url: String,
    /// Which source produced it.
    pub source: String,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            source: source.into(),
        }
    }
}

/// A stored tool record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Identifier assigned at insertion.
    pub id: ToolId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Canonical URL, unique across the store.
    pub url: String,
    /// Which source produced it.
    pub source: String,
    /// When the store accepted it.
    pub found_at: DateTime<Utc>,
}

impl Tool {
    /// Stamp a candidate with an identifier and discovery time.
    pub fn from_candidate(candidate: Candidate, found_at: DateTime<Utc>) -> Self {
        Self {
            id: ToolId::new(),
            name: candidate.name,
            description: candidate.description,
            url: candidate.url,
            source: candidate.source,
            found_at,
        }
    }
}

/// A digest subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    /// Unique address.
    pub email: EmailAddress,
    /// Preferred cadence.
    pub frequency: Frequency,
    /// When the subscription was accepted.
    pub subscribed_at: DateTime<Utc>,
}
