//! Deterministic source.

use super::traits::Source;
use crate::error::{ScanError, ScanResult};
use crate::storage::Candidate;
use async_trait::async_trait;

/// A source that always returns the same candidates, or always fails.
pub struct FixedSource {
    name: String,
    outcome: Result<Vec<Candidate>, String>,
}

impl FixedSource {
    /// A source returning `candidates` on every scan.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            name: "fixed".to_string(),
            outcome: Ok(candidates),
        }
    }

    /// A source whose every scan fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            name: "fixed".to_string(),
            outcome: Err(reason.into()),
        }
    }

    /// Set the name reported in logs and errors.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl Source for FixedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn scan(&self) -> ScanResult<Vec<Candidate>> {
        match &self.outcome {
            Ok(candidates) => Ok(candidates.clone()),
            Err(reason) => Err(ScanError::SourceFailed {
                name: self.name.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_source_repeats() {
        let source = FixedSource::new(vec![Candidate::new("a", "b", "https://a.example", "t")]);
        assert_eq!(source.scan().await.unwrap().len(), 1);
        assert_eq!(source.scan().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = FixedSource::failing("feed offline").named("hn");
        let err = source.scan().await.unwrap_err();
        assert_eq!(err.to_string(), "source 'hn' failed: feed offline");
    }
}
