//! Source trait abstraction.
//!
//! Defines a common interface for everything that can produce candidate
//! tools, enabling polymorphism and deterministic fakes in tests.

use crate::error::ScanResult;
use crate::storage::Candidate;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for candidate sources.
///
/// A source returns whatever it currently sees; it does not know what is
/// already stored. Deduplication happens in the pipeline.
///
/// # Example
///
/// ```ignore
/// use toolwatch::scanner::{FixedSource, Source};
///
/// async fn count<S: Source>(source: &S) -> usize {
///     source.scan().await.map(|c| c.len()).unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait Source: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Collect the current candidate list.
    async fn scan(&self) -> ScanResult<Vec<Candidate>>;
}

/// A shared source for dynamic dispatch.
pub type SharedSource = Arc<dyn Source>;
