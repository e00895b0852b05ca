//! Scanner module - coordinates candidate sources.
//!
//! This module provides the [`Source`] trait, the simulated and fixed
//! implementations, and [`SourceSet`], which fans a scan out across several
//! sources as tokio tasks bounded by a semaphore.

pub mod fixed;
pub mod keywords;
pub mod mock;
pub mod sources;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::storage::Candidate;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub use fixed::FixedSource;
pub use keywords::{is_ai_related, AI_KEYWORDS};
pub use mock::{mock_catalog, MockSource};
pub use sources::{find_source, KnownSource, KNOWN_SOURCES};
pub use traits::{SharedSource, Source};

/// Several sources scanned concurrently as one.
///
/// Candidates are concatenated in completion order. A failure from any
/// member fails the whole scan.
pub struct SourceSet {
    sources: Vec<SharedSource>,
    concurrency: usize,
}

impl SourceSet {
    /// Create an empty set with the given concurrency limit.
    pub fn new(concurrency: usize) -> Self {
        Self {
            sources: Vec::new(),
            concurrency: concurrency.max(1),
        }
    }

    /// Add a source.
    pub fn with_source(mut self, source: SharedSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Number of member sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait]
impl Source for SourceSet {
    fn name(&self) -> &str {
        "source-set"
    }

    async fn scan(&self) -> ScanResult<Vec<Candidate>> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for source in self.sources.iter().cloned() {
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let started = Instant::now();
                let result = source.scan().await;
                debug!(
                    source = source.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    ok = result.is_ok(),
                    "Source scan finished"
                );
                (source.name().to_string(), result)
            });
        }

        // Returning early drops the set, which aborts the remaining scans.
        let mut candidates = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (name, result) = joined.map_err(|e| ScanError::Task(e.to_string()))?;
            match result {
                Ok(found) => candidates.extend(found),
                Err(e) => {
                    warn!(source = %name, error = %e, "Source scan failed");
                    return Err(e);
                }
            }
        }

        Ok(candidates)
    }
}

/// Wrap a single source for sharing.
pub fn shared<S: Source + 'static>(source: S) -> SharedSource {
    Arc::new(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Records how many scans overlap.
    struct SlowSource {
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        url: String,
    }

    #[async_trait]
    impl Source for SlowSource {
        fn name(&self) -> &str {
            "slow"
        }

        async fn scan(&self) -> ScanResult<Vec<Candidate>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![candidate(&self.url)])
        }
    }

    fn candidate(url: &str) -> Candidate {
        Candidate::new("t", "d", url, "s")
    }

    #[tokio::test]
    async fn test_source_set_concatenates() {
        let set = SourceSet::new(2)
            .with_source(shared(FixedSource::new(vec![candidate("https://a.example")])))
            .with_source(shared(FixedSource::new(vec![
                candidate("https://b.example"),
                candidate("https://c.example"),
            ])));

        assert_eq!(set.len(), 2);
        let mut urls: Vec<_> = set.scan().await.unwrap().into_iter().map(|c| c.url).collect();
        urls.sort();
        assert_eq!(urls, ["https://a.example", "https://b.example", "https://c.example"]);
    }

    #[tokio::test]
    async fn test_source_set_fails_on_member_error() {
        let set = SourceSet::new(4)
            .with_source(shared(FixedSource::new(vec![candidate("https://a.example")])))
            .with_source(shared(FixedSource::failing("timeout").named("hn")));

        let err = set.scan().await.unwrap_err();
        assert!(matches!(err, ScanError::SourceFailed { ref name, .. } if name == "hn"));
    }

    #[tokio::test]
    async fn test_empty_source_set() {
        let set = SourceSet::new(0);
        assert!(set.is_empty());
        assert!(set.scan().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_set_respects_concurrency() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut set = SourceSet::new(2);
        for i in 0..5 {
            set = set.with_source(shared(SlowSource {
                in_flight: Arc::clone(&in_flight),
                peak: Arc::clone(&peak),
                url: format!("https://{i}.example"),
            }));
        }

        let found = set.scan().await.unwrap();
        assert_eq!(found.len(), 5);
        assert_eq!(peak.load(Ordering::SeqCst), 2);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }
}
