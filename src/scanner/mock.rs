//! Simulated source.
//!
//! Emulates a slow, partial upstream: waits for a configurable latency, then
//! returns a random subset of a fixed catalog in random order.

use super::traits::Source;
use crate::error::ScanResult;
use crate::storage::Candidate;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Smallest subset a scan returns.
const MIN_PICK: usize = 2;
/// Largest subset a scan returns.
const MAX_PICK: usize = 5;

/// The catalog the simulated source draws from.
pub fn mock_catalog() -> Vec<Candidate> {
    vec![
        Candidate::new(
            "AI Code Assistant Pro",
            "Advanced AI-powered code completion and generation tool for developers",
            "https://example.com/ai-code-assistant",
            "Product Hunt",
        ),
        Candidate::new(
            "SmartChat AI",
            "Next-generation conversational AI platform for customer support",
            "https://example.com/smartchat",
            "Hacker News",
        ),
        Candidate::new(
            "ImageGen Studio",
            "Create stunning AI-generated images and artwork in seconds",
            "https://example.com/imagegen",
            "Product Hunt",
        ),
        Candidate::new(
            "DataInsight AI",
            "Automated data analysis and visualization powered by machine learning",
            "https://example.com/datainsight",
            "There's An AI For That",
        ),
        Candidate::new(
            "VoiceClone AI",
            "Clone any voice with just 30 seconds of audio",
            "https://example.com/voiceclone",
            "Product Hunt",
        ),
        Candidate::new(
            "AutoWriter AI",
            "AI writing assistant that helps create blog posts, articles, and content",
            "https://example.com/autowriter",
            "Hacker News",
        ),
    ]
}

/// A source returning a random slice of [`mock_catalog`].
pub struct MockSource {
    catalog: Vec<Candidate>,
    latency: Duration,
    rng: Mutex<StdRng>,
}

impl MockSource {
    /// Create a mock source with the given simulated latency.
    pub fn new(latency: Duration) -> Self {
        Self {
            catalog: mock_catalog(),
            latency,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Use a fixed RNG seed so picks are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Replace the catalog.
    pub fn with_catalog(mut self, catalog: Vec<Candidate>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Simulated latency per scan.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn pick(&self) -> Vec<Candidate> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let upper = MAX_PICK.min(self.catalog.len());
        let lower = MIN_PICK.min(upper);
        let count = rng.gen_range(lower..=upper);

        let mut shuffled = self.catalog.clone();
        shuffled.shuffle(&mut *rng);
        shuffled.truncate(count);
        shuffled
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn scan(&self) -> ScanResult<Vec<Candidate>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let picked = self.pick();
        debug!(count = picked.len(), "Mock source produced candidates");
        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_subset_size_and_membership() {
        let source = MockSource::new(Duration::ZERO);
        let catalog: HashSet<_> = mock_catalog().into_iter().map(|c| c.url).collect();

        for _ in 0..50 {
            let picked = source.scan().await.unwrap();
            assert!((MIN_PICK..=MAX_PICK).contains(&picked.len()));

            let urls: HashSet<_> = picked.iter().map(|c| c.url.clone()).collect();
            assert_eq!(urls.len(), picked.len(), "no repeats within a scan");
            assert!(urls.is_subset(&catalog));
        }
    }

    #[tokio::test]
    async fn test_seeded_source_is_reproducible() {
        let a = MockSource::new(Duration::ZERO).with_seed(7);
        let b = MockSource::new(Duration::ZERO).with_seed(7);
        assert_eq!(a.scan().await.unwrap(), b.scan().await.unwrap());
    }

    #[tokio::test]
    async fn test_small_catalog_is_clamped() {
        let source = MockSource::new(Duration::ZERO)
            .with_catalog(vec![Candidate::new("only", "one", "https://one.example", "t")]);
        assert_eq!(source.scan().await.unwrap().len(), 1);

        let empty = MockSource::new(Duration::ZERO).with_catalog(Vec::new());
        assert!(empty.scan().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let source = MockSource::new(Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        source.scan().await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
