//! In-process store.
//!
//! Holds subscribers and tools in memory for the lifetime of the process.
//! Every mutation takes the write lock once, so the uniqueness checks and
//! the appends cannot interleave across concurrent pipeline runs.

use super::records::{Candidate, Subscriber, Tool};
use super::traits::Store;
use crate::clock::{Clock, SystemClock};
use crate::error::{StorageError, StorageResult};
use crate::types::{EmailAddress, Frequency};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Collections {
    tools: Vec<Tool>,
    urls: HashSet<String>,
    subscribers: Vec<Subscriber>,
    emails: HashSet<EmailAddress>,
}

/// Memory-backed [`Store`].
pub struct MemoryStore {
    inner: RwLock<Collections>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store stamping records with wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store stamping records with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(Collections::default()),
            clock,
        }
    }

    /// Number of subscribers.
    pub async fn subscriber_count(&self) -> usize {
        self.inner.read().await.subscribers.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_subscribers(&self) -> StorageResult<Vec<Subscriber>> {
        Ok(self.inner.read().await.subscribers.clone())
    }

    async fn add_subscriber(
        &self,
        email: EmailAddress,
        frequency: Frequency,
    ) -> StorageResult<Subscriber> {
        let mut inner = self.inner.write().await;

        if inner.emails.contains(&email) {
            return Err(StorageError::DuplicateSubscriber(email.to_string()));
        }

        let subscriber = Subscriber {
            email: email.clone(),
            frequency,
            subscribed_at: self.clock.now(),
        };
        inner.emails.insert(email);
        inner.subscribers.push(subscriber.clone());

        debug!(email = %subscriber.email, %frequency, "Subscriber added");
        Ok(subscriber)
    }

    async fn list_tools(&self) -> StorageResult<Vec<Tool>> {
        Ok(self.inner.read().await.tools.clone())
    }

    async fn add_tool(&self, candidate: Candidate) -> StorageResult<Option<Tool>> {
        let mut inner = self.inner.write().await;

        if inner.urls.contains(&candidate.url) {
            debug!(url = %candidate.url, "Tool already stored, skipping");
            return Ok(None);
        }

        let tool = Tool::from_candidate(candidate, self.clock.now());
        inner.urls.insert(tool.url.clone());
        inner.tools.push(tool.clone());

        debug!(id = %tool.id.short(), url = %tool.url, "Tool added");
        Ok(Some(tool))
    }

    async fn list_tools_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<Tool>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tools
            .iter()
            .filter(|t| t.found_at >= start && t.found_at <= end)
            .cloned()
            .collect())
    }

    async fn tool_count(&self) -> StorageResult<usize> {
        Ok(self.inner.read().await.tools.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;

    fn candidate(url: &str) -> Candidate {
        Candidate::new("Tool", "An AI tool", url, "Test")
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_add_tool_dedups_by_url() {
        let store = MemoryStore::new();

        assert!(store.add_tool(candidate("https://a.example")).await.unwrap().is_some());
        assert!(store.add_tool(candidate("https://a.example")).await.unwrap().is_none());
        assert!(store.add_tool(candidate("https://b.example")).await.unwrap().is_some());

        let tools = store.list_tools().await.unwrap();
        assert_eq!(tools.len(), 2);
        let urls: HashSet<_> = tools.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls.len(), tools.len());
    }

    #[tokio::test]
    async fn test_assigned_ids_are_unique() {
        let store = MemoryStore::new();
        for i in 0..50 {
            store
                .add_tool(candidate(&format!("https://tool{i}.example")))
                .await
                .unwrap();
        }

        let tools = store.list_tools().await.unwrap();
        let ids: HashSet<_> = tools.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 50);
        assert!(tools.iter().all(|t| !t.id.to_string().is_empty()));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_do_not_duplicate() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();

        for _ in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add_tool(candidate("https://race.example")).await.unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(store.tool_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_timestamp_comes_from_clock() {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 9, 30, 0).unwrap();
        let store = MemoryStore::with_clock(Arc::new(FixedClock::new(at)));

        let tool = store.add_tool(candidate("https://a.example")).await.unwrap().unwrap();
        assert_eq!(tool.found_at, at);
        assert_eq!(store.list_tools().await.unwrap()[0].found_at, at);
    }

    #[tokio::test]
    async fn test_duplicate_subscriber_rejected() {
        let store = MemoryStore::new();
        store
            .add_subscriber(email("dev@example.com"), Frequency::Daily)
            .await
            .unwrap();

        let err = store
            .add_subscriber(email("dev@example.com"), Frequency::Weekly)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateSubscriber(_)));

        let subscribers = store.list_subscribers().await.unwrap();
        assert_eq!(subscribers.len(), 1);
        assert_eq!(subscribers[0].frequency, Frequency::Daily);
        assert_eq!(store.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_range_is_inclusive() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(base));
        let store = MemoryStore::with_clock(clock.clone());

        for i in 0..5 {
            store
                .add_tool(candidate(&format!("https://t{i}.example")))
                .await
                .unwrap();
            clock.advance(Duration::hours(1));
        }

        let all = store.list_tools().await.unwrap();
        let probes = [
            (base, base),
            (base, base + Duration::hours(2)),
            (base + Duration::hours(1), base + Duration::hours(3)),
            (base + Duration::minutes(30), base + Duration::minutes(45)),
            (base + Duration::hours(4), base + Duration::hours(10)),
            (base + Duration::hours(3), base + Duration::hours(1)),
        ];

        for (start, end) in probes {
            let got = store.list_tools_in_range(start, end).await.unwrap();
            let expected: Vec<_> = all
                .iter()
                .filter(|t| start <= t.found_at && t.found_at <= end)
                .cloned()
                .collect();
            assert_eq!(got, expected, "range {start}..={end}");
        }

        assert_eq!(
            store
                .list_tools_in_range(base, base + Duration::hours(2))
                .await
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_recent_tools_newest_first() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(base));
        let store = MemoryStore::with_clock(clock.clone());

        for i in 0..60 {
            store
                .add_tool(candidate(&format!("https://t{i}.example")))
                .await
                .unwrap();
            clock.advance(Duration::minutes(1));
        }

        let recent = store.recent_tools(50).await.unwrap();
        assert_eq!(recent.len(), 50);
        assert_eq!(recent[0].url, "https://t59.example");
        assert!(recent.windows(2).all(|w| w[0].found_at >= w[1].found_at));
    }
}
