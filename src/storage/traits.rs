//! Store trait abstraction.
//!
//! Callers only see these operations, never the backing collections, so a
//! durable backend can replace [`MemoryStore`](super::MemoryStore) without
//! touching the pipeline or the HTTP layer.

use super::records::{Candidate, Subscriber, Tool};
use crate::error::StorageResult;
use crate::types::{EmailAddress, Frequency};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence for subscribers and discovered tools.
#[async_trait]
pub trait Store: Send + Sync {
    /// All subscribers. No ordering guarantee.
    async fn list_subscribers(&self) -> StorageResult<Vec<Subscriber>>;

    /// Record a new subscriber stamped with the current time.
    ///
    /// Returns [`StorageError::DuplicateSubscriber`](crate::error::StorageError::DuplicateSubscriber)
    /// if the address is already subscribed; the check and the insert are atomic.
    async fn add_subscriber(
        &self,
        email: EmailAddress,
        frequency: Frequency,
    ) -> StorageResult<Subscriber>;

    /// All stored tools.
    async fn list_tools(&self) -> StorageResult<Vec<Tool>>;

    /// Insert a candidate unless a tool with the same URL is already stored.
    ///
    /// Returns the stored record, or `None` when the URL was already present.
    async fn add_tool(&self, candidate: Candidate) -> StorageResult<Option<Tool>>;

    /// Tools whose discovery time lies in `start..=end`.
    async fn list_tools_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<Tool>> {
        Ok(self
            .list_tools()
            .await?
            .into_iter()
            .filter(|t| t.found_at >= start && t.found_at <= end)
            .collect())
    }

    /// Up to `limit` tools, newest first.
    async fn recent_tools(&self, limit: usize) -> StorageResult<Vec<Tool>> {
        let mut tools = self.list_tools().await?;
        tools.sort_by(|a, b| b.found_at.cmp(&a.found_at));
        tools.truncate(limit);
        Ok(tools)
    }

    /// Number of stored tools.
    async fn tool_count(&self) -> StorageResult<usize> {
        Ok(self.list_tools().await?.len())
    }
}
