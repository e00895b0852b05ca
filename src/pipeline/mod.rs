//! Discovery pipeline.
//!
//! One run scans the configured source, stores every candidate whose URL is
//! new, and notifies subscribers about the newly stored batch:
//!
//! - immediate subscribers on every run that added something;
//! - daily subscribers when a scheduled run lands in the digest hour;
//! - weekly subscribers when that scheduled run is also on a Monday.
//!
//! Daily and weekly digests therefore repeat the batch of the run that
//! happens to fall in the digest hour; they are not a rollup of everything
//! found since the previous digest.
//!
//! A scan or store failure aborts the run. Tools stored before the failure
//! stay stored.

use crate::clock::{Clock, SystemClock};
use crate::error::PipelineResult;
use crate::notifier::{DeliveryReport, DeliverySummary, Notifier};
use crate::scanner::SharedSource;
use crate::storage::{Store, Tool};
use crate::types::Frequency;
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

/// UTC hour at which daily and weekly digests go out.
pub const DIGEST_HOUR_UTC: u32 = 9;

/// Weekday on which weekly digests go out.
pub const DIGEST_WEEKDAY: Weekday = Weekday::Mon;

/// What started a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// A user asked for a scan; only immediate subscribers are notified.
    Manual,
    /// The external scheduler fired; time-gated digests may go out too.
    Scheduled,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// Time-gated frequencies due at `now`, in addition to immediate.
pub fn digest_schedule(now: DateTime<Utc>) -> Vec<Frequency> {
    let mut due = Vec::new();
    if now.hour() == DIGEST_HOUR_UTC {
        due.push(Frequency::Daily);
        if now.weekday() == DIGEST_WEEKDAY {
            due.push(Frequency::Weekly);
        }
    }
    due
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Identifier for correlating logs.
    pub run_id: Uuid,
    /// What started the run.
    pub trigger: Trigger,
    /// Number of candidates the source returned.
    pub candidates: usize,
    /// Tools stored by this run, with their stored ids and timestamps.
    pub added: Vec<Tool>,
    /// One report per frequency notified.
    pub deliveries: Vec<DeliveryReport>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl ScanOutcome {
    /// Number of tools this run stored.
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    /// Delivery counts per notified frequency.
    pub fn delivery_summaries(&self) -> Vec<DeliverySummary> {
        self.deliveries.iter().map(DeliveryReport::summary).collect()
    }
}

/// Orchestrates scan, dedup, store and notify.
pub struct Pipeline {
    store: Arc<dyn Store>,
    source: SharedSource,
    notifier: Arc<Notifier>,
    clock: Arc<dyn Clock>,
}

impl Pipeline {
    /// Create a pipeline using wall-clock time for digest gating.
    pub fn new(store: Arc<dyn Store>, source: SharedSource, notifier: Arc<Notifier>) -> Self {
        Self {
            store,
            source,
            notifier,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` for digest gating and the finish timestamp.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Execute one run.
    pub async fn run(&self, trigger: Trigger) -> PipelineResult<ScanOutcome> {
        let run_id = Uuid::new_v4();
        let short_id = run_id.to_string()[..8].to_string();
        let span = info_span!("pipeline", %trigger, run = %short_id);
        self.run_inner(run_id, trigger).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid, trigger: Trigger) -> PipelineResult<ScanOutcome> {
        info!(source = self.source.name(), "Running scan");

        let candidates = self.source.scan().await?;
        let candidate_count = candidates.len();

        let mut known: HashSet<String> = self
            .store
            .list_tools()
            .await?
            .into_iter()
            .map(|t| t.url)
            .collect();

        let mut added = Vec::new();
        for candidate in candidates {
            if !known.insert(candidate.url.clone()) {
                debug!(url = %candidate.url, "Candidate already known");
                continue;
            }
            if let Some(tool) = self.store.add_tool(candidate).await? {
                added.push(tool);
            }
        }

        info!(
            candidates = candidate_count,
            added = added.len(),
            "Scan complete"
        );

        let mut deliveries = Vec::new();
        if !added.is_empty() {
            deliveries.push(self.notifier.notify(&added, Frequency::Immediate).await);

            if trigger == Trigger::Scheduled {
                for frequency in digest_schedule(self.clock.now()) {
                    deliveries.push(self.notifier.notify(&added, frequency).await);
                }
            }
        }

        Ok(ScanOutcome {
            run_id,
            trigger,
            candidates: candidate_count,
            added,
            deliveries,
            finished_at: self.clock.now(),
        })
    }
}
