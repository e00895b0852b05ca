//! JSON output formatting.

use crate::notifier::DeliverySummary;
use crate::pipeline::{ScanOutcome, Trigger};
use crate::storage::Tool;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io;
use uuid::Uuid;

/// Serializable view of a [`ScanOutcome`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeView<'a> {
    pub run_id: Uuid,
    pub trigger: Trigger,
    pub candidates: usize,
    pub new_tools: usize,
    pub added: &'a [Tool],
    pub deliveries: Vec<DeliverySummary>,
    pub finished_at: DateTime<Utc>,
}

impl<'a> From<&'a ScanOutcome> for OutcomeView<'a> {
    fn from(outcome: &'a ScanOutcome) -> Self {
        Self {
            run_id: outcome.run_id,
            trigger: outcome.trigger,
            candidates: outcome.candidates,
            new_tools: outcome.added_count(),
            added: &outcome.added,
            deliveries: outcome.delivery_summaries(),
            finished_at: outcome.finished_at,
        }
    }
}

/// Print an outcome in JSON format.
pub fn print_json(outcome: &ScanOutcome) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&OutcomeView::from(outcome)).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
