//! # toolwatch - AI tool discovery and digest service
//!
//! toolwatch scans upstream listings for newly launched AI tools, stores
//! the ones it has not seen before, and mails subscribers either as soon
//! as something new appears or in daily and weekly digests.
//!
//! ## Features
//!
//! - **Deduplicated discovery**: tools are keyed by URL and inserted atomically
//! - **Pluggable sources**: the [`scanner::Source`] trait with a concurrent fan-out set
//! - **Three cadences**: immediate, daily and weekly digests
//! - **HTTP surface**: manual and scheduled scans, listings, stats, subscriptions
//! - **Multiple Output Formats**: Plain text, JSON, and CSV for CLI runs
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use toolwatch::config::Settings;
//! use toolwatch::pipeline::Trigger;
//! use toolwatch::AppContext;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = AppContext::from_settings(Settings::default()).unwrap();
//!     let outcome = ctx.pipeline.run(Trigger::Manual).await.unwrap();
//!     println!("{} new tools", outcome.added_count());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Newtypes for ids, email addresses and frequencies
//! - [`storage`] - The `Store` trait and its in-memory implementation
//! - [`scanner`] - Candidate sources
//! - [`digest`] - HTML and text digest rendering
//! - [`notifier`] - Per-subscriber delivery
//! - [`pipeline`] - Scan, dedup, store and notify
//! - [`server`] - HTTP API
//! - [`config`] - Settings file and environment overrides
//! - [`error`] - Error types
//! - [`output`] - Output formatting utilities

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod digest;
pub mod error;
pub mod notifier;
pub mod output;
pub mod pipeline;
pub mod scanner;
pub mod server;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use app::AppContext;
pub use error::{CliError, DeliveryError, PipelineError, ScanError, StorageError};
pub use pipeline::{Pipeline, ScanOutcome, Trigger};
pub use scanner::Source;
pub use storage::{Candidate, MemoryStore, Store, Tool};
pub use types::{EmailAddress, Frequency, ToolId};
