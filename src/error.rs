//! Error types for toolwatch.
//!
//! Uses `thiserror` for ergonomic error definitions. Each layer has its own
//! enum; the pipeline and CLI wrap the lower layers with `#[from]`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while collecting candidates from a source.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("source '{name}' failed: {reason}")]
    SourceFailed { name: String, reason: String },

    #[error("source task failed: {0}")]
    Task(String),
}

/// Errors produced by a [`Store`](crate::storage::Store) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("subscriber already exists: {0}")]
    DuplicateSubscriber(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors produced while delivering a digest to one subscriber.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email service returned {status} for {to}")]
    Status { status: u16, to: String },

    #[error("delivery task failed: {0}")]
    Task(String),
}

/// Errors that abort a pipeline run.
///
/// Delivery failures are never surfaced here; they are reported per
/// subscriber in a [`DeliveryReport`](crate::notifier::DeliveryReport).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Top-level error for CLI subcommands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for delivery attempts.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Result type alias for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
