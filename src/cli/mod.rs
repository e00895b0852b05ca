//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `toolwatch serve` - Run the HTTP service
//! - `toolwatch scan` - Run the discovery pipeline once
//! - `toolwatch digest` - Preview a digest
//! - `toolwatch sources [name]` - List upstream sites
//! - `toolwatch test-email <to>` - Send a sample digest

mod digest;
mod scan;
mod serve;
mod sources;
mod test_email;

pub use digest::DigestCommand;
pub use scan::ScanCommand;
pub use serve::ServeCommand;
pub use sources::SourcesCommand;
pub use test_email::TestEmailCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toolwatch - Discover new AI tools and mail digests to subscribers.
///
/// Scans upstream listings, stores tools it has not seen before, and
/// notifies subscribers immediately or in daily and weekly digests.
#[derive(Parser, Debug)]
#[command(name = "toolwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI tool discovery and digest service", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve(ServeCommand),

    /// Run the discovery pipeline once
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// Render a digest of the sample catalog
    #[command(alias = "d")]
    Digest(DigestCommand),

    /// List the upstream sites
    Sources(SourcesCommand),

    /// Send a sample digest to an address
    TestEmail(TestEmailCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV of newly added tools
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frequency;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_flags() {
        let cli = Cli::try_parse_from(["toolwatch", "-v", "scan", "--scheduled", "-o", "json"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Scan(cmd) => {
                assert!(cmd.scheduled);
                assert_eq!(cmd.output, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_digest_alias() {
        let cli = Cli::try_parse_from(["toolwatch", "digest", "-f", "realtime"]).unwrap();
        match cli.command {
            Commands::Digest(cmd) => assert_eq!(cmd.frequency, Frequency::Immediate),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["toolwatch", "-v", "-q", "sources"]).is_err());
    }

    #[test]
    fn test_test_email_requires_address() {
        assert!(Cli::try_parse_from(["toolwatch", "test-email"]).is_err());
    }
}
