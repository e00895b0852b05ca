//! Scan subcommand implementation.
//!
//! Handles the `toolwatch scan` command for a one-shot pipeline run.

use crate::app::AppContext;
use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliResult;
use crate::output;
use crate::pipeline::Trigger;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run the discovery pipeline once.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Run as the scheduler would, sending any digests due now
    #[arg(long)]
    pub scheduled: bool,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

impl ScanCommand {
    fn trigger(&self) -> Trigger {
        if self.scheduled {
            Trigger::Scheduled
        } else {
            Trigger::Manual
        }
    }

    /// Execute the scan command.
    pub async fn execute(&self, settings: Settings, quiet: bool) -> CliResult<()> {
        let ctx = AppContext::from_settings(settings)?;
        let trigger = self.trigger();
        let interactive = !quiet && self.output == OutputFormat::Plain;

        if interactive {
            output::print_scan_header(trigger, ctx.notifier.mailer_name());
        }

        let spinner = interactive.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Scanning sources...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let result = ctx.pipeline.run(trigger).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let outcome = result?;
        output::format_outcome(&outcome, self.output)?;
        Ok(())
    }
}
