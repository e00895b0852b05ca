//! Digest preview subcommand.

use crate::digest::DigestComposer;
use crate::error::CliResult;
use crate::scanner::mock_catalog;
use crate::storage::Tool;
use crate::types::Frequency;
use chrono::Utc;
use clap::Parser;

/// Render a digest of the sample catalog to stdout.
#[derive(Parser, Debug)]
pub struct DigestCommand {
    /// Which digest to render
    #[arg(short, long, value_enum, default_value = "immediate")]
    pub frequency: Frequency,

    /// Render the plain-text alternative instead of HTML
    #[arg(long)]
    pub text: bool,
}

impl DigestCommand {
    /// Execute the digest command.
    pub fn execute(&self) -> CliResult<()> {
        let now = Utc::now();
        let tools: Vec<Tool> = mock_catalog()
            .into_iter()
            .map(|c| Tool::from_candidate(c, now))
            .collect();

        let body = if self.text {
            DigestComposer::compose_text(&tools, self.frequency)
        } else {
            DigestComposer::compose(&tools, self.frequency)
        };

        println!("{body}");
        Ok(())
    }
}
