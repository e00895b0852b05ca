//! Sources subcommand implementation.

use crate::error::{CliError, CliResult};
use crate::output;
use crate::scanner::{find_source, KnownSource, KNOWN_SOURCES};
use clap::Parser;

/// List the upstream sites, or show one by name.
#[derive(Parser, Debug)]
pub struct SourcesCommand {
    /// Source name (case-insensitive), e.g. "hacker news"
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

impl SourcesCommand {
    /// Sources selected by this command.
    pub fn selected(&self) -> CliResult<Vec<KnownSource>> {
        match &self.name {
            None => Ok(KNOWN_SOURCES.clone()),
            Some(name) => find_source(name)
                .cloned()
                .map(|source| vec![source])
                .ok_or_else(|| CliError::Other(format!("unknown source '{name}'"))),
        }
    }

    /// Execute the sources command.
    pub fn execute(&self) -> CliResult<()> {
        output::print_sources(&self.selected()?)?;
        Ok(())
    }
}
