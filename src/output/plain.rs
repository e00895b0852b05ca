//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::pipeline::{ScanOutcome, Trigger};
use crate::scanner::KnownSource;
use console::style;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Print an outcome in human-readable plain text format.
pub fn print_plain(outcome: &ScanOutcome) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(
        out,
        "                  {} Discovery Results",
        style("toolwatch").cyan().bold()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    let run_id = outcome.run_id.to_string();
    writeln!(out, "  {} {}", style("Trigger:").bold(), outcome.trigger)?;
    writeln!(out, "  {} {}", style("Run ID:").bold(), style(&run_id[..8]).dim())?;
    writeln!(
        out,
        "  {} {}",
        style("Finished:").bold(),
        outcome.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} candidates, {} new",
        style("Statistics:").bold(),
        outcome.candidates,
        style(outcome.added_count()).green().bold()
    )?;
    for summary in outcome.delivery_summaries() {
        writeln!(
            out,
            "               {} digest: {} sent, {} skipped, {} failed",
            summary.frequency,
            style(summary.delivered).green(),
            style(summary.skipped).yellow(),
            style(summary.failed).red()
        )?;
    }
    writeln!(out)?;

    if outcome.added.is_empty() {
        writeln!(out, "  {}", style("No new tools found.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:<24}  {:<18}  {}",
            style("NAME").bold(),
            style("SOURCE").bold(),
            style("URL").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for tool in &outcome.added {
            writeln!(
                out,
                "  {:<24}  {:<18}  {}",
                truncate_string(&tool.name, 24),
                truncate_string(&tool.source, 18),
                style(&tool.url).dim()
            )?;
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print a header before a scan begins.
pub fn print_scan_header(trigger: Trigger, mailer: &str) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("toolwatch").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{} Trigger: {}", style("•").dim(), style(trigger).yellow());
    println!("{} Delivery: {}", style("•").dim(), style(mailer).white().bold());
    println!();
}

/// Print the catalog of upstream sites.
pub fn print_sources(sources: &[KnownSource]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for source in sources {
        writeln!(out, "{}", style(source.name).bold())?;
        writeln!(out, "  {} {}", style("url:").dim(), source.url)?;
        if let Some(selector) = source.selector {
            writeln!(out, "  {} {}", style("selector:").dim(), selector)?;
        }
        if !source.keywords.is_empty() {
            writeln!(
                out,
                "  {} {}",
                style("keywords:").dim(),
                source.keywords.join(", ")
            )?;
        }
    }

    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Truncate to `max_len` characters, adding an ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_string("ÀÉÎÕÜÀÉÎ", 6), "ÀÉÎ...");
    }
}
