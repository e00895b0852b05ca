//! CSV output formatting.

use crate::pipeline::ScanOutcome;
use crate::storage::Tool;
use std::io;

/// Print the tools added by a run in CSV format.
pub fn print_csv(outcome: &ScanOutcome) -> io::Result<()> {
    let stdout = io::stdout();
    write_tools_csv(&outcome.added, stdout.lock())?;
    Ok(())
}

/// Write `tools` as CSV rows with a header.
pub fn write_tools_csv<W: io::Write>(tools: &[Tool], writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["id", "name", "description", "url", "source", "found_at"])?;

    for tool in tools {
        wtr.write_record([
            &tool.id.to_string(),
            &tool.name,
            &tool.description,
            &tool.url,
            &tool.source,
            &tool.found_at.to_rfc3339(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Candidate;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_csv_quotes_commas() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let tools = vec![Tool::from_candidate(
            Candidate::new("Writer", "Drafts, edits", "https://w.example", "Test"),
            at,
        )];

        let mut buf = Vec::new();
        write_tools_csv(&tools, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,name,description,url,source,found_at"));
        let row = lines.next().unwrap();
        assert!(row.contains("\"Drafts, edits\""));
        assert!(row.ends_with("Test,2024-03-01T09:00:00+00:00"));
        assert_eq!(lines.next(), None);
    }
}
