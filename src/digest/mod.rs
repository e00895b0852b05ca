//! Digest composer.
//!
//! Renders a batch of tools into a self-contained HTML email and a
//! plain-text alternative. Rendering is pure: the same tools and frequency
//! always produce the same bytes. Dates come from the stored UTC timestamp,
//! so neither the host locale nor its timezone affects the output.

use crate::storage::Tool;
use crate::types::Frequency;
use std::fmt::Write;

const STYLE: &str = r"
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; }
    h1 { color: #00b8ff; }
    .tool { background: #f5f5f5; padding: 15px; margin: 15px 0; border-radius: 8px; border-left: 4px solid #00b8ff; }
    .tool h3 { margin-top: 0; color: #333; }
    .tool p { margin: 8px 0; }
    .meta { font-size: 12px; color: #666; }
    a { color: #00b8ff; text-decoration: none; }
    a:hover { text-decoration: underline; }
    .footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; }
";

const INTRO: &str = "Here are the latest AI tools and startups we've discovered:";
const FOOTER_REASON: &str = "You're receiving this because you subscribed to AI Tools Tracker.";
const FOOTER_TAGLINE: &str = "Stay ahead with the latest AI innovations!";

/// A fully rendered digest, ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// Email subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text body.
    pub text: String,
}

/// Builds digest content from tool records.
pub struct DigestComposer;

impl DigestComposer {
    /// Heading for a digest of the given cadence.
    pub const fn title(frequency: Frequency) -> &'static str {
        match frequency {
            Frequency::Immediate => "New AI Tools Discovered!",
            Frequency::Daily => "Daily AI Tools Digest",
            Frequency::Weekly => "Weekly AI Tools Summary",
        }
    }

    /// Subject line for a digest of the given cadence.
    pub fn subject(frequency: Frequency) -> String {
        Self::title(frequency).to_string()
    }

    /// Render subject, HTML and text in one go.
    pub fn render(tools: &[Tool], frequency: Frequency) -> Digest {
        Digest {
            subject: Self::subject(frequency),
            html: Self::compose(tools, frequency),
            text: Self::compose_text(tools, frequency),
        }
    }

    /// Render the HTML document.
    pub fn compose(tools: &[Tool], frequency: Frequency) -> String {
        let mut blocks = String::new();
        for tool in tools {
            let link = if tool.url.is_empty() {
                String::new()
            } else {
                format!(
                    r#"<p><a href="{}">Visit Tool →</a></p>"#,
                    html_escape(&tool.url)
                )
            };

            let _ = write!(
                blocks,
                r#"
  <div class="tool">
    <h3>{name}</h3>
    <p>{description}</p>
    <p class="meta">Source: {source} | Found: {found}</p>
    {link}
  </div>
"#,
                name = html_escape(&tool.name),
                description = html_escape(&tool.description),
                source = html_escape(&tool.source),
                found = tool.found_at.format("%Y-%m-%d"),
                link = link,
            );
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>{STYLE}</style>
</head>
<body>
  <h1>🤖 {title}</h1>
  <p>{INTRO}</p>
{blocks}
  <div class="footer">
    <p>{FOOTER_REASON}</p>
    <p>{FOOTER_TAGLINE}</p>
  </div>
</body>
</html>
"#,
            title = Self::title(frequency),
        )
    }

    /// Render the plain-text alternative.
    pub fn compose_text(tools: &[Tool], frequency: Frequency) -> String {
        let mut text = format!("{}\n\n{INTRO}\n\n", Self::title(frequency));

        for tool in tools {
            let _ = write!(
                text,
                "{name}\n{description}\nSource: {source} | Found: {found}\n",
                name = tool.name,
                description = tool.description,
                source = tool.source,
                found = tool.found_at.format("%Y-%m-%d"),
            );
            if !tool.url.is_empty() {
                let _ = writeln!(text, "{}", tool.url);
            }
            text.push_str("\n---\n\n");
        }

        let _ = write!(text, "{FOOTER_REASON}\n{FOOTER_TAGLINE}\n");
        text
    }
}

/// Simple HTML escaping for scraped content.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Candidate;
    use chrono::{TimeZone, Utc};

    fn tool(name: &str, url: &str) -> Tool {
        Tool::from_candidate(
            Candidate::new(name, "Writes code for you", url, "Product Hunt"),
            Utc.with_ymd_and_hms(2024, 2, 29, 23, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_titles_per_frequency() {
        let tools = vec![tool("Coder", "https://coder.example")];
        assert!(DigestComposer::compose(&tools, Frequency::Immediate)
            .contains("New AI Tools Discovered!"));
        let daily = DigestComposer::compose(&tools, Frequency::Daily);
        assert!(daily.contains("Daily AI Tools Digest"));
        assert!(DigestComposer::compose(&tools, Frequency::Weekly)
            .contains("Weekly AI Tools Summary"));
    }

    #[test]
    fn test_one_block_per_tool() {
        let tools = vec![
            tool("Coder", "https://coder.example"),
            tool("Painter", "https://painter.example"),
        ];
        let html = DigestComposer::compose(&tools, Frequency::Daily);

        assert_eq!(html.matches(r#"<div class="tool">"#).count(), 2);
        assert!(html.contains("Source: Product Hunt | Found: 2024-02-29"));
        assert!(html.contains(r#"<a href="https://painter.example">Visit Tool →</a>"#));
        assert!(html.contains(FOOTER_REASON));
    }

    #[test]
    fn test_link_omitted_without_url() {
        let html = DigestComposer::compose(&[tool("Offline", "")], Frequency::Immediate);
        assert!(!html.contains("Visit Tool"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let tools = vec![tool("Coder", "https://coder.example")];
        assert_eq!(
            DigestComposer::render(&tools, Frequency::Weekly),
            DigestComposer::render(&tools, Frequency::Weekly)
        );
    }

    #[test]
    fn test_content_is_escaped() {
        let tools = [tool("<script>x</script>", "https://a.example?a=1&b=2")];
        let html = DigestComposer::compose(&tools, Frequency::Immediate);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a=1&amp;b=2"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_text_alternative() {
        let tools = [tool("Coder", "https://coder.example")];
        let text = DigestComposer::compose_text(&tools, Frequency::Daily);
        assert!(text.starts_with("Daily AI Tools Digest"));
        assert!(text.contains("https://coder.example"));
        assert!(text.ends_with(&format!("{FOOTER_TAGLINE}\n")));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>"), "&lt;b&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
