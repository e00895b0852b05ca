//! Upstream listing sites.
//!
//! The catalog names the sites a real fetcher would watch. Fetching and
//! HTML extraction are not implemented; [`MockSource`](super::MockSource)
//! stands in for them.

use std::sync::LazyLock;

/// An upstream site that lists new AI tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownSource {
    /// Display name, also used as the origin label on candidates.
    pub name: &'static str,
    /// Landing page to fetch.
    pub url: &'static str,
    /// CSS selector for listing cards, when the page has a stable one.
    pub selector: Option<&'static str>,
    /// Keyword filter for general-purpose feeds.
    pub keywords: &'static [&'static str],
}

/// Sites scanned for new tools.
pub static KNOWN_SOURCES: LazyLock<Vec<KnownSource>> = LazyLock::new(|| {
    vec![
        KnownSource {
            name: "Product Hunt AI",
            url: "https://www.producthunt.com/topics/artificial-intelligence",
            selector: Some(".styles_item__"),
            keywords: &[],
        },
        KnownSource {
            name: "Hacker News",
            url: "https://news.ycombinator.com/",
            selector: None,
            keywords: &[
                "ai",
                "artificial intelligence",
                "machine learning",
                "gpt",
                "llm",
                "neural",
            ],
        },
        KnownSource {
            name: "There's An AI For That",
            url: "https://theresanaiforthat.com/",
            selector: Some(".tool-card"),
            keywords: &[],
        },
    ]
});

/// Look up a known source by name (case-insensitive).
pub fn find_source(name: &str) -> Option<&'static KnownSource> {
    KNOWN_SOURCES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
}
