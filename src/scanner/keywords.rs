//! Relevance filtering for scraped listings.

/// Phrases that mark a listing as AI-related.
pub const AI_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "machine learning",
    "ml",
    "deep learning",
    "neural network",
    "gpt",
    "llm",
    "large language model",
    "natural language processing",
    "nlp",
    "computer vision",
    "chatbot",
    "automation",
    "generative",
];

/// Check whether `text` mentions any AI keyword.
///
/// This is a plain case-insensitive substring match, so short keywords such
/// as "ai" also match inside longer words ("detail"). Source fetchers use it
/// as a coarse first-pass filter.
pub fn is_ai_related(text: &str) -> bool {
    let lower = text.to_lowercase();
    AI_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_keywords_case_insensitively() {
        assert!(is_ai_related("A new LLM for code review"));
        assert!(is_ai_related("Generative art studio"));
        assert!(is_ai_related("Powered by Machine Learning"));
    }

    #[test]
    fn test_rejects_unrelated_text() {
        assert!(!is_ai_related("Show HN: my bread recipe"));
        assert!(!is_ai_related(""));
    }

    #[test]
    fn test_substring_semantics() {
        // Short keywords match inside other words.
        assert!(is_ai_related("Email client"));
    }
}
