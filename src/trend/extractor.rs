//! Hashtag extraction from raw post text

use regex::Regex;
use std::sync::OnceLock;

static HASHTAG_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Full-match form of the hashtag grammar, shared with post validation.
pub(crate) fn hashtag_pattern() -> &'static Regex {
    HASHTAG_PATTERN.get_or_init(|| Regex::new(r"^#\w+$").expect("hashtag pattern is valid"))
}

/// Extracts normalized hashtags from post text.
///
/// Grammar: `#` followed by one or more word characters (Unicode letters,
/// digits, underscore). Trailing punctuation never enters a match, so
/// `#rust!` yields `#rust`. Matches are lowercased and deduplicated in
/// first-occurrence order.
pub struct HashtagExtractor {
    pattern: Regex,
}

impl HashtagExtractor {
    pub fn new() -> Self {
        Self {
            // \w is Unicode-aware in the regex crate, covering the
            // extended letter ranges the feed sources produce.
            pattern: Regex::new(r"#\w+").expect("hashtag pattern is valid"),
        }
    }

    /// Scan `text` for hashtags, in first-occurrence order.
    ///
    /// Never fails: empty or hashtag-free input returns an empty vector.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = Vec::new();

        for m in self.pattern.find_iter(text) {
            let tag = m.as_str().to_lowercase();
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }

        seen
    }
}

impl Default for HashtagExtractor {
    fn default() -> Self {
        Self::new()
    }
}
