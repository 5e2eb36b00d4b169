//! Validated post model shared by all feed sources

use serde::{Deserialize, Serialize};

/// Maximum characters in a single post.
pub const MAX_MESSAGE_LENGTH: usize = 280;

/// Maximum distinct hashtags in a single post.
pub const MAX_HASHTAGS_PER_MESSAGE: usize = 30;

/// Origin tag identifying which adapter produced a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostOrigin {
    Twitter,
    Instagram,
    Mock,
    Test,
}

/// A validated, immutable post retained in the scoring window.
///
/// Built exactly once by [`Post::from_raw`] (or deserialized from a richer
/// adapter and re-checked on append); read-only afterwards; removed only by
/// pruning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub origin: PostOrigin,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Normalized, deduplicated, first-occurrence order.
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MessageTooLong { length: usize },
    TooManyHashtags { count: usize },
    MalformedHashtag { tag: String },
    DuplicateHashtag { tag: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MessageTooLong { length } => {
                write!(f, "message length {} exceeds {}", length, MAX_MESSAGE_LENGTH)
            }
            ValidationError::TooManyHashtags { count } => {
                write!(f, "{} hashtags exceeds {}", count, MAX_HASHTAGS_PER_MESSAGE)
            }
            ValidationError::MalformedHashtag { tag } => {
                write!(f, "hashtag {:?} does not match the hashtag grammar", tag)
            }
            ValidationError::DuplicateHashtag { tag } => {
                write!(f, "hashtag {} appears more than once", tag)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl Post {
    /// Build a post from raw text, extracting and normalizing hashtags.
    ///
    /// `hashtags` is supplied by the caller so the extractor stays a pure
    /// collaborator; `from_raw` only enforces the invariants.
    pub fn from_raw(
        id: String,
        text: String,
        origin: PostOrigin,
        timestamp: i64,
        hashtags: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let post = Self {
            id,
            text,
            origin,
            timestamp,
            hashtags,
        };
        post.check_invariants()?;
        Ok(post)
    }

    /// Enforce the model invariants: bounded text, and a bounded set of
    /// distinct, lowercase, grammar-conformant hashtags.
    ///
    /// Posts built from raw text satisfy the hashtag rules by construction;
    /// pre-built adapter posts go through [`Post::normalize_hashtags`]
    /// first so casing and duplication collapse instead of rejecting.
    pub fn check_invariants(&self) -> Result<(), ValidationError> {
        let length = self.text.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(ValidationError::MessageTooLong { length });
        }

        if self.hashtags.len() > MAX_HASHTAGS_PER_MESSAGE {
            return Err(ValidationError::TooManyHashtags {
                count: self.hashtags.len(),
            });
        }

        for (i, tag) in self.hashtags.iter().enumerate() {
            if !crate::trend::extractor::hashtag_pattern().is_match(tag)
                || *tag != tag.to_lowercase()
            {
                return Err(ValidationError::MalformedHashtag { tag: tag.clone() });
            }
            if self.hashtags[..i].contains(tag) {
                return Err(ValidationError::DuplicateHashtag { tag: tag.clone() });
            }
        }

        Ok(())
    }

    /// Lowercase every hashtag and collapse duplicates to the first
    /// occurrence, matching what the extractor produces for raw text.
    ///
    /// Tags that fail the grammar outright are not repaired here; they are
    /// rejected by [`Post::check_invariants`].
    pub fn normalize_hashtags(&mut self) {
        let mut normalized: Vec<String> = Vec::with_capacity(self.hashtags.len());
        for tag in &self.hashtags {
            let tag = tag.to_lowercase();
            if !normalized.contains(&tag) {
                normalized.push(tag);
            }
        }
        self.hashtags = normalized;
    }

    /// Age of this post relative to `now_ms`, in hours. Clamped at zero so
    /// out-of-order arrivals with future timestamps never boost scores.
    pub fn age_hours(&self, now_ms: i64) -> f64 {
        ((now_ms - self.timestamp).max(0) as f64) / 3_600_000.0
    }
}
