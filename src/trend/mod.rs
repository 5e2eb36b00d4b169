//! Trend Core - Windowed Hashtag Trend Engine
//!
//! In-memory engine that turns a stream of short text posts into a ranked
//! list of trending hashtags:
//!
//! ```text
//! raw message → HashtagExtractor → Post (validated) → PostStore
//!     ↓
//! PostStore.prune (1h retention, ticked every 10s)
//!     ↓
//! TrendScorer (frequency + recency decay, optional IDF/virality weighting)
//!     ↓
//! TrendRanker (descending score, lexicographic tie-break, top-K)
//!     ↓
//! Vec<Trend> → caller / TrendSink
//! ```
//!
//! Raw posts are never persisted: the store holds only the live retention
//! window, old posts are evicted on every tick and before every scoring
//! pass, and trends are recomputed fresh per query.

pub mod engine;
pub mod extractor;
pub mod post;
pub mod ranker;
pub mod scorer;
pub mod store;

pub use engine::{EngineError, EngineState, SharedTrendEngine, TrendEngine};
pub use extractor::HashtagExtractor;
pub use post::{Post, PostOrigin, ValidationError, MAX_HASHTAGS_PER_MESSAGE, MAX_MESSAGE_LENGTH};
pub use ranker::{Trend, TrendRanker, DEFAULT_SCORE_SCALE, DEFAULT_TOP_LIMIT};
pub use scorer::{
    ScoringStrategy, TrendScorer, DEFAULT_HALF_LIFE_HOURS, DEFAULT_VIRAL_WINDOW_HOURS,
};
pub use store::{PostStore, DEFAULT_WINDOW_MS};
