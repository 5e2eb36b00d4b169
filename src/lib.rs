//! tagflow - windowed hashtag trend engine for social feed streams
//!
//! Ingests short text posts, extracts hashtags, retains a sliding one-hour
//! corpus, scores each tag with exponential recency decay (optionally
//! weighted by term importance and virality), and serves a deterministic
//! top-K ranking on demand or via a periodic publish scheduler.

pub mod config;
pub mod feed;
pub mod ingestion;
pub mod scheduler;
pub mod trend;

pub use config::EngineConfig;
pub use feed::{LogTrendSink, MockFeedProducer, PostSource, TrendSink};
pub use trend::{
    EngineError, EngineState, HashtagExtractor, Post, PostOrigin, ScoringStrategy,
    SharedTrendEngine, Trend, TrendEngine, TrendRanker, TrendScorer, ValidationError,
};
