//! Feed source and fan-out capability interfaces
//!
//! Post sources (the original Twitter-style adapters) and trend sinks (the
//! push fan-out layer) are external collaborators. The core only fixes
//! their call interfaces: a source hands over posts that already satisfy
//! the model invariants, a sink receives one computed top-K list per tick.

use crate::trend::{EngineError, Post, SharedTrendEngine, Trend};
use async_trait::async_trait;

pub mod mock;

pub use mock::MockFeedProducer;

#[derive(Debug)]
pub enum FeedError {
    /// The upstream service could not be reached or returned garbage.
    SourceUnavailable(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::SourceUnavailable(reason) => {
                write!(f, "feed source unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for FeedError {}

/// Capability interface for interchangeable post sources.
///
/// Implemented per source rather than inherited; a source that supplies
/// pre-built posts must also expose validation so the engine can trust
/// (but still re-check) what it appends.
#[async_trait]
pub trait PostSource {
    /// Fetch the next batch of posts from the upstream feed.
    async fn fetch_posts(&self) -> Result<Vec<Post>, FeedError>;

    /// Whether a candidate post satisfies the model invariants.
    fn validate_post(&self, post: &Post) -> bool;
}

/// Call interface of the downstream fan-out layer.
///
/// Exactly one owner ingests each message and computes one result; the
/// sink distributes that result, so subscribers never re-ingest.
#[async_trait]
pub trait TrendSink {
    async fn publish(&self, trends: Vec<Trend>);
}

/// Sink that logs the top list. Stands in for real transports during
/// development.
pub struct LogTrendSink;

#[async_trait]
impl TrendSink for LogTrendSink {
    async fn publish(&self, trends: Vec<Trend>) {
        let summary: Vec<String> = trends
            .iter()
            .map(|t| format!("{}={}", t.tag, t.count))
            .collect();
        log::info!("📈 Top trends: [{}]", summary.join(", "));
    }
}

/// Pull one batch from `source` and ingest every valid post.
///
/// Returns the number of posts ingested. A fetch failure is logged and
/// yields zero; only a lost engine lock surfaces as an error.
pub async fn drain_source(
    source: &dyn PostSource,
    engine: &SharedTrendEngine,
    now_ms: i64,
) -> Result<usize, EngineError> {
    let posts = match source.fetch_posts().await {
        Ok(posts) => posts,
        Err(e) => {
            log::error!("❌ Fetch failed: {}", e);
            return Ok(0);
        }
    };

    let mut ingested = 0;
    for post in posts {
        if !source.validate_post(&post) {
            log::debug!("skipping invalid post {}", post.id);
            continue;
        }
        engine.ingest_post(post, now_ms)?;
        ingested += 1;
    }

    Ok(ingested)
}
