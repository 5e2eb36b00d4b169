//! Engine configuration from environment variables

use crate::trend::{
    ScoringStrategy, TrendEngine, TrendRanker, TrendScorer, DEFAULT_HALF_LIFE_HOURS,
    DEFAULT_SCORE_SCALE, DEFAULT_TOP_LIMIT, DEFAULT_VIRAL_WINDOW_HOURS, DEFAULT_WINDOW_MS,
};
use std::env;

/// Configuration for the trend engine and its host tasks.
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Retention window for posts, in milliseconds.
    pub window_ms: i64,

    /// How often the scheduler prunes and publishes, in milliseconds.
    pub prune_interval_ms: u64,

    /// Half-life of the recency decay, in hours.
    pub half_life_hours: f64,

    /// Inner virality sub-window, in hours (WeightedVirality only).
    pub viral_window_hours: f64,

    /// Scoring strategy; an explicit choice, not inferred.
    pub strategy: ScoringStrategy,

    /// Default number of trends returned per query.
    pub top_limit: usize,

    /// Multiplier for the presentation count transform.
    pub score_scale: f64,

    /// Channel buffer size for message ingestion.
    pub channel_buffer: usize,

    /// Mock feed emission interval, in milliseconds.
    pub mock_feed_interval_ms: u64,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TAGFLOW_WINDOW_SECS` (default: 3600)
    /// - `TAGFLOW_PRUNE_INTERVAL_MS` (default: 10000)
    /// - `TAGFLOW_HALF_LIFE_HOURS` (default: 24)
    /// - `TAGFLOW_VIRAL_WINDOW_HOURS` (default: 24)
    /// - `TAGFLOW_STRATEGY` (frequency_decay | weighted_virality,
    ///   default: frequency_decay)
    /// - `TAGFLOW_TOP_LIMIT` (default: 10)
    /// - `TAGFLOW_SCORE_SCALE` (default: 100)
    /// - `TAGFLOW_CHANNEL_BUFFER` (default: 10000)
    /// - `TAGFLOW_MOCK_FEED_INTERVAL_MS` (default: 2000)
    pub fn from_env() -> Self {
        Self {
            window_ms: env::var("TAGFLOW_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .map(|secs| secs * 1000)
                .unwrap_or(DEFAULT_WINDOW_MS),

            prune_interval_ms: env::var("TAGFLOW_PRUNE_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000),

            half_life_hours: env::var("TAGFLOW_HALF_LIFE_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_HALF_LIFE_HOURS),

            viral_window_hours: env::var("TAGFLOW_VIRAL_WINDOW_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_VIRAL_WINDOW_HOURS),

            strategy: env::var("TAGFLOW_STRATEGY")
                .ok()
                .and_then(|s| ScoringStrategy::from_str(&s))
                .unwrap_or(ScoringStrategy::FrequencyDecay),

            top_limit: env::var("TAGFLOW_TOP_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TOP_LIMIT),

            score_scale: env::var("TAGFLOW_SCORE_SCALE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SCORE_SCALE),

            channel_buffer: env::var("TAGFLOW_CHANNEL_BUFFER")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000),

            mock_feed_interval_ms: env::var("TAGFLOW_MOCK_FEED_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2_000),
        }
    }

    /// Build an engine wired from this configuration.
    pub fn build_engine(&self) -> TrendEngine {
        TrendEngine::new(
            self.window_ms,
            TrendScorer::new(self.strategy, self.half_life_hours, self.viral_window_hours),
            TrendRanker::new(self.score_scale),
            self.top_limit,
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            prune_interval_ms: 10_000,
            half_life_hours: DEFAULT_HALF_LIFE_HOURS,
            viral_window_hours: DEFAULT_VIRAL_WINDOW_HOURS,
            strategy: ScoringStrategy::FrequencyDecay,
            top_limit: DEFAULT_TOP_LIMIT,
            score_scale: DEFAULT_SCORE_SCALE,
            channel_buffer: 10_000,
            mock_feed_interval_ms: 2_000,
        }
    }
}
