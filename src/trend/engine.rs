//! Trend engine facade - the single entry point for collaborators
//!
//! Wires validation, ingestion, pruning, scoring, and ranking:
//!
//! ```text
//! raw text → validate → extract → PostStore.append
//!     ↓ (on ingest, query, or tick)
//! PostStore.prune → TrendScorer.score → TrendRanker.rank → Vec<Trend>
//! ```
//!
//! The engine never reads a wall clock; every operation takes an explicit
//! `now_ms`, so scoring stays deterministic and testable. The host stamps
//! time at the boundary.

use super::extractor::HashtagExtractor;
use super::post::{Post, PostOrigin};
use super::ranker::{Trend, TrendRanker};
use super::scorer::TrendScorer;
use super::store::PostStore;
use std::sync::{Arc, Mutex, MutexGuard};

/// Engine lifecycle state, derived from store emptiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No retained posts.
    Idle,
    /// At least one retained post.
    Active,
}

#[derive(Debug)]
pub enum EngineError {
    /// Exclusive access to the post store could not be obtained. Retryable;
    /// no state was touched.
    StoreUnavailable,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::StoreUnavailable => {
                write!(f, "post store unavailable, retry the operation")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Single-owner trend engine. Callers needing shared access wrap it in
/// [`SharedTrendEngine`]; all mutation is serialized either way.
pub struct TrendEngine {
    extractor: HashtagExtractor,
    store: PostStore,
    scorer: TrendScorer,
    ranker: TrendRanker,
    default_limit: usize,
    // Opaque unique ids for posts built from raw text
    next_id: u64,
}

impl TrendEngine {
    pub fn new(
        window_ms: i64,
        scorer: TrendScorer,
        ranker: TrendRanker,
        default_limit: usize,
    ) -> Self {
        Self {
            extractor: HashtagExtractor::new(),
            store: PostStore::new(window_ms),
            scorer,
            ranker,
            default_limit,
            next_id: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        if self.store.is_empty() {
            EngineState::Idle
        } else {
            EngineState::Active
        }
    }

    pub fn retained_posts(&self) -> usize {
        self.store.len()
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Ingest one raw text message stamped at `now_ms`.
    ///
    /// The single state-mutating entry point for raw payloads. A validation
    /// failure yields an empty trend list for this call only; the store and
    /// all previously retained posts are untouched, and later messages are
    /// unaffected.
    pub fn ingest(&mut self, raw_text: &str, now_ms: i64) -> Vec<Trend> {
        let hashtags = self.extractor.extract(raw_text);

        self.next_id += 1;
        let post = match Post::from_raw(
            format!("ingest-{}", self.next_id),
            raw_text.to_string(),
            PostOrigin::Mock,
            now_ms,
            hashtags,
        ) {
            Ok(post) => post,
            Err(e) => {
                log::debug!("rejected message: {}", e);
                return Vec::new();
            }
        };

        self.ingest_post(post, now_ms)
    }

    /// Ingest a pre-built post from a richer adapter. The post carries its
    /// own timestamp and origin but goes through the same gate as raw
    /// text: hashtags are normalized and collapsed on append, and the
    /// invariants re-checked.
    pub fn ingest_post(&mut self, post: Post, now_ms: i64) -> Vec<Trend> {
        if let Err(e) = self.store.append(post) {
            log::debug!("rejected adapter post: {}", e);
            return Vec::new();
        }

        self.compute_top(self.default_limit, now_ms)
    }

    /// Current top trends; prunes first so reads are fresh, but appends
    /// nothing.
    pub fn query_top(&mut self, limit: usize, now_ms: i64) -> Vec<Trend> {
        self.compute_top(limit, now_ms)
    }

    /// Periodic maintenance, driven by the host's scheduler. Prune only;
    /// pushing results is the fan-out collaborator's responsibility.
    pub fn tick(&mut self, now_ms: i64) {
        self.store.prune(now_ms);
    }

    fn compute_top(&mut self, limit: usize, now_ms: i64) -> Vec<Trend> {
        self.store.prune(now_ms);
        let scores = self.scorer.score(self.store.snapshot(), now_ms);
        self.ranker.rank(scores, limit, now_ms)
    }
}

/// Shared handle serializing all engine access behind one mutex.
///
/// The guard held across prune + score + rank is the atomic snapshot: no
/// reader can observe a partially applied append or prune. A poisoned lock
/// surfaces as [`EngineError::StoreUnavailable`] instead of panicking, and
/// the scoped guard releases on every exit path.
#[derive(Clone)]
pub struct SharedTrendEngine {
    inner: Arc<Mutex<TrendEngine>>,
}

impl SharedTrendEngine {
    pub fn new(engine: TrendEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, TrendEngine>, EngineError> {
        self.inner.lock().map_err(|_| EngineError::StoreUnavailable)
    }

    pub fn ingest(&self, raw_text: &str, now_ms: i64) -> Result<Vec<Trend>, EngineError> {
        Ok(self.lock()?.ingest(raw_text, now_ms))
    }

    pub fn ingest_post(&self, post: Post, now_ms: i64) -> Result<Vec<Trend>, EngineError> {
        Ok(self.lock()?.ingest_post(post, now_ms))
    }

    pub fn query_top(&self, limit: usize, now_ms: i64) -> Result<Vec<Trend>, EngineError> {
        Ok(self.lock()?.query_top(limit, now_ms))
    }

    pub fn tick(&self, now_ms: i64) -> Result<(), EngineError> {
        self.lock()?.tick(now_ms);
        Ok(())
    }

    pub fn state(&self) -> Result<EngineState, EngineError> {
        Ok(self.lock()?.state())
    }

    pub fn default_limit(&self) -> Result<usize, EngineError> {
        Ok(self.lock()?.default_limit())
    }
}
