//! Recency-decayed trend scoring over a post snapshot

use super::post::Post;
use std::collections::HashMap;

/// Default half-life of the exponential recency decay, in hours.
pub const DEFAULT_HALF_LIFE_HOURS: f64 = 24.0;

/// Default inner sub-window for the virality term, in hours. Independent of
/// the store's retention window.
pub const DEFAULT_VIRAL_WINDOW_HOURS: f64 = 24.0;

/// Which scoring rule the engine runs. An explicit configuration choice,
/// never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringStrategy {
    /// Raw occurrence counting with exponential recency decay.
    FrequencyDecay,
    /// IDF-style term importance applied to a virality term: the decayed
    /// occurrence sum restricted to a shorter inner sub-window.
    WeightedVirality,
}

impl ScoringStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringStrategy::FrequencyDecay => "frequency_decay",
            ScoringStrategy::WeightedVirality => "weighted_virality",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "frequency_decay" => Some(ScoringStrategy::FrequencyDecay),
            "weighted_virality" => Some(ScoringStrategy::WeightedVirality),
            _ => None,
        }
    }
}

/// Computes a non-negative score per hashtag from the current snapshot.
///
/// Fully deterministic: posts are walked in arrival order, so float
/// accumulation order is fixed, and an identical snapshot plus identical
/// `now_ms` reproduces identical values.
pub struct TrendScorer {
    strategy: ScoringStrategy,
    half_life_hours: f64,
    viral_window_hours: f64,
}

impl TrendScorer {
    pub fn new(strategy: ScoringStrategy, half_life_hours: f64, viral_window_hours: f64) -> Self {
        Self {
            strategy,
            half_life_hours,
            viral_window_hours,
        }
    }

    pub fn with_defaults(strategy: ScoringStrategy) -> Self {
        Self::new(strategy, DEFAULT_HALF_LIFE_HOURS, DEFAULT_VIRAL_WINDOW_HOURS)
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    /// Score every hashtag present in `posts` as of `now_ms`.
    ///
    /// Two passes. Pass 1 counts raw occurrences per tag (distinct tags per
    /// post), which fixes the contributing set and, for WeightedVirality,
    /// the document frequencies. Pass 2 sums the per-post decayed
    /// contributions. Separating the passes keeps the half-life tunable
    /// independently of the counting rule.
    ///
    /// An empty snapshot yields an empty map, never an error.
    pub fn score(&self, posts: &[Post], now_ms: i64) -> HashMap<String, f64> {
        // Pass 1: raw occurrence count per tag
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for post in posts {
            for tag in &post.hashtags {
                *occurrences.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        if occurrences.is_empty() {
            return HashMap::new();
        }

        // Pass 2: decayed contribution per (tag, post), summed per tag.
        // `viral` additionally accumulates the decayed occurrences inside
        // the inner sub-window, used only by WeightedVirality.
        let mut decayed: HashMap<String, f64> = HashMap::new();
        let mut viral: HashMap<&str, f64> = HashMap::new();

        for post in posts {
            let age = post.age_hours(now_ms);
            let decay = (-age / self.half_life_hours).exp();

            for tag in &post.hashtags {
                *decayed.entry(tag.clone()).or_insert(0.0) += decay;
                if age <= self.viral_window_hours {
                    *viral.entry(tag.as_str()).or_insert(0.0) += decay;
                }
            }
        }

        match self.strategy {
            ScoringStrategy::FrequencyDecay => decayed,
            ScoringStrategy::WeightedVirality => {
                // score(tag) = importance(tag) × Σ decayed occurrences
                // inside the viral sub-window. Importance is recomputed
                // every pass; the corpus changes continuously, so caching
                // would go stale.
                let total_posts = posts.len();
                decayed
                    .into_keys()
                    .map(|tag| {
                        let df = occurrences[tag.as_str()];
                        let importance = (1.0 + total_posts as f64 / df as f64).ln();
                        let virality = viral.get(tag.as_str()).copied().unwrap_or(0.0);
                        (tag, importance * virality)
                    })
                    .collect()
            }
        }
    }
}
