//! Deterministic top-K ranking of scored hashtags

use serde::Serialize;
use std::collections::HashMap;

/// Default number of trends returned by a query.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Default multiplier for the presentation count transform.
pub const DEFAULT_SCORE_SCALE: f64 = 100.0;

/// A ranked hashtag as of a computation instant. Ephemeral: recomputed on
/// every query, never cached across window changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub tag: String,
    pub score: f64,
    /// Presentation count: scaled rounding of the raw score. Monotone and
    /// deterministic; the scale constant is configuration, not contract.
    pub count: u64,
    /// Epoch milliseconds of the scoring pass.
    pub as_of: i64,
}

/// Sorts score mappings into a reproducible top-K list.
pub struct TrendRanker {
    score_scale: f64,
}

impl TrendRanker {
    pub fn new(score_scale: f64) -> Self {
        Self { score_scale }
    }

    /// Rank descending by score, ties broken by ascending lexicographic tag
    /// order (the only secondary key, so output is reproducible), truncated
    /// to `limit`.
    pub fn rank(&self, scores: HashMap<String, f64>, limit: usize, as_of: i64) -> Vec<Trend> {
        let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();

        ranked.sort_by(|(tag_a, score_a), (tag_b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| tag_a.cmp(tag_b))
        });
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(tag, score)| Trend {
                count: (score * self.score_scale).round() as u64,
                tag,
                score,
                as_of,
            })
            .collect()
    }
}

impl Default for TrendRanker {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(t, s)| (t.to_string(), *s)).collect()
    }

    #[test]
    fn test_sorts_descending_by_score() {
        let ranker = TrendRanker::default();
        let ranked = ranker.rank(scores(&[("#low", 1.0), ("#high", 3.0), ("#mid", 2.0)]), 10, 0);

        let tags: Vec<&str> = ranked.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["#high", "#mid", "#low"]);
    }

    #[test]
    fn test_ties_break_lexicographically() {
        let ranker = TrendRanker::default();
        let ranked = ranker.rank(scores(&[("#b", 1.0), ("#a", 1.0), ("#c", 1.0)]), 10, 0);

        let tags: Vec<&str> = ranked.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["#a", "#b", "#c"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let ranker = TrendRanker::default();
        let ranked = ranker.rank(scores(&[("#a", 3.0), ("#b", 2.0), ("#c", 1.0)]), 2, 0);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].tag, "#a");
    }

    #[test]
    fn test_presentation_count_is_scaled_rounding() {
        let ranker = TrendRanker::new(100.0);
        let ranked = ranker.rank(scores(&[("#a", 0.954)]), 10, 42);

        assert_eq!(ranked[0].count, 95);
        assert_eq!(ranked[0].as_of, 42);
    }

    #[test]
    fn test_count_transform_is_monotone() {
        let ranker = TrendRanker::default();
        let ranked = ranker.rank(scores(&[("#a", 2.5), ("#b", 1.25), ("#c", 0.1)]), 10, 0);

        for pair in ranked.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_empty_scores_rank_empty() {
        let ranker = TrendRanker::default();

        assert!(ranker.rank(HashMap::new(), 10, 0).is_empty());
    }

    #[test]
    fn test_deterministic_across_calls() {
        let ranker = TrendRanker::default();
        let input = scores(&[("#z", 1.0), ("#a", 1.0), ("#m", 2.0), ("#q", 0.5)]);

        let first = ranker.rank(input.clone(), 10, 7);
        let second = ranker.rank(input, 10, 7);

        assert_eq!(first, second);
    }
}
