//! End-to-end scenarios for the trend engine

use tagflow::{EngineConfig, EngineState, ScoringStrategy, SharedTrendEngine, TrendEngine};

const HOUR_MS: i64 = 3_600_000;
const WINDOW_MS: i64 = HOUR_MS;

fn make_engine() -> TrendEngine {
    EngineConfig::default().build_engine()
}

#[test]
fn scenario_basic_ingest_and_query() {
    // Ingest "Hello #World #test": both tags extracted, lowercased, and
    // returned tied, so lexicographic order decides.
    let mut engine = make_engine();

    let trends = engine.ingest("Hello #World #test", 1_000);

    let tags: Vec<&str> = trends.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(tags, vec!["#test", "#world"]);

    let queried = engine.query_top(10, 1_000);
    assert_eq!(queried, trends);
}

#[test]
fn scenario_oversized_message_rejected() {
    let mut engine = make_engine();
    engine.ingest("#existing", 500);

    let trends = engine.ingest(&"a".repeat(281), 1_000);

    assert!(trends.is_empty());
    assert_eq!(engine.retained_posts(), 1); // store size unchanged
}

#[test]
fn scenario_too_many_hashtags_rejected() {
    let mut engine = make_engine();
    let message: String = (0..31).map(|i| format!("#distinct{} ", i)).collect();

    let trends = engine.ingest(&message, 1_000);

    assert!(trends.is_empty());
    assert_eq!(engine.retained_posts(), 0);
}

#[test]
fn scenario_duplicate_hashtags_collapse_before_the_limit() {
    // 31 occurrences of one tag collapse to a single hashtag, which is
    // within bounds.
    let mut engine = make_engine();
    let message = vec!["#test"; 31].join(" ");

    let trends = engine.ingest(&message, 1_000);

    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].tag, "#test");
}

#[test]
fn scenario_tick_expires_the_window() {
    let mut engine = make_engine();
    let t0 = 1_000;

    engine.ingest("#test", t0);
    assert_eq!(engine.state(), EngineState::Active);

    engine.tick(t0 + WINDOW_MS + 1);

    assert!(engine.query_top(10, t0 + WINDOW_MS + 1).is_empty());
    assert_eq!(engine.state(), EngineState::Idle);
}

#[test]
fn scenario_decay_and_retention_are_independent() {
    // "#a" at t0 and t0+1h with a 24h half-life: both posts survive the 1h
    // retention window at the second ingest, and the newer contribution
    // exceeds the older decayed one.
    let mut engine = make_engine();
    let t0 = 1_000;

    engine.ingest("#a", t0);
    let trends = engine.ingest("#a", t0 + HOUR_MS);

    assert_eq!(engine.retained_posts(), 2);
    assert_eq!(trends.len(), 1);

    let older_contribution = (-1.0_f64 / 24.0).exp();
    let newer_contribution = 1.0;
    assert!(newer_contribution > older_contribution);
    assert!((trends[0].score - (older_contribution + newer_contribution)).abs() < 1e-9);
}

#[test]
fn ranking_is_reproducible_for_a_fixed_snapshot() {
    let mut engine = make_engine();
    for i in 0..20 {
        engine.ingest(&format!("post {} #alpha #beta #gamma", i), 1_000 + i);
    }
    engine.ingest("#alpha", 2_000);

    let now = 3_000;
    let first = engine.query_top(10, now);

    for _ in 0..5 {
        assert_eq!(engine.query_top(10, now), first);
    }
    assert_eq!(first[0].tag, "#alpha");
}

#[test]
fn equal_scores_rank_lexicographically() {
    let mut engine = make_engine();
    let now = 1_000;

    engine.ingest("#zebra #mango #apple", now);

    let tags: Vec<String> = engine
        .query_top(10, now)
        .into_iter()
        .map(|t| t.tag)
        .collect();
    assert_eq!(tags, vec!["#apple", "#mango", "#zebra"]);
}

#[test]
fn weighted_virality_strategy_ranks_rare_recent_tags_higher() {
    let mut config = EngineConfig::default();
    config.strategy = ScoringStrategy::WeightedVirality;
    // Long retention so nothing is pruned mid-scenario
    config.window_ms = 100 * HOUR_MS;
    let mut engine = config.build_engine();

    let now = 1_000;
    // "#everywhere" in every post; "#fresh" only in the last one
    for i in 0..9 {
        engine.ingest(&format!("spam {} #everywhere", i), now + i);
    }
    let trends = engine.ingest("#everywhere #fresh", now + 100);

    let fresh = trends.iter().find(|t| t.tag == "#fresh").unwrap();
    let everywhere = trends.iter().find(|t| t.tag == "#everywhere").unwrap();

    // Rarity boosts the per-occurrence weight even though raw frequency is
    // ten times lower
    assert!(fresh.score > 0.0);
    assert!(everywhere.score / 10.0 < fresh.score);
}

#[test]
fn adapter_posts_are_normalized_like_raw_text() {
    use tagflow::{Post, PostOrigin};

    let mut engine = make_engine();
    let now = 1_000;

    // A pre-built post arriving over the wire with duplicated and
    // uppercased hashtags must score exactly like the equivalent raw text.
    let wire = serde_json::json!({
        "id": "tw-7",
        "text": "echo chamber #Trending #trending #TRENDING #News",
        "origin": "twitter",
        "timestamp": now,
        "hashtags": ["#Trending", "#trending", "#TRENDING", "#News"],
    });
    let post: Post = serde_json::from_value(wire).unwrap();
    assert_eq!(post.origin, PostOrigin::Twitter);

    let from_adapter = engine.ingest_post(post, now);

    let mut reference = make_engine();
    let from_raw = reference.ingest("echo chamber #Trending #trending #TRENDING #News", now);

    assert_eq!(from_adapter, from_raw);
    let tags: Vec<&str> = from_adapter.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(tags, vec!["#news", "#trending"]);
}

#[test]
fn shared_engine_full_flow() {
    let shared = SharedTrendEngine::new(make_engine());
    let t0 = 1_000;

    shared.ingest("Hello #World #test", t0).unwrap();
    shared.ingest("more #test", t0 + 1).unwrap();
    shared.tick(t0 + 2).unwrap();

    let trends = shared.query_top(10, t0 + 2).unwrap();
    assert_eq!(trends[0].tag, "#test");
    assert_eq!(trends[0].count, 200); // two fresh posts, score 2.0, scale 100
    assert_eq!(trends[1].tag, "#world");

    shared.tick(t0 + WINDOW_MS + 10).unwrap();
    assert!(shared.query_top(10, t0 + WINDOW_MS + 10).unwrap().is_empty());
}

#[test]
fn concurrent_readers_observe_consistent_snapshots() {
    use std::thread;

    let shared = SharedTrendEngine::new(make_engine());
    let now = 1_000;
    shared.ingest("#a #b", now).unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let reader = shared.clone();
        handles.push(thread::spawn(move || reader.query_top(10, now).unwrap()));
    }

    let expected = shared.query_top(10, now).unwrap();
    for handle in handles {
        // Every concurrent read sees a full snapshot, never a torn one
        assert_eq!(handle.join().unwrap(), expected);
    }
}
