//! Async channel ingestion - raw feed messages into the trend engine
//!
//! Main loop:
//! 1. Receives raw messages from feed producers via mpsc channel
//! 2. Decodes each message: a JSON-encoded `Post` keeps its supplied
//!    timestamp and origin (richer-adapter path); anything else is plain
//!    text stamped at the ingestion instant
//! 3. Drives the shared engine, logging throughput periodically
//!
//! Exactly one ingestion loop owns the receiving end of the channel, so
//! every message is ingested once no matter how many subscribers the
//! downstream fan-out serves.

use crate::trend::{EngineError, Post, SharedTrendEngine};
use tokio::sync::mpsc;

/// Ingest raw messages until the channel closes (producer shutdown).
pub async fn start_ingestion(mut rx: mpsc::Receiver<String>, engine: SharedTrendEngine) {
    log::info!("🚀 Starting feed ingestion");

    let mut total_count = 0u64;
    let mut interval_count = 0u64;
    let mut last_log_time = std::time::Instant::now();

    while let Some(raw) = rx.recv().await {
        let now_ms = chrono::Utc::now().timestamp_millis();

        let result = match serde_json::from_str::<Post>(&raw) {
            Ok(post) => engine.ingest_post(post, now_ms),
            Err(_) => engine.ingest(&raw, now_ms),
        };

        match result {
            Ok(trends) => {
                log::debug!("ingested message, {} trends current", trends.len());
            }
            Err(EngineError::StoreUnavailable) => {
                // Retryable per contract; this loop does not retry, the
                // message is reported and dropped.
                log::warn!("⚠️  Store unavailable, message dropped");
            }
        }

        total_count += 1;
        interval_count += 1;
        if last_log_time.elapsed().as_secs() >= 10 {
            let rate = interval_count as f64 / last_log_time.elapsed().as_secs_f64();
            log::info!("📊 Ingestion rate: {:.1} msgs/sec (total: {})", rate, total_count);
            last_log_time = std::time::Instant::now();
            interval_count = 0;
        }
    }

    log::info!("✅ Feed ingestion stopped (channel closed, {} messages)", total_count);
}
