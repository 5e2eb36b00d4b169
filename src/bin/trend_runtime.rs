//! Trend Runtime - runnable host for the hashtag trend engine
//!
//! Wires together:
//! - Mock feed producer (synthetic social posts)
//! - Channel ingestion into the shared trend engine
//! - Prune scheduler publishing top trends to the configured sink
//!
//! Usage:
//!   cargo run --release --bin trend_runtime
//!
//! Environment variables: see `EngineConfig::from_env` (TAGFLOW_*).

use dotenv::dotenv;
use log::info;
use std::sync::Arc;
use tagflow::feed::LogTrendSink;
use tagflow::ingestion::start_ingestion;
use tagflow::scheduler::prune_scheduler_task;
use tagflow::{EngineConfig, MockFeedProducer, SharedTrendEngine};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = EngineConfig::from_env();

    info!("🚀 Trend Runtime");
    info!("   ├─ Window: {}ms", config.window_ms);
    info!("   ├─ Strategy: {}", config.strategy.as_str());
    info!("   ├─ Half-life: {}h", config.half_life_hours);
    info!("   ├─ Prune interval: {}ms", config.prune_interval_ms);
    info!("   └─ Top limit: {}", config.top_limit);

    let engine = SharedTrendEngine::new(config.build_engine());
    let (tx, rx) = mpsc::channel::<String>(config.channel_buffer);

    let producer = MockFeedProducer::new(config.mock_feed_interval_ms);
    let feed_task = tokio::spawn(producer.run(tx));

    let ingestion_task = tokio::spawn(start_ingestion(rx, engine.clone()));

    let sink = Arc::new(LogTrendSink);
    let scheduler_task = tokio::spawn(prune_scheduler_task(
        engine.clone(),
        sink,
        config.prune_interval_ms,
        config.top_limit,
    ));

    info!("✅ All tasks started, press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;

    info!("🔄 Shutting down...");
    feed_task.abort();
    scheduler_task.abort();
    // Dropping the producer closes the channel; ingestion drains and exits.
    let _ = ingestion_task.await;

    info!("✅ Shutdown complete");
    Ok(())
}
