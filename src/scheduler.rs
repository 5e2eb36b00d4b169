//! Periodic prune-and-publish scheduler
//!
//! The engine never runs its own timers; this task owns the wall clock,
//! ticks the engine at a fixed interval, and hands the fresh top-K list to
//! the fan-out sink. Dropping the task stops future firings; a tick already
//! holding the engine lock runs to completion.

use crate::feed::TrendSink;
use crate::trend::SharedTrendEngine;
use std::sync::Arc;
use tokio::time::{interval, Duration};

/// Tick the engine every `prune_interval_ms`, then publish the current top
/// `limit` trends. Runs until the task is aborted.
pub async fn prune_scheduler_task(
    engine: SharedTrendEngine,
    sink: Arc<dyn TrendSink + Send + Sync>,
    prune_interval_ms: u64,
    limit: usize,
) {
    log::info!("⏰ Starting prune scheduler (interval: {}ms)", prune_interval_ms);

    let mut timer = interval(Duration::from_millis(prune_interval_ms));

    loop {
        timer.tick().await;

        let now_ms = chrono::Utc::now().timestamp_millis();

        if let Err(e) = engine.tick(now_ms) {
            // Retryable; the next tick will try again.
            log::warn!("⚠️  Tick skipped: {}", e);
            continue;
        }

        match engine.query_top(limit, now_ms) {
            Ok(trends) => {
                if trends.is_empty() {
                    log::debug!("no live trends to publish");
                    continue;
                }
                sink.publish(trends).await;
            }
            Err(e) => {
                log::warn!("⚠️  Query skipped: {}", e);
            }
        }
    }
}
