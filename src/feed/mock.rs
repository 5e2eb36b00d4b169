//! Synthetic feed generator for development and demos

use super::{FeedError, PostSource};
use crate::trend::{Post, PostOrigin};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

const SAMPLE_HASHTAGS: &[&str] = &[
    "#technology",
    "#coding",
    "#javascript",
    "#typescript",
    "#webdev",
    "#programming",
    "#react",
    "#nodejs",
    "#frontend",
    "#backend",
    "#fullstack",
    "#development",
];

const SAMPLE_TEXTS: &[&str] = &[
    "Just working on a new project",
    "Learning something new today",
    "Building amazing things",
    "Coding time!",
    "Making progress",
];

/// Emits one synthetic post message at a fixed interval, standing in for a
/// live social feed during development.
pub struct MockFeedProducer {
    interval_ms: u64,
}

impl MockFeedProducer {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    /// Compose one random message: a sample text plus 1-3 distinct sample
    /// hashtags.
    pub fn generate_message(&self) -> String {
        let mut rng = rand::thread_rng();
        let text = SAMPLE_TEXTS
            .choose(&mut rng)
            .copied()
            .unwrap_or("Making progress");

        let tag_count = rng.gen_range(1..=3);
        let tags: Vec<&str> = SAMPLE_HASHTAGS
            .choose_multiple(&mut rng, tag_count)
            .copied()
            .collect();

        format!("{} {}", text, tags.join(" "))
    }

    /// Produce messages into the ingestion channel until the receiver is
    /// dropped.
    pub async fn run(self, tx: mpsc::Sender<String>) {
        log::info!("🎲 Mock feed producer started (interval: {}ms)", self.interval_ms);

        let mut timer = interval(Duration::from_millis(self.interval_ms));
        loop {
            timer.tick().await;

            let message = self.generate_message();
            if tx.send(message.clone()).await.is_err() {
                log::warn!("⚠️  Ingestion channel closed, stopping mock feed");
                break;
            }
            log::debug!("mock post sent: {}", message);
        }
    }
}

#[async_trait]
impl PostSource for MockFeedProducer {
    /// Batch variant of the generator: a handful of pre-built posts stamped
    /// with the current wall clock, mirroring what a real adapter returns.
    async fn fetch_posts(&self) -> Result<Vec<Post>, FeedError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let extractor = crate::trend::HashtagExtractor::new();

        let posts = (0..5)
            .map(|i| {
                let text = self.generate_message();
                let hashtags = extractor.extract(&text);
                Post {
                    id: format!("mock-{}-{}", now_ms, i),
                    text,
                    origin: PostOrigin::Mock,
                    timestamp: now_ms,
                    hashtags,
                }
            })
            .collect();

        Ok(posts)
    }

    fn validate_post(&self, post: &Post) -> bool {
        post.check_invariants().is_ok()
    }
}
