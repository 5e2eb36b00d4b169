//! Windowed retention buffer for validated posts

use super::post::{Post, ValidationError};

/// Default retention window: 1 hour.
pub const DEFAULT_WINDOW_MS: i64 = 60 * 60 * 1000;

/// Arrival-ordered buffer of posts inside the retention window.
///
/// The store holds no locking of its own; the engine serializes all access,
/// so a `snapshot()` borrow is consistent for as long as it is held.
pub struct PostStore {
    posts: Vec<Post>,
    window_ms: i64,
}

impl PostStore {
    pub fn new(window_ms: i64) -> Self {
        Self {
            posts: Vec::new(),
            window_ms,
        }
    }

    /// Append a post after normalizing its hashtags and re-checking the
    /// model invariants.
    ///
    /// Adapter-built posts go through the same gate as raw-text posts:
    /// casing and duplicates collapse first, the hashtag bound applies to
    /// the collapsed set, and grammar violations reject. Nothing in the
    /// window can violate the bounds, and rejection leaves the buffer
    /// untouched.
    pub fn append(&mut self, mut post: Post) -> Result<(), ValidationError> {
        post.normalize_hashtags();
        post.check_invariants()?;
        self.posts.push(post);
        Ok(())
    }

    /// Drop every post older than the retention window as of `now_ms`.
    pub fn prune(&mut self, now_ms: i64) {
        let cutoff = now_ms - self.window_ms;
        self.posts.retain(|p| p.timestamp >= cutoff);
    }

    /// Read-only view of the retained posts, in arrival order.
    pub fn snapshot(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::post::PostOrigin;

    fn make_post(id: &str, timestamp: i64, tags: &[&str]) -> Post {
        Post {
            id: id.to_string(),
            text: format!("post {}", id),
            origin: PostOrigin::Test,
            timestamp,
            hashtags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_append_and_snapshot_order() {
        let mut store = PostStore::new(DEFAULT_WINDOW_MS);

        store.append(make_post("a", 1_000, &["#a"])).unwrap();
        store.append(make_post("b", 500, &["#b"])).unwrap();

        let ids: Vec<&str> = store.snapshot().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]); // arrival order, not timestamp order
    }

    #[test]
    fn test_append_rejects_invalid_post() {
        let mut store = PostStore::new(DEFAULT_WINDOW_MS);
        let mut post = make_post("a", 1_000, &[]);
        post.text = "x".repeat(281);

        assert!(store.append(post).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_normalizes_adapter_hashtags() {
        let mut store = PostStore::new(DEFAULT_WINDOW_MS);

        store
            .append(make_post("a", 1_000, &["#test", "#test", "#TEST"]))
            .unwrap();

        // Stored with the collapsed, lowercased set
        assert_eq!(store.snapshot()[0].hashtags, vec!["#test".to_string()]);
    }

    #[test]
    fn test_append_applies_hashtag_bound_after_collapse() {
        let mut store = PostStore::new(DEFAULT_WINDOW_MS);

        // 60 raw tags, but only 30 distinct after collapse: within bounds
        let tags: Vec<String> = (0..60).map(|i| format!("#t{}", i % 30)).collect();
        let refs: Vec<&str> = tags.iter().map(String::as_str).collect();

        assert!(store.append(make_post("a", 1_000, &refs)).is_ok());
        assert_eq!(store.snapshot()[0].hashtags.len(), 30);
    }

    #[test]
    fn test_append_rejects_malformed_adapter_hashtag() {
        let mut store = PostStore::new(DEFAULT_WINDOW_MS);

        assert!(store.append(make_post("a", 1_000, &["#ok", "not a tag"])).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_prune_drops_expired_posts() {
        let mut store = PostStore::new(DEFAULT_WINDOW_MS);
        let t0 = 1_000;

        store.append(make_post("old", t0, &["#a"])).unwrap();
        store.append(make_post("new", t0 + DEFAULT_WINDOW_MS, &["#b"])).unwrap();

        // 1ms past the old post's window
        store.prune(t0 + DEFAULT_WINDOW_MS + 1);

        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].id, "new");
    }

    #[test]
    fn test_prune_keeps_post_exactly_at_window_edge() {
        let mut store = PostStore::new(DEFAULT_WINDOW_MS);
        store.append(make_post("edge", 1_000, &["#a"])).unwrap();

        store.prune(1_000 + DEFAULT_WINDOW_MS);

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_prune_empties_store() {
        let mut store = PostStore::new(1_000);
        store.append(make_post("a", 0, &["#a"])).unwrap();

        store.prune(2_000);

        assert!(store.is_empty());
    }
}
