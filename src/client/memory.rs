//! In-memory service transport.
//!
//! A local stand-in for the managed document/auth service, used by tests and
//! `--offline` runs. It reproduces the service's observable contract: every
//! mutation publishes a fresh full snapshot, sorted by `createdAt`
//! descending, to all live watchers. There is no diffing and no per-document
//! notification — the latest snapshot always wins.

use super::types::{ClientError, Identity, NewPost, Post};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Capacity of the snapshot fan-out channel. Watchers that lag simply skip
/// to a newer snapshot; full replacement makes skipped deliveries harmless.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

#[derive(Clone)]
pub struct MemoryService {
    inner: Arc<Inner>,
}

struct Inner {
    posts: Mutex<Vec<Post>>,
    snapshots: broadcast::Sender<Vec<Post>>,
    next_id: AtomicU64,
    identity: Identity,
}

impl MemoryService {
    pub fn new(identity: Identity) -> Self {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                posts: Mutex::new(Vec::new()),
                snapshots,
                next_id: AtomicU64::new(1),
                identity,
            }),
        }
    }

    /// The identity the embedded provider hands out on sign-in.
    pub fn sign_in(&self) -> Identity {
        self.inner.identity.clone()
    }

    pub fn add(&self, draft: NewPost) -> String {
        let id = format!("post-{}", self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        {
            let mut posts = self.lock_posts();
            posts.push(Post {
                id: id.clone(),
                content: draft.content,
                user_id: draft.user_id,
                user_name: draft.user_name,
                created_at: draft.created_at,
                report_count: draft.report_count,
            });
        }
        self.publish();
        id
    }

    /// Delete by id. Like the real service, deleting a missing document is
    /// silently successful.
    pub fn delete(&self, id: &str) {
        let removed = {
            let mut posts = self.lock_posts();
            let before = posts.len();
            posts.retain(|p| p.id != id);
            before != posts.len()
        };
        if removed {
            self.publish();
        }
    }

    /// Atomic +1 on `reportCount`. Updating a missing document is an error,
    /// matching the real service's update semantics.
    pub fn report(&self, id: &str) -> Result<(), ClientError> {
        {
            let mut posts = self.lock_posts();
            let post = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
            post.report_count += 1;
        }
        self.publish();
        Ok(())
    }

    /// Begin watching: returns the current snapshot plus a receiver for
    /// every subsequent one.
    pub fn watch(&self) -> (Vec<Post>, broadcast::Receiver<Vec<Post>>) {
        let rx = self.inner.snapshots.subscribe();
        (self.snapshot(), rx)
    }

    /// Current full snapshot, ordered `createdAt` descending — the ordering
    /// the service reports, so watchers never re-sort locally.
    pub fn snapshot(&self) -> Vec<Post> {
        let mut posts = self.lock_posts().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    fn publish(&self) {
        // No receivers is fine; send only fails when nobody is watching.
        let _ = self.inner.snapshots.send(self.snapshot());
    }

    fn lock_posts(&self) -> std::sync::MutexGuard<'_, Vec<Post>> {
        // Lock poisoning only happens if a holder panicked mid-mutation;
        // the post list is still structurally valid, so continue with it.
        self.inner
            .posts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn test_service() -> MemoryService {
        MemoryService::new(Identity {
            uid: "u1".into(),
            display_name: "Jane Doe".into(),
        })
    }

    fn draft(content: &str, age: Duration) -> NewPost {
        NewPost {
            content: content.into(),
            user_id: "u1".into(),
            user_name: "Jane Doe".into(),
            created_at: Utc::now() - age,
            report_count: 0,
        }
    }

    #[test]
    fn add_assigns_unique_ids() {
        let svc = test_service();
        let a = svc.add(draft("one", Duration::zero()));
        let b = svc.add(draft("two", Duration::zero()));
        assert_ne!(a, b);
    }

    #[test]
    fn snapshot_is_newest_first() {
        let svc = test_service();
        svc.add(draft("old", Duration::hours(2)));
        svc.add(draft("new", Duration::zero()));
        let snap = svc.snapshot();
        assert_eq!(snap[0].content, "new");
        assert_eq!(snap[1].content, "old");
    }

    #[test]
    fn delete_missing_is_silent() {
        let svc = test_service();
        svc.delete("no-such-id");
        assert!(svc.snapshot().is_empty());
    }

    #[test]
    fn report_missing_is_error() {
        let svc = test_service();
        let err = svc.report("no-such-id").unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[test]
    fn report_increments() {
        let svc = test_service();
        let id = svc.add(draft("p", Duration::zero()));
        svc.report(&id).unwrap();
        svc.report(&id).unwrap();
        assert_eq!(svc.snapshot()[0].report_count, 2);
    }

    #[tokio::test]
    async fn mutation_publishes_snapshot() {
        let svc = test_service();
        let (initial, mut rx) = svc.watch();
        assert!(initial.is_empty());

        svc.add(draft("hello", Duration::zero()));
        let snap = rx.recv().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].content, "hello");
    }
}
