//! Background task spawns.
//!
//! Every service mutation goes through here as a fire-and-forget
//! `tokio::spawn`: the caller never blocks on acknowledgment, failures are
//! logged to the diagnostic channel and otherwise swallowed — no retry, no
//! rollback, no user-facing error. The next pushed snapshot is the only
//! confirmation any mutation gets.

use crate::app::AppEvent;
use crate::client::{Client, NewPost, Post};
use crate::feed::{self, ReportOutcome};
use crate::session::Session;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Spawn the provider's interactive sign-in flow. The outcome comes back as
/// an `AppEvent::SignInFinished`.
pub(super) fn spawn_sign_in(session: Session, event_tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let result = session.sign_in().await.map_err(|e| e.to_string());
        if let Err(e) = event_tx.send(AppEvent::SignInFinished(result)).await {
            tracing::warn!(error = %e, "Failed to deliver sign-in result (receiver dropped)");
        }
    });
}

/// Best-effort provider sign-out. The local session is already cleared by
/// the time this runs.
pub(super) fn spawn_sign_out(session: Session) {
    tokio::spawn(async move {
        session.sign_out().await;
    });
}

/// Spawn the watch subscription for the given generation. The task forwards
/// every delivered snapshot tagged with its generation; the event handler
/// drops anything stale. Aborting the returned handle is the teardown path.
pub(super) fn spawn_subscription(
    client: Client,
    generation: u64,
    event_tx: mpsc::Sender<AppEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut snapshots = match client.watch().await {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open watch subscription");
                return;
            }
        };
        tracing::debug!(generation, "Watch subscription established");
        while let Some(posts) = snapshots.next_snapshot().await {
            let event = AppEvent::Snapshot { generation, posts };
            if event_tx.send(event).await.is_err() {
                // Event loop is gone; nothing left to deliver to.
                return;
            }
        }
        tracing::debug!(generation, "Watch stream ended");
    })
}

/// Persist a new post. The composer was already cleared; success is
/// observed through the next snapshot.
pub(super) fn spawn_create(client: Client, draft: NewPost) {
    tokio::spawn(async move {
        if let Err(e) = client.add(&draft).await {
            tracing::warn!(error = %e, "Error creating post");
        }
    });
}

/// Hard delete by id.
pub(super) fn spawn_delete(client: Client, post_id: String) {
    tokio::spawn(async move {
        if let Err(e) = client.delete(&post_id).await {
            tracing::warn!(error = %e, post_id, "Error deleting post");
        }
    });
}

/// Report a post: increment below the threshold, delete at or past it.
pub(super) fn spawn_report(client: Client, post: &Post) {
    let post_id = post.id.clone();
    match feed::report_outcome_for(post) {
        ReportOutcome::Delete => spawn_delete(client, post_id),
        ReportOutcome::Increment => {
            tokio::spawn(async move {
                if let Err(e) = client.report(&post_id).await {
                    tracing::warn!(error = %e, post_id, "Error reporting post");
                }
            });
        }
    }
}

/// Sweep the delivered snapshot for posts created yesterday (in the
/// service's fixed timezone) and delete them. Runs once per snapshot
/// delivery — there is no standalone purge timer.
pub(super) fn spawn_purge_sweep(client: Client, posts: Arc<Vec<Post>>) {
    let stale = feed::stale_post_ids(&posts, Utc::now());
    if stale.is_empty() {
        return;
    }
    tracing::info!(count = stale.len(), "Purging stale posts");
    tokio::spawn(async move {
        for post_id in stale {
            if let Err(e) = client.delete(&post_id).await {
                tracing::warn!(error = %e, post_id, "Error purging stale post");
            }
        }
    });
}
