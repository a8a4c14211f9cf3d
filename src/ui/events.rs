//! Application event handling.
//!
//! Processes background task completion events: sign-in outcomes and
//! delivered snapshots. Snapshot delivery is also what drives the purge
//! sweep — there is no separate timer.

use crate::app::{App, AppEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::helpers;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::SignInFinished(Ok(identity)) => {
            let name = identity.display_name.clone();
            app.begin_session(identity);

            // none → present: (re)establish the feed subscription
            let generation = app.next_subscription_generation();
            let handle =
                helpers::spawn_subscription(app.client.clone(), generation, event_tx.clone());
            app.install_subscription(handle);

            app.set_status(format!("Signed in as {}", name));
        }
        AppEvent::SignInFinished(Err(e)) => {
            // The provider surfaces its own detail; we log and move on.
            tracing::warn!(error = %e, "Sign-in failed");
            app.signing_in = false;
            app.needs_redraw = true;
            app.set_status("Sign-in failed");
        }
        AppEvent::Snapshot { generation, posts } => {
            if app.apply_snapshot(generation, posts) {
                // Purge is evaluated once per delivered snapshot.
                helpers::spawn_purge_sweep(app.client.clone(), Arc::clone(&app.posts));
            }
        }
    }
}
