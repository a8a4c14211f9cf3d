use crate::client::{Client, Identity, Post};
use crate::feed::LabelMode;
use crate::session::Session;
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::time::Instant;

// ============================================================================
// View
// ============================================================================

/// Current view, derived from session state: every screen other than
/// sign-in is gated behind the presence of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SignIn,
    Feed,
}

// ============================================================================
// Events from background tasks
// ============================================================================

pub enum AppEvent {
    /// Interactive sign-in finished. Errors carry only a display string;
    /// the provider surfaces its own detail and we do not retry.
    SignInFinished(Result<Identity, String>),
    /// The watch subscription delivered a full snapshot of the collection.
    ///
    /// `generation` is the subscription generation this snapshot belongs
    /// to. Snapshots from a torn-down subscription carry a stale generation
    /// and are dropped, so no push lands after sign-out.
    Snapshot {
        generation: u64,
        posts: Vec<Post>,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
///
/// The external service is the sole source of truth: `posts` is only ever
/// replaced wholesale by a delivered snapshot, never merged or re-sorted
/// locally. Nothing here persists across restarts.
pub struct App {
    pub client: Client,
    pub session: Session,

    // Session state
    pub identity: Option<Identity>,
    /// Sign-in request in flight; blocks duplicate attempts.
    pub signing_in: bool,

    // Feed state
    /// Latest delivered snapshot, newest-first as the service reports it.
    /// Arc so renders and background sweeps share it without cloning.
    pub posts: Arc<Vec<Post>>,
    pub selected: usize,

    // Composer
    pub composer_input: String,
    /// Insert mode routes keystrokes into the composer.
    pub insert_mode: bool,
    /// Label mode for the *next* post only; existing posts keep the label
    /// they were created with.
    pub label_mode: LabelMode,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    // Subscription lifecycle
    subscription: Option<tokio::task::JoinHandle<()>>,
    /// Bumped on every subscription start and teardown. Snapshot events are
    /// only applied when their generation matches, which suppresses stale
    /// pushes from aborted watch tasks.
    subscription_generation: u64,

    // Status message with expiry — Cow avoids allocation for static literals
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,
}

impl App {
    pub fn new(client: Client, session: Session, theme_variant: ThemeVariant) -> Self {
        Self {
            client,
            session,
            identity: None,
            signing_in: false,
            posts: Arc::new(Vec::new()),
            selected: 0,
            composer_input: String::new(),
            insert_mode: false,
            label_mode: LabelMode::FullName,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            subscription: None,
            subscription_generation: 0,
            status_message: None,
            needs_redraw: true,
        }
    }

    pub fn view(&self) -> View {
        if self.identity.is_some() {
            View::Feed
        } else {
            View::SignIn
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Day → Night → Day).
    ///
    /// Returns the name of the new theme for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Flip the label mode for subsequent posts. Display-only toggle with
    /// no external effect until the next post is created.
    pub fn toggle_label_mode(&mut self) -> &'static str {
        self.label_mode = self.label_mode.toggled();
        self.needs_redraw = true;
        self.label_mode.name()
    }

    // ========================================================================
    // Subscription lifecycle
    // ========================================================================

    /// Reserve the generation for a subscription about to be spawned.
    /// Any snapshot tagged with an older generation is dropped.
    pub fn next_subscription_generation(&mut self) -> u64 {
        self.subscription_generation = self.subscription_generation.wrapping_add(1);
        self.subscription_generation
    }

    /// Install the watch task for the current generation, aborting any
    /// previous one.
    pub fn install_subscription(&mut self, handle: tokio::task::JoinHandle<()>) {
        if let Some(old) = self.subscription.replace(handle) {
            old.abort();
            tracing::debug!("Aborted previous watch subscription");
        }
    }

    pub fn has_subscription(&self) -> bool {
        self.subscription.is_some()
    }

    /// Apply a delivered snapshot if it belongs to the live subscription.
    ///
    /// Full replacement, no merge: the latest snapshot always wins. Returns
    /// false for stale generations or when signed out, in which case state
    /// is untouched.
    pub fn apply_snapshot(&mut self, generation: u64, posts: Vec<Post>) -> bool {
        if self.identity.is_none() || generation != self.subscription_generation {
            tracing::debug!(
                generation,
                current = self.subscription_generation,
                "Dropping stale snapshot"
            );
            return false;
        }
        self.posts = Arc::new(posts);
        self.clamp_selection();
        self.needs_redraw = true;
        true
    }

    /// Begin the signed-in session: store the identity. The caller spawns
    /// the subscription for the generation it reserved.
    pub fn begin_session(&mut self, identity: Identity) {
        self.identity = Some(identity);
        self.signing_in = false;
        self.needs_redraw = true;
    }

    /// Tear the session down: abort the watch task, invalidate its
    /// generation, and clear all feed state. In-flight mutations are not
    /// cancelled and may still complete against the service.
    pub fn end_session(&mut self) {
        if let Some(handle) = self.subscription.take() {
            handle.abort();
            tracing::debug!("Aborted watch subscription on sign-out");
        }
        self.subscription_generation = self.subscription_generation.wrapping_add(1);
        self.identity = None;
        self.posts = Arc::new(Vec::new());
        self.selected = 0;
        self.composer_input.clear();
        self.insert_mode = false;
        self.needs_redraw = true;
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Clamp the selection index after the post list changes. Snapshots can
    /// shrink the list at any time.
    pub fn clamp_selection(&mut self) {
        self.selected = if self.posts.is_empty() {
            0
        } else {
            self.selected.min(self.posts.len().saturating_sub(1))
        };
    }

    /// Currently selected post (bounds-checked).
    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    /// Whether the viewer authored this post. This is the only delete
    /// authorization anywhere: the service itself accepts any delete by id.
    pub fn is_own_post(&self, post: &Post) -> bool {
        self.identity
            .as_ref()
            .map(|id| id.uid == post.user_id)
            .unwrap_or(false)
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if !self.posts.is_empty() {
            let max = self.posts.len().saturating_sub(1);
            self.selected = self.selected.saturating_add(1).min(max);
        }
    }

    // ========================================================================
    // Status message
    // ========================================================================

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds).
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort the live watch task when the app is dropped so no orphaned tokio
/// task outlives the event loop.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.subscription.take() {
            handle.abort();
            tracing::debug!("Aborted watch subscription on App drop");
        }
    }
}
