//! Input handling for the TUI.
//!
//! Routes keyboard input based on current view and composer mode. The
//! composer implements the `empty → has-text → (submit) → empty` state
//! machine: a valid submit clears it immediately (without waiting for the
//! service acknowledgment), an out-of-range submit warns and keeps the
//! text, an empty submit is silently ignored.

use crate::app::{App, View};
use crate::feed::{self, ComposeError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers;
use super::Action;
use crate::app::AppEvent;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match app.view() {
        View::SignIn => Ok(handle_signin_input(app, code, event_tx)),
        View::Feed => {
            if app.insert_mode {
                Ok(handle_composer_input(app, code, modifiers))
            } else {
                Ok(handle_feed_input(app, code))
            }
        }
    }
}

/// Sign-in screen: `s` starts the provider flow, `t` toggles theme, `q` quits.
fn handle_signin_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) -> Action {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('s') | KeyCode::Enter => {
            if !app.signing_in {
                app.signing_in = true;
                app.set_status("Signing in...");
                helpers::spawn_sign_in(app.session.clone(), event_tx.clone());
            }
        }
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        _ => {}
    }
    Action::Continue
}

/// Feed navigation and post actions.
fn handle_feed_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,

        KeyCode::Char('o') => {
            // present → none: teardown happens before the provider call so
            // no further pushes can land.
            app.end_session();
            helpers::spawn_sign_out(app.session.clone());
            app.set_status("Signed out");
        }

        KeyCode::Char('i') => {
            app.insert_mode = true;
        }

        KeyCode::Char('j') | KeyCode::Down => app.select_down(),
        KeyCode::Char('k') | KeyCode::Up => app.select_up(),

        KeyCode::Char('d') => {
            // Offered only for the viewer's own posts; the service itself
            // would accept any delete by id.
            if let Some(post) = app.selected_post() {
                if app.is_own_post(post) {
                    let id = post.id.clone();
                    helpers::spawn_delete(app.client.clone(), id);
                    app.set_status("Post deleted");
                }
            }
        }

        KeyCode::Char('x') => {
            if let Some(post) = app.selected_post() {
                let post = post.clone();
                helpers::spawn_report(app.client.clone(), &post);
                app.set_status("Post reported");
            }
        }

        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }

        KeyCode::Char('f') => {
            let name = app.toggle_label_mode();
            app.set_status(format!("New posts labeled with {}", name));
        }

        _ => {}
    }
    Action::Continue
}

/// Composer editing while in insert mode.
fn handle_composer_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Esc => {
            app.insert_mode = false;
        }
        KeyCode::Enter => submit_post(app),
        KeyCode::Backspace => {
            app.composer_input.pop();
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.composer_input.clear();
        }
        KeyCode::Char(c) => {
            // Control characters never reach the stored post
            if !c.is_control() {
                app.composer_input.push(c);
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Validate and submit the composer.
fn submit_post(app: &mut App) {
    match feed::validate_content(&app.composer_input) {
        // Whitespace-only: no warning, no network call, composer unchanged
        Err(ComposeError::Empty) => {}
        Err(e @ ComposeError::Length) => {
            app.set_status(e.to_string());
        }
        Ok(()) => {
            let Some(identity) = app.identity.clone() else {
                return;
            };
            let draft = feed::build_draft(&app.composer_input, &identity, app.label_mode);
            helpers::spawn_create(app.client.clone(), draft);
            // Cleared on acceptance, not on acknowledgment
            app.composer_input.clear();
        }
    }
}
