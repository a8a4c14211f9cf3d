//! Terminal User Interface module.
//!
//! This module provides the TUI for the posting client, including:
//! - Main event loop (`run`)
//! - Input handling for the sign-in screen, feed navigation, and the composer
//! - Rendering for the sign-in screen, post feed, and status bar
//! - Background task event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `helpers` - Background task spawns (all service mutations)
//! - `render` - View rendering dispatch
//! - `signin` - Sign-in screen widget
//! - `feed_view` - Header, composer, and post list widgets
//! - `status` - Status bar widget

mod events;
mod feed_view;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod signin;
mod status;

// Re-export the public API
pub use loop_runner::{run, Action};
