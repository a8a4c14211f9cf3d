//! chirp — a terminal client for an ephemeral micro-posting service.
//!
//! All persistence, authentication, and real-time fan-out are delegated to
//! the managed service behind [`client::Client`]. This crate owns the thin
//! parts: session and feed state, composer validation, the report threshold,
//! the daily purge sweep, and the terminal UI.

pub mod app;
pub mod client;
pub mod config;
pub mod feed;
pub mod session;
pub mod theme;
pub mod ui;
pub mod util;
