//! Sign-in screen widget.
//!
//! Shown whenever no identity is present. Everything else in the UI is
//! gated behind sign-in.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    // Center the welcome block vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area);

    let action = if app.signing_in {
        Line::from(Span::styled("Signing in...", app.style("signin_hint")))
    } else {
        Line::from(Span::styled(
            "[s] sign in    [t] theme    [q] quit",
            app.style("signin_hint"),
        ))
    };

    let lines = vec![
        Line::from(Span::styled("Welcome to chirp", app.style("signin_title"))),
        Line::from(""),
        Line::from(Span::styled(
            "Sign in to start posting and see what others are posting about.",
            app.style("signin_text"),
        )),
        Line::from(Span::styled(
            "(Posts are auto-deleted every day)",
            app.style("signin_hint"),
        )),
        Line::from(""),
        action,
    ];

    let welcome = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(welcome, chunks[1]);
}
