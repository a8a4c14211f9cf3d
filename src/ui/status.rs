//! Status bar widget.
//!
//! Shows the transient status message when one is live, otherwise a short
//! keybinding hint for the current view.

use crate::app::{App, View};
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let text: &str = match &app.status_message {
        Some((msg, _)) => msg,
        None => match app.view() {
            View::SignIn => " s: sign in · q: quit",
            View::Feed => {
                if app.insert_mode {
                    " Enter: post · Esc: done · Ctrl+U: clear"
                } else {
                    " i: compose · j/k: move · d: delete · x: report · q: quit"
                }
            }
        },
    };

    let bar = Paragraph::new(Span::styled(text, app.style("status_bar")))
        .style(app.style("status_bar"));
    f.render_widget(bar, area);
}
