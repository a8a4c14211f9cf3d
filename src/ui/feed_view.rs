//! Feed view: header, composer, and the live post list.

use crate::app::App;
use crate::feed::{LabelMode, MAX_CONTENT_LEN};
use crate::util::truncate_to_width;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(5), // composer
            Constraint::Min(0),   // posts
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_composer(f, app, chunks[1]);
    render_posts(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(34)])
        .split(area);

    let title = Paragraph::new(Span::styled("chirp", app.style("header_title")));
    f.render_widget(title, columns[0]);

    let hints = Paragraph::new(Span::styled(
        "[t] theme  [f] label  [o] sign out",
        app.style("header_hint"),
    ))
    .alignment(Alignment::Right);
    f.render_widget(hints, columns[1]);
}

fn render_composer(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.insert_mode {
        app.style("composer_border_insert")
    } else {
        app.style("composer_border")
    };

    let title = if app.insert_mode {
        " Compose — Enter posts, Esc leaves "
    } else {
        " Compose — press i to write "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let input = Paragraph::new(Span::styled(
        app.composer_input.as_str(),
        app.style("composer_text"),
    ))
    .wrap(Wrap { trim: false });
    f.render_widget(input, rows[0]);

    // Live character count plus the label-mode checkbox
    let count = app.composer_input.chars().count();
    let count_style = if count > MAX_CONTENT_LEN {
        app.style("composer_count_over")
    } else {
        app.style("composer_count")
    };
    let checkbox = match app.label_mode {
        LabelMode::FullName => "[x] display name",
        LabelMode::Initials => "[ ] display name",
    };
    let meta = Paragraph::new(Line::from(vec![
        Span::styled(format!("{}/{}", count, MAX_CONTENT_LEN), count_style),
        Span::raw("  "),
        Span::styled(checkbox, app.style("composer_count")),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(meta, rows[1]);
}

fn render_posts(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(" Feed ");
    let inner_width = block.inner(area).width as usize;

    let items: Vec<ListItem> = app
        .posts
        .iter()
        .map(|post| {
            let content = truncate_to_width(&post.content, inner_width);
            let time = post
                .created_at
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string();

            let mut meta = vec![
                Span::styled(format!("- @{}", post.user_name), app.style("post_author")),
                Span::raw("  "),
                Span::styled(time, app.style("post_time")),
            ];
            if post.report_count > 0 {
                meta.push(Span::raw("  "));
                meta.push(Span::styled(
                    format!("⚠ {}", post.report_count),
                    app.style("post_reported"),
                ));
            }
            if app.is_own_post(post) {
                meta.push(Span::raw("  "));
                meta.push(Span::styled("yours · d deletes", app.style("post_own_marker")));
            } else {
                meta.push(Span::raw("  "));
                meta.push(Span::styled("x reports", app.style("post_time")));
            }

            ListItem::new(vec![
                Line::from(Span::styled(
                    content.into_owned(),
                    app.style("post_content"),
                )),
                Line::from(meta),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.style("post_selected"));

    let mut state = ListState::default();
    if !app.posts.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}
