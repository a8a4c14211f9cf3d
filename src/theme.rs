//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between the Day and Night palettes,
//! and `StyleMap` resolves role names to concrete styles. The toggle is
//! client-local and non-persistent: restarting always lands on Day.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Day,
    Night,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Some(Self::Day),
            "night" => Some(Self::Night),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Day => ColorPalette::day(),
            Self::Night => ColorPalette::night(),
        }
    }

    /// Cycle to the other variant: Day → Night → Day.
    pub fn next(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Sign-in screen --
    pub signin_title: Style,
    pub signin_text: Style,
    pub signin_hint: Style,

    // -- Header --
    pub header_title: Style,
    pub header_hint: Style,

    // -- Composer --
    pub composer_border: Style,
    pub composer_border_insert: Style,
    pub composer_text: Style,
    pub composer_count: Style,
    pub composer_count_over: Style,

    // -- Post cards --
    pub post_content: Style,
    pub post_author: Style,
    pub post_time: Style,
    pub post_selected: Style,
    pub post_reported: Style,
    pub post_own_marker: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
}

impl ColorPalette {
    /// Day palette — the default, matching the service's light start mode.
    fn day() -> Self {
        Self {
            signin_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            signin_text: Style::default().fg(Color::Black),
            signin_hint: Style::default().fg(Color::DarkGray),

            header_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_hint: Style::default().fg(Color::DarkGray),

            composer_border: Style::default().fg(Color::DarkGray),
            composer_border_insert: Style::default().fg(Color::Blue),
            composer_text: Style::default().fg(Color::Black),
            composer_count: Style::default().fg(Color::DarkGray),
            composer_count_over: Style::default().fg(Color::Red),

            post_content: Style::default().fg(Color::Black),
            post_author: Style::default().fg(Color::Blue),
            post_time: Style::default().fg(Color::DarkGray),
            post_selected: Style::default().bg(Color::Blue).fg(Color::White),
            post_reported: Style::default().fg(Color::Red),
            post_own_marker: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
        }
    }

    /// Night palette — the dark counterpart of the theme toggle.
    fn night() -> Self {
        Self {
            signin_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            signin_text: Style::default(),
            signin_hint: Style::default().fg(Color::DarkGray),

            header_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_hint: Style::default().fg(Color::DarkGray),

            composer_border: Style::default(),
            composer_border_insert: Style::default().fg(Color::Cyan),
            composer_text: Style::default(),
            composer_count: Style::default().fg(Color::DarkGray),
            composer_count_over: Style::default().fg(Color::Red),

            post_content: Style::default(),
            post_author: Style::default().fg(Color::Cyan),
            post_time: Style::default().fg(Color::DarkGray),
            post_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            post_reported: Style::default().fg(Color::Red),
            post_own_marker: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"post_author"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 18] = [
    "signin_title",
    "signin_text",
    "signin_hint",
    "header_title",
    "header_hint",
    "composer_border",
    "composer_border_insert",
    "composer_text",
    "composer_count",
    "composer_count_over",
    "post_content",
    "post_author",
    "post_time",
    "post_selected",
    "post_reported",
    "post_own_marker",
    "status_bar",
    "panel_border",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 18] = [
            p.signin_title,
            p.signin_text,
            p.signin_hint,
            p.header_title,
            p.header_hint,
            p.composer_border,
            p.composer_border_insert,
            p.composer_text,
            p.composer_count,
            p.composer_count_over,
            p.post_content,
            p.post_author,
            p.post_time,
            p.post_selected,
            p.post_reported,
            p.post_own_marker,
            p.status_bar,
            p.panel_border,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
