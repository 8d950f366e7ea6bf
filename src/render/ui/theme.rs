//! Color theme and line styling using ratatui colors
//!
//! [`LineStyle`] is the surface-neutral style record derived from a [`LineKind`]; the terminal
//! UI and the plain stdout writer each translate it into their own styling.

use crate::render::lines::LineKind;
use ratatui::style::{Color, Modifier, Style};

/// Accent used for citation lines (`#3b82f6`).
pub const ACCENT_BLUE: Color = Color::Rgb(0x3b, 0x82, 0xf6);

/// Blank rows after a prose line.
pub const PROSE_MARGIN_BOTTOM: u16 = 1;

/// Font weight as far as a terminal can express it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    SemiBold,
}

/// Presentation values for one rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    /// Blank rows inserted after the line
    pub margin_bottom: u16,
    pub weight: FontWeight,
    /// `None` inherits the surrounding color
    pub color: Option<Color>,
}

impl LineStyle {
    /// Derive the style for a line kind. Pure: depends only on the kind and the theme's accent.
    pub fn for_kind(kind: LineKind, theme: &ColorTheme) -> Self {
        let margin_bottom = Self::margin_for(kind);
        match kind {
            LineKind::Citation => Self {
                margin_bottom,
                weight: FontWeight::SemiBold,
                color: theme.citation_accent,
            },
            LineKind::Prose => Self {
                margin_bottom,
                weight: FontWeight::Normal,
                color: None,
            },
        }
    }

    /// Bottom margin for a kind; independent of the theme.
    pub const fn margin_for(kind: LineKind) -> u16 {
        match kind {
            LineKind::Citation => 0,
            LineKind::Prose => PROSE_MARGIN_BOTTOM,
        }
    }

    /// Translate into a ratatui style. Terminals have no semi-bold, so it maps to bold.
    pub fn to_style(self) -> Style {
        let mut style = Style::default();
        if let Some(color) = self.color {
            style = style.fg(color);
        }
        if self.weight == FontWeight::SemiBold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

/// Color theme for terminal UI elements
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    /// Citation line color (None uses terminal default)
    pub citation_accent: Option<Color>,

    /// Application title in the header
    pub title: Style,

    /// Tagline and placeholder text
    pub muted_text: Style,

    /// Input box border
    pub input_border: Style,

    /// Example query entries
    pub example_query: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Error text
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            citation_accent: Some(ACCENT_BLUE),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            muted_text: Style::default().fg(Color::DarkGray),
            input_border: Style::default().fg(ACCENT_BLUE),
            example_query: Style::default().fg(Color::Cyan),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            citation_accent: None,
            title: Style::default().add_modifier(Modifier::BOLD),
            muted_text: Style::default().add_modifier(Modifier::DIM),
            input_border: Style::default(),
            example_query: Style::default().add_modifier(Modifier::UNDERLINED),
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            citation_accent: Some(Color::LightCyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            muted_text: Style::default().fg(Color::Gray),
            input_border: Style::default().fg(Color::White),
            example_query: Style::default().fg(Color::LightYellow),
            status_bg: Color::White,
            status_fg: Color::Black,
            error_text: Color::LightRed,
        }
    }

    /// Look up a theme by its command-line / config name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "monochrome" => Some(Self::monochrome()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}
