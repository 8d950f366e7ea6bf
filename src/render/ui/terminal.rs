//! Terminal UI implementation using ratatui
//!
//! Draws the query screen: header, input box, a body that is either the example list, the
//! loading notice, or the styled answer, and a status line.

use crate::error::{NavigatorError, Result};
use crate::input::EXAMPLE_QUERIES;
use crate::render::lines::render;
use crate::render::ui::renderer::UIRenderer;
use crate::render::ui::state::ViewState;
use crate::render::ui::theme::ColorTheme;
use ratatui::crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

pub const TITLE: &str = "Policy Navigator";
pub const TAGLINE: &str = "AI-powered government regulation search and compliance analysis";
pub const PLACEHOLDER: &str =
    "Ask about policies, executive orders, or compliance requirements...";
pub const LOADING_TEXT: &str = "Analyzing policies and regulations...";
pub const RESULTS_HEADING: &str = "Analysis Results";
const KEY_HINTS: &str = "Enter ask · Esc clear · F1-F3 examples · ↑↓ PgUp PgDn scroll · Ctrl+C quit";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Draw one complete frame. Independent of the backend so tests can use `TestBackend`.
    pub fn draw_frame(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.size());

        Self::render_header(frame, chunks[0], theme);
        Self::render_input(frame, chunks[1], view_state, theme);
        Self::render_body(frame, chunks[3], view_state, theme);
        Self::render_status(frame, chunks[4], view_state, theme);
    }

    fn render_header(frame: &mut Frame, area: Rect, theme: &ColorTheme) {
        let header = Paragraph::new(vec![
            Line::styled(TITLE, theme.title),
            Line::styled(TAGLINE, theme.muted_text),
        ]);
        frame.render_widget(header, area);
    }

    fn render_input(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.input_border)
            .title(" Ask Policy Navigator ");

        let content = if view_state.input.is_empty() {
            Line::styled(PLACEHOLDER, theme.muted_text)
        } else {
            Line::raw(view_state.input.as_str())
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        // Keep the cursor inside the box even for long queries.
        let typed = u16::try_from(view_state.input.chars().count()).unwrap_or(u16::MAX);
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1).saturating_add(typed).min(max_x);
        frame.set_cursor(cursor_x, area.y + 1);
    }

    fn render_body(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let paragraph =
            Self::body_paragraph(view_state, theme).scroll((view_state.scroll_offset, 0));
        frame.render_widget(paragraph, area);
    }

    fn body_paragraph<'a>(view_state: &'a ViewState, theme: &ColorTheme) -> Paragraph<'a> {
        Paragraph::new(Self::body_lines(view_state, theme)).wrap(Wrap { trim: false })
    }

    /// Rows the body takes at `width` after wrapping. Styling never changes the count.
    pub fn body_rows(view_state: &ViewState, width: u16) -> usize {
        Self::body_paragraph(view_state, &ColorTheme::default()).line_count(width)
    }

    /// Lines for the body area in display order.
    pub fn body_lines<'a>(view_state: &'a ViewState, theme: &ColorTheme) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        if view_state.is_pending() {
            lines.push(Line::styled(LOADING_TEXT, theme.muted_text));
            return lines;
        }

        if let Some(error) = view_state.error.as_deref() {
            lines.push(Line::styled(
                format!("⚠️ {error}"),
                Style::default().fg(theme.error_text),
            ));
            lines.push(Line::default());
        }

        if view_state.shows_examples() {
            lines.push(Line::styled("Try asking:", theme.title));
            for (idx, query) in EXAMPLE_QUERIES.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("F{}  ", idx + 1), theme.muted_text),
                    Span::styled(*query, theme.example_query),
                ]));
            }
            lines.push(Line::default());
            lines.push(Line::styled(KEY_HINTS, theme.muted_text));
        }

        if let Some(display) = view_state.result.as_deref() {
            lines.push(Line::styled(RESULTS_HEADING, theme.title));
            lines.push(Line::default());
            lines.extend(result_lines(display, theme));
        }

        lines
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }
}

/// Styled terminal lines for a display string, with margins expanded into blank rows.
pub fn result_lines<'a>(display: &'a str, theme: &ColorTheme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for line in render(display) {
        let style = line.style(theme);
        lines.push(Line::styled(line.text, style.to_style()));
        for _ in 0..style.margin_bottom {
            lines.push(Line::default());
        }
    }
    lines
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal.draw(move |frame| Self::draw_frame(frame, view_state, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()
            .map_err(|err| NavigatorError::ui(format!("failed to enable raw mode: {err}")))?;

        let mut stdout = io::stdout();
        let entered = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        );
        let setup = entered.and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));

        match setup {
            Ok(terminal) => {
                self.terminal = Some(terminal);
                Ok(())
            }
            Err(err) => {
                // No terminal is stored, so cleanup would skip this.
                let _ = execute!(
                    io::stdout(),
                    DisableBracketedPaste,
                    LeaveAlternateScreen,
                    DisableMouseCapture
                );
                let _ = disable_raw_mode();
                Err(NavigatorError::ui(format!("failed to set up terminal: {err}")))
            }
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(
                io::stdout(),
                DisableBracketedPaste,
                LeaveAlternateScreen,
                DisableMouseCapture
            )?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        ratatui::crossterm::terminal::size()
            .map_err(|err| NavigatorError::ui(format!("failed to read terminal size: {err}")))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
