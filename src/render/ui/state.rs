//! UI state management structures
//!
//! `ViewState` holds everything the terminal UI needs for one frame: the query being edited,
//! the phase of the current request, and the last answer. Display lines are *not* stored; they
//! are re-derived from the answer text on every render. Only the wrapped height of the body is
//! cached, so scrolling can be clamped without a frame.

use crate::render::protocol::RequestId;
use crate::render::ui::terminal::TerminalUI;

/// Rows taken by the header, input box and status line.
pub const CHROME_ROWS: u16 = 7;

/// Where the client is in the query cycle, derived from [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase<'a> {
    /// Nothing asked yet
    Idle,
    Pending { request_id: RequestId },
    Success { display: &'a str },
    /// The last request failed; `previous` is the answer still on screen from before
    Failure {
        message: &'a str,
        previous: Option<&'a str>,
    },
}

/// Render state for the query screen
#[derive(Debug)]
pub struct ViewState {
    /// Current contents of the query input
    pub input: String,

    /// Request currently in flight, if any
    pub pending: Option<RequestId>,

    /// User-facing error from the last failed request
    pub error: Option<String>,

    /// Normalized display string of the last successful answer
    pub result: Option<String>,

    /// First body row shown
    pub scroll_offset: u16,

    /// Rows the body needs once wrapped to the viewport width
    content_rows: usize,

    pub status_line: StatusLine,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(endpoint: impl Into<String>, viewport_width: u16, viewport_height: u16) -> Self {
        let mut state = Self {
            input: String::new(),
            pending: None,
            error: None,
            result: None,
            scroll_offset: 0,
            content_rows: 0,
            status_line: StatusLine::new(endpoint),
            viewport_width,
            viewport_height,
        };
        state.relayout();
        state
    }

    pub fn phase(&self) -> QueryPhase<'_> {
        if let Some(request_id) = self.pending {
            QueryPhase::Pending { request_id }
        } else if let Some(message) = self.error.as_deref() {
            QueryPhase::Failure {
                message,
                previous: self.result.as_deref(),
            }
        } else if let Some(display) = self.result.as_deref() {
            QueryPhase::Success { display }
        } else {
            QueryPhase::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Example queries are offered only before the first answer and while nothing is loading.
    pub fn shows_examples(&self) -> bool {
        self.pending.is_none() && self.result.is_none()
    }

    pub fn begin_request(&mut self, request_id: RequestId) {
        self.pending = Some(request_id);
        self.error = None;
        self.relayout();
    }

    pub fn complete_request(&mut self, display: String) {
        self.pending = None;
        self.error = None;
        self.result = Some(display);
        self.scroll_offset = 0;
        self.relayout();
    }

    pub fn fail_request(&mut self, message: impl Into<String>) {
        self.pending = None;
        self.error = Some(message.into());
        self.relayout();
    }

    /// Rows available to the body between the input box and the status line
    pub fn body_height(&self) -> u16 {
        self.viewport_height.saturating_sub(CHROME_ROWS)
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows).min(self.max_scroll());
    }

    /// Largest offset that still fills the body; the last row sits at the bottom edge.
    pub fn max_scroll(&self) -> u16 {
        let hidden = self
            .content_rows
            .saturating_sub(usize::from(self.body_height()));
        u16::try_from(hidden).unwrap_or(u16::MAX)
    }

    /// Update terminal dimensions. Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
            self.relayout();
        }
        changed
    }

    /// Recount the wrapped body rows and pull the scroll offset back into range.
    fn relayout(&mut self) {
        self.content_rows = TerminalUI::body_rows(self, self.viewport_width);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    pub fn format_status_line(&self) -> String {
        self.status_line.format_status_line(self.phase())
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub endpoint: String,
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: None,
        }
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn format_status_line(&self, phase: QueryPhase<'_>) -> String {
        let label = match phase {
            QueryPhase::Idle => "Ready",
            QueryPhase::Pending { .. } => "Analyzing",
            QueryPhase::Success { .. } => "Done",
            QueryPhase::Failure { .. } => "Error",
        };

        match &self.message {
            Some(message) => format!("{} | {} | {}", self.endpoint, label, message),
            None => format!("{} | {}", self.endpoint, label),
        }
    }
}
