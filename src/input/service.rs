//! High-level input service.
//!
//! Consumes raw events, runs the query-editor state machine, and yields domain-level
//! `InputAction`s that the render coordinator consumes.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent, ScrollDirection};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Canned questions offered on the idle screen, bound to F1..F3.
pub const EXAMPLE_QUERIES: [&str; 3] = [
    "Is Executive Order 14067 still in effect?",
    "Has Section 230 been challenged in court?",
    "What are compliance requirements for small businesses?",
];

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// The query buffer changed; carries the full new contents.
    UpdateBuffer(String),
    /// Enter on a buffer with non-whitespace content.
    Submit(String),
    Scroll {
        direction: ScrollDirection,
        lines: u16,
    },
    PageUp,
    PageDown,
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Single-line query editor.
#[derive(Debug, Default)]
pub struct InputStateMachine {
    buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Esc, _) if self.buffer.is_empty() => InputAction::Quit,
            (KeyCode::Esc, _) => self.set_buffer(String::new()),
            (KeyCode::Enter, _) => {
                if self.buffer.trim().is_empty() {
                    InputAction::NoAction
                } else {
                    InputAction::Submit(self.buffer.clone())
                }
            }
            (KeyCode::Backspace, _) => {
                if self.buffer.pop().is_some() {
                    InputAction::UpdateBuffer(self.buffer.clone())
                } else {
                    InputAction::NoAction
                }
            }
            (KeyCode::F(n @ 1..=3), _) => {
                self.set_buffer(EXAMPLE_QUERIES[usize::from(n - 1)].to_string())
            }
            (KeyCode::Up, _) => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            (KeyCode::Down, _) => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            (KeyCode::PageUp, _) => InputAction::PageUp,
            (KeyCode::PageDown, _) => InputAction::PageDown,
            (KeyCode::Char(ch), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.push(ch);
                InputAction::UpdateBuffer(self.buffer.clone())
            }
            _ => InputAction::InvalidInput,
        }
    }

    /// Append pasted text, flattening line breaks so the query stays on one line.
    pub fn handle_paste(&mut self, text: &str) -> InputAction {
        let flattened: String = text
            .chars()
            .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
            .collect();
        if flattened.is_empty() {
            return InputAction::NoAction;
        }
        self.buffer.push_str(&flattened);
        InputAction::UpdateBuffer(self.buffer.clone())
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    fn set_buffer(&mut self, contents: String) -> InputAction {
        self.buffer = contents;
        InputAction::UpdateBuffer(self.buffer.clone())
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
#[derive(Debug, Default)]
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        Ok(self
            .raw_input
            .poll_event(timeout)?
            .and_then(|raw_event| self.process_raw_event(raw_event)))
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);
        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.pop_pending() {
            if let Some(action) = self.process_raw_event(raw_event) {
                actions.push(action);
            }
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Paste(text) => self.state_machine.handle_paste(&text),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll { direction, lines } => InputAction::Scroll { direction, lines },
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_action(Some(poll_interval)) {
                Ok(Some(action)) => {
                    if tx.send(action).is_err() {
                        return;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    log::error!("input thread error: {err}");
                    break;
                }
            }
        }
    })
}
