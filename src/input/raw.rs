//! Low-level input collection: crossterm polling and translation into primitive events that
//! the higher-level input service can consume.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::Duration;

/// Number of rows produced by a single mouse wheel tick.
const MOUSE_SCROLL_LINES: u16 = 3;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Direction for result scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Paste(String),
    Resize {
        width: u16,
        height: u16,
    },
    Scroll {
        direction: ScrollDirection,
        lines: u16,
    },
}

/// Collector that polls crossterm for events.
#[derive(Debug, Default)]
pub struct RawInputCollector {
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.pop_pending() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(poll_timeout)? {
            return Ok(None);
        }

        let event = event::read()?;
        self.enqueue_event(event);
        Ok(self.pop_pending())
    }

    /// Pop the next pending raw event without polling the terminal.
    pub fn pop_pending(&mut self) -> Option<RawInputEvent> {
        self.pending_events.pop_front()
    }

    fn enqueue_event(&mut self, event: Event) {
        let raw = match event {
            Event::Key(key_event) => Some(RawInputEvent::Key(key_event)),
            Event::Paste(text) => Some(RawInputEvent::Paste(text)),
            Event::Resize(width, height) => Some(RawInputEvent::Resize { width, height }),
            Event::Mouse(mouse_event) => Self::translate_mouse(mouse_event),
            _ => None,
        };
        if let Some(raw) = raw {
            self.pending_events.push_back(raw);
        }
    }

    fn translate_mouse(mouse_event: MouseEvent) -> Option<RawInputEvent> {
        let direction = match mouse_event.kind {
            MouseEventKind::ScrollUp => ScrollDirection::Up,
            MouseEventKind::ScrollDown => ScrollDirection::Down,
            _ => return None,
        };
        Some(RawInputEvent::Scroll {
            direction,
            lines: MOUSE_SCROLL_LINES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn wheel_ticks_become_scrolls() {
        let mut collector = RawInputCollector::new();
        collector.process_event(mouse(MouseEventKind::ScrollDown));
        assert_eq!(
            collector.pop_pending(),
            Some(RawInputEvent::Scroll {
                direction: ScrollDirection::Down,
                lines: MOUSE_SCROLL_LINES
            })
        );
    }

    #[test]
    fn clicks_and_focus_are_ignored() {
        let mut collector = RawInputCollector::new();
        collector.process_event(mouse(MouseEventKind::Moved));
        collector.process_event(Event::FocusGained);
        assert_eq!(collector.pop_pending(), None);
    }

    #[test]
    fn events_keep_arrival_order() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )));
        collector.process_event(Event::Resize(80, 40));
        collector.process_event(Event::Paste("pasted".to_string()));

        assert!(matches!(collector.pop_pending(), Some(RawInputEvent::Key(_))));
        assert_eq!(
            collector.pop_pending(),
            Some(RawInputEvent::Resize {
                width: 80,
                height: 40
            })
        );
        assert_eq!(
            collector.pop_pending(),
            Some(RawInputEvent::Paste("pasted".to_string()))
        );
    }
}
