//! Render coordination.
//!
//! Mediates between input actions, the query worker and the view state. The query cycle is
//! Idle → Pending → Success | Failure; a submit while a request is pending is refused, so at
//! most one query is ever in flight.

use crate::error::{NavigatorError, Result, QUERY_FAILED_MESSAGE};
use crate::input::{InputAction, ScrollDirection};
use crate::render::protocol::{QueryCommand, QueryResponse, RequestId};
use crate::render::ui::ViewState;
use tokio::sync::mpsc;

pub const ALREADY_RUNNING_MESSAGE: &str = "A query is already running";

/// Tracks render-related state that must persist across input actions and worker responses.
#[derive(Debug)]
pub struct RenderLoopState {
    next_request_id: RequestId,
}

impl Default for RenderLoopState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoopState {
    pub fn new() -> Self {
        Self { next_request_id: 1 }
    }

    /// Apply one input action. Returns `Ok(false)` when the application should quit.
    pub async fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
        query_tx: &mpsc::Sender<QueryCommand>,
    ) -> Result<bool> {
        match action {
            InputAction::Quit => Ok(false),
            InputAction::UpdateBuffer(buffer) => {
                view_state.input = buffer;
                view_state.status_line.clear_message();
                Ok(true)
            }
            InputAction::Submit(query) => {
                self.submit(query, view_state, query_tx).await?;
                Ok(true)
            }
            InputAction::Scroll { direction, lines } => {
                match direction {
                    ScrollDirection::Up => view_state.scroll_up(lines),
                    ScrollDirection::Down => view_state.scroll_down(lines),
                }
                Ok(true)
            }
            InputAction::PageUp => {
                view_state.scroll_up(view_state.body_height().max(1));
                Ok(true)
            }
            InputAction::PageDown => {
                view_state.scroll_down(view_state.body_height().max(1));
                Ok(true)
            }
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height);
                Ok(true)
            }
            InputAction::NoAction | InputAction::InvalidInput => Ok(true),
        }
    }

    async fn submit(
        &mut self,
        query: String,
        view_state: &mut ViewState,
        query_tx: &mpsc::Sender<QueryCommand>,
    ) -> Result<()> {
        if view_state.is_pending() {
            view_state
                .status_line
                .set_message(ALREADY_RUNNING_MESSAGE.to_string());
            return Ok(());
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        view_state.begin_request(request_id);
        view_state.status_line.clear_message();
        log::info!("submitting query {request_id}");

        query_tx
            .send(QueryCommand::Submit { request_id, query })
            .await
            .map_err(|_| NavigatorError::other("query worker unavailable"))
    }

    /// Apply a worker response. Responses for anything but the pending request are dropped.
    pub fn handle_response(&mut self, response: QueryResponse, view_state: &mut ViewState) {
        if view_state.pending != Some(response.request_id()) {
            log::debug!("dropping stale response {}", response.request_id());
            return;
        }

        match response {
            QueryResponse::Completed { display, .. } => view_state.complete_request(display),
            QueryResponse::Failed { request_id, error } => {
                log::warn!("query {request_id} failed: {error}");
                view_state.fail_request(QUERY_FAILED_MESSAGE);
            }
        }
    }
}
