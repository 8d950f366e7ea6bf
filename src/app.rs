//! Application orchestration layer
//!
//! Wires the input thread, the query worker and the render loop together around a
//! `UIRenderer`. Each component owns its own state; this layer only moves messages between them.

use crate::client::QueryTransport;
use crate::error::Result;
use crate::input::{spawn_input_thread, InputAction};
use crate::query::query_worker_loop;
use crate::render::protocol::{QueryCommand, QueryResponse};
use crate::render::service::RenderLoopState;
use crate::render::ui::{UIRenderer, ViewState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);
const CHANNEL_CAPACITY: usize = 8;

/// Application orchestrator
pub struct Application {
    transport: Arc<dyn QueryTransport>,
    ui_renderer: Box<dyn UIRenderer>,
    endpoint: String,
}

impl Application {
    pub fn new(
        transport: Arc<dyn QueryTransport>,
        ui_renderer: Box<dyn UIRenderer>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            ui_renderer,
            endpoint: endpoint.into(),
        }
    }

    /// Run the interactive session with terminal input until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_handle =
            spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = match self.ui_renderer.initialize() {
            Ok(()) => {
                let outcome = self.run_with_input(input_rx).await;
                let cleanup = self.ui_renderer.cleanup();
                outcome.and(cleanup)
            }
            Err(err) => Err(err),
        };

        shutdown.store(true, Ordering::SeqCst);
        if input_handle.join().is_err() {
            log::error!("input thread panicked");
        }

        result
    }

    /// Drive the render loop from an arbitrary action source.
    ///
    /// Returns when a `Quit` action arrives or the source closes.
    pub async fn run_with_input(
        &mut self,
        mut input_rx: mpsc::UnboundedReceiver<InputAction>,
    ) -> Result<()> {
        let (query_tx, query_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (response_tx, mut response_rx) = mpsc::channel::<QueryResponse>(CHANNEL_CAPACITY);
        let worker = tokio::spawn(query_worker_loop(
            query_rx,
            response_tx,
            Arc::clone(&self.transport),
        ));

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(self.endpoint.clone(), width, height);
        let mut loop_state = RenderLoopState::new();
        let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

        self.ui_renderer.render(&view_state)?;

        let outcome = loop {
            tokio::select! {
                action = input_rx.recv() => {
                    let Some(action) = action else { break Ok(()) };
                    match loop_state.process_action(action, &mut view_state, &query_tx).await {
                        Ok(true) => {}
                        Ok(false) => break Ok(()),
                        Err(err) => break Err(err),
                    }
                }
                Some(response) = response_rx.recv() => {
                    loop_state.handle_response(response, &mut view_state);
                }
                _ = redraw.tick() => {}
            }

            if let Err(err) = self.ui_renderer.render(&view_state) {
                break Err(err);
            }
        };

        // A worker still waiting on the service is aborted rather than awaited.
        let idle = outcome.is_ok() && !view_state.is_pending();
        if idle && query_tx.send(QueryCommand::Shutdown).await.is_ok() {
            if let Err(err) = worker.await {
                log::warn!("query worker ended abnormally: {err}");
            }
        } else {
            worker.abort();
        }

        outcome
    }
}
