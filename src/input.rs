//! Input subsystem: raw terminal events in, query-editor actions out.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than reaching
// into submodules.
pub use raw::ScrollDirection;
pub use service::{
    spawn_input_thread, InputAction, InputService, InputStateMachine, EXAMPLE_QUERIES,
};
