//! Rendering subsystem: line classification, the render loop, and the output surfaces.

pub mod lines;
pub mod plain;
pub mod protocol;
pub mod service;
pub mod ui;

pub use lines::{render, render_lines, LineKind, Lines, RenderLine, CITATION_PREFIX};
pub use service::RenderLoopState;
