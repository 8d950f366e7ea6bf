//! # policy-navigator - Terminal client for the Policy Navigator service
//!
//! Sends free-text policy and regulation questions to a remote analysis service and renders
//! the answers, highlighting source citations.
//!
//! ## Architecture
//!
//! - [`response`] - collapses any service payload into one display string
//! - [`render`] - splits display strings into classified lines, plus the output surfaces
//! - [`client`] - HTTP transport to the service
//! - [`query`] - background worker running one query at a time
//! - [`input`] - terminal input and the query editor
//! - [`app`] - wires input, worker and terminal UI together
//! - [`config`] - layered client configuration
//! - [`error`] - centralized error types

pub mod error;
pub mod response;

pub mod config;
pub mod input;
pub mod render;

pub mod app;
pub mod client;
pub mod query;

pub use error::{NavigatorError, Result, QUERY_FAILED_MESSAGE};

pub use app::Application;
pub use client::{HttpTransport, QueryTransport};
pub use config::ClientConfig;
pub use render::{render, render_lines, LineKind, RenderLine};
pub use response::{normalize, ServerPayload, FALLBACK_DISPLAY};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
