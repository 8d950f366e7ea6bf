//! Background query execution.

pub mod worker;

pub use worker::query_worker_loop;
