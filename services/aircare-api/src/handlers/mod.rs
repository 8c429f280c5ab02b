//! Endpoint handlers.
//!
//! The dispatched endpoints take the shared state and raw query parameters
//! and return a JSON body or an error; the envelope is applied by the
//! dispatcher. Health routes are plain axum handlers.

pub mod air;
pub mod geo;
pub mod health;
pub mod history;

pub use health::{health_handler, metrics_handler, ready_handler};
