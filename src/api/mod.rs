//! HTTP API for product search
//!
//! Exposes the catalogue and the ranked search over REST.

pub mod http;
pub mod rest;
pub mod state;

pub use http::{create_router, serve};
pub use state::AppState;
