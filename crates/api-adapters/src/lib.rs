//! # api-adapters
//!
//! The web routing and orchestration layer for Chirp. The axum surface
//! lives behind the `web-axum` feature so alternative web stacks can be
//! slotted in without touching services.

#[cfg(feature = "web-axum")]
pub mod web;

#[cfg(feature = "web-axum")]
pub use web::{app, AppState};
