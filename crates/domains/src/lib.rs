//! # domains
//!
//! The central domain logic and interface definitions for Chirp.
//! Entities, the flag bitfield helpers, the port traits every adapter
//! implements, and the shared error taxonomy.

pub mod error;
pub mod flags;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
