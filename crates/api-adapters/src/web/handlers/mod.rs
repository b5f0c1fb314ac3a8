//! Request handlers, grouped by route prefix.

pub mod auth;
pub mod posts;
pub mod settings;
pub mod users;
