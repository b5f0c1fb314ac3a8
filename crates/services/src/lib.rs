//! # services
//!
//! Business logic for Chirp, composed entirely from the port traits in
//! `domains`. Three services cover the domain: accounts (signup, login,
//! settings), the social graph (follows, profile projection), and posts
//! (creation, likes, and the thread assembler).

pub mod accounts;
pub mod password;
pub mod posts;
pub mod social;
pub mod views;

pub use accounts::AccountService;
pub use password::PasswordPolicy;
pub use posts::PostService;
pub use social::SocialService;
