//! # auth-adapters
//!
//! Credential and token implementations: Argon2 for password hashing and
//! (behind the `auth-jwt` feature) HS256 JWTs for bearer tokens.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::ArgonCredentialHasher;

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtTokenIssuer;
