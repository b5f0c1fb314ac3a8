//! # Password strength policy
//!
//! Checked at signup and on password change, always before hashing.

use domains::{AppError, Result};

/// Minimum-length plus character-class requirements: at least one each of
/// lowercase, uppercase, digit, and symbol.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Rejects weak passwords with a `ValidationError`; never logs or
    /// stores the candidate.
    pub fn validate(&self, password: &str) -> Result<()> {
        let long_enough = password.chars().count() >= self.min_length;
        let has_lower = password.chars().any(|c| c.is_lowercase());
        let has_upper = password.chars().any(|c| c.is_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_symbol = password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

        if long_enough && has_lower && has_upper && has_digit && has_symbol {
            Ok(())
        } else {
            Err(AppError::ValidationError(format!(
                "Password must be at least {} characters long and include \
                 uppercase, lowercase, numbers, and symbols.",
                self.min_length
            )))
        }
    }
}
