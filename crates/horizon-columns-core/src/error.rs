//! Error types for Horizon Columns core.

use std::fmt;

/// Errors raised when parsing a [`Color`](crate::Color) from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// The hex string did not have 6 or 8 digits after the optional `#`.
    InvalidLength(usize),
    /// A component contained a non-hexadecimal character.
    InvalidDigit(String),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Expected 6 or 8 hex digits, found {len}")
            }
            Self::InvalidDigit(text) => write!(f, "Invalid hex color component in '{text}'"),
        }
    }
}

impl std::error::Error for ParseColorError {}
