//! Error types for checked classification entry points.

use thiserror::Error;

/// An input code outside the legal domain `{-1} ∪ [0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input code {code} outside [-1, 255]")]
pub struct DomainError {
    pub code: i32,
}

/// A class name that matches neither a C name (`isspace`) nor an exported
/// symbol (`C_isspace`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown character class: '{0}'")]
pub struct UnknownClass(pub String);
