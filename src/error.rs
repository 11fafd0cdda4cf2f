//! Error types for triform.
//!
//! Only preconditions that are cheap to check are reported as errors.
//! Broken internal invariants panic instead of returning an error.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during normal generation.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The triangle index buffer length is not a multiple of three.
    #[error("index buffer length {len} is not a multiple of 3")]
    IndexCountNotMultipleOfThree {
        /// The offending buffer length.
        len: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
