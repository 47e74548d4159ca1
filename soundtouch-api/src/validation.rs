//! Parameter validation shared by the client and the HTTP edge
//!
//! The client validates its own inputs before touching the network; request
//! types at the HTTP edge implement [`Validate`] so malformed values never
//! reach the client at all.

use std::fmt::Display;
use std::ops::RangeInclusive;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' value '{value}' is out of range ({min}..={max})")]
    RangeError {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Required parameter '{parameter}' is missing")]
    MissingParameter { parameter: String },
}

impl ValidationError {
    pub fn range_error(
        parameter: &str,
        min: impl Display,
        max: impl Display,
        value: impl Display,
    ) -> Self {
        Self::RangeError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn missing(parameter: &str) -> Self {
        Self::MissingParameter {
            parameter: parameter.to_string(),
        }
    }
}

/// Check `value` against an inclusive range
pub fn check_range<T>(parameter: &str, value: T, range: RangeInclusive<T>) -> Result<T, ValidationError>
where
    T: PartialOrd + Display + Copy,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::range_error(
            parameter,
            range.start(),
            range.end(),
            value,
        ))
    }
}

/// Trait for types that can be validated at the API boundary
pub trait Validate {
    /// Light validation: presence and simple range checks
    fn validate_boundary(&self) -> Result<(), ValidationError>;
}
