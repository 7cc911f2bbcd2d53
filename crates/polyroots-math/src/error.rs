//! Error types for polynomial operations.

use thiserror::Error;

/// A specialized Result type for polynomial operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while building polynomials or finding their roots.
///
/// Non-convergence of the iterative root finder is not an error: it is
/// reported through a root count smaller than the degree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The coefficient slice is empty.
    #[error("Polynomial coefficient vector cannot be empty")]
    EmptyCoefficients,

    /// Root finding was requested for a constant polynomial.
    #[error("Cannot find roots of a degree-0 polynomial")]
    DegreeZero,

    /// The leading coefficient is zero, so the formal degree is wrong.
    #[error("Leading coefficient must be nonzero")]
    ZeroLeadingCoefficient,

    /// A coefficient is NaN or infinite.
    #[error("Coefficient at index {index} is not finite")]
    NonFiniteCoefficient {
        /// Position of the offending coefficient (highest degree first).
        index: usize,
    },

    /// The output buffer cannot hold every root.
    #[error("Root buffer too small: need {required}, got {actual}")]
    UndersizedOutput {
        /// Number of slots required (the degree).
        required: usize,
        /// Number of slots supplied.
        actual: usize,
    },

    /// Polynomial division by the zero polynomial.
    #[error("Division by the zero polynomial")]
    DivisionByZero,

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an undersized output error.
    #[must_use]
    pub fn undersized_output(required: usize, actual: usize) -> Self {
        Self::UndersizedOutput { required, actual }
    }

    /// Creates a non-finite coefficient error.
    #[must_use]
    pub fn non_finite(index: usize) -> Self {
        Self::NonFiniteCoefficient { index }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::undersized_output(4, 2);
        assert!(err.to_string().contains("need 4, got 2"));

        let err = MathError::non_finite(3);
        assert!(err.to_string().contains("index 3"));
    }

    #[test]
    fn test_invalid_input_reason() {
        let err = MathError::invalid_input("tolerance must be finite");
        assert_eq!(
            err,
            MathError::InvalidInput {
                reason: "tolerance must be finite".to_string()
            }
        );
    }
}
