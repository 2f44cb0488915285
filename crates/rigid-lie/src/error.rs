/// An error type for the Lie group and algebra operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LieError {
    /// Error when the operands of an algebra operation belong to different algebras.
    #[error("Mismatched algebras: {left} and {right}")]
    MismatchedAlgebra {
        /// Algebra of the left operand.
        left: String,
        /// Algebra of the right operand.
        right: String,
    },

    /// Error when the operands of a group operation belong to different groups.
    #[error("Mismatched groups: {left} and {right}")]
    MismatchedGroup {
        /// Group of the left operand.
        left: String,
        /// Group of the right operand.
        right: String,
    },

    /// Error when a parameter vector, matrix or component list has the wrong shape.
    #[error("{context}: expected shape {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// What was being checked.
        context: &'static str,
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Actual `(rows, cols)`.
        actual: (usize, usize),
    },

    /// Error when a realization does not support an operation.
    #[error("{operation} is not implemented for {realization}")]
    NotImplemented {
        /// Name of the unsupported operation.
        operation: &'static str,
        /// Realization the operation was invoked on.
        realization: String,
    },

    /// Error when a group without the so(3) algebra is used as the rotation of SE(3).
    #[error("{0} cannot be used as the rotation of SE(3)")]
    InvalidRotation(String),

    /// Error when an operation is evaluated at a point where it has no value.
    #[error("{operation} is undefined at {point}")]
    Undefined {
        /// Name of the operation.
        operation: &'static str,
        /// The offending point.
        point: String,
    },
}

/// Result type for the Lie group and algebra operations.
pub type LieResult<T> = Result<T, LieError>;

impl LieError {
    pub(crate) fn parameter_length(expected: usize, actual: usize) -> Self {
        LieError::ShapeMismatch {
            context: "parameter vector",
            expected: (expected, 1),
            actual: (actual, 1),
        }
    }

    pub(crate) fn not_implemented(operation: &'static str, realization: impl ToString) -> Self {
        LieError::NotImplemented {
            operation,
            realization: realization.to_string(),
        }
    }
}
