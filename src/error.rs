//! Error types for matkit

use thiserror::Error;

/// Result type alias using matkit's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in matkit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Operation requires a square matrix
    #[error("Operation '{op}' requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// The operation name
        op: &'static str,
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Matrix is singular and cannot be inverted
    #[error("Matrix is singular")]
    Singular,

    /// The requested value is not an eigenvalue within the given tolerance
    #[error("{value} is not an eigenvalue within tolerance {eps}")]
    NotAnEigenvalue {
        /// Textual rendering of the rejected value
        value: String,
        /// Tolerance the value was checked against
        eps: f64,
    },

    /// Eigenvalues of a matrix larger than 4x4 need an external hint
    #[error(
        "eigenvalues of a {size}x{size} matrix exceed closed-form factoring; \
         seed them with hint_eigenvalues first"
    )]
    EigenvaluesUnavailable {
        /// Side length of the matrix
        size: usize,
    },

    /// Polynomial factoring is closed-form only up to quartics
    #[error("cannot factor a degree-{degree} polynomial (closed forms stop at degree 4)")]
    UnsupportedDegree {
        /// Degree of the rejected polynomial
        degree: usize,
    },

    /// Feature not yet implemented
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the unimplemented feature
        feature: &'static str,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create a not-square error
    pub fn not_square(op: &'static str, rows: usize, cols: usize) -> Self {
        Self::NotSquare { op, rows, cols }
    }

    /// Create an index-out-of-bounds error
    pub fn index_oob(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a not-an-eigenvalue error from anything displayable
    pub fn not_an_eigenvalue(value: impl std::fmt::Display, eps: f64) -> Self {
        Self::NotAnEigenvalue {
            value: value.to_string(),
            eps,
        }
    }
}
