use std::error::Error;
use std::fmt;

/// Errors raised by matrix operations. Every operation is all-or-nothing:
/// on error, no partial result is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Elementwise operation on operands of different shapes.
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Inner dimensions do not agree (matrix product, right-hand side length).
    DimensionMismatch { left: usize, right: usize },
    /// Horizontal concatenation of matrices with different row counts.
    RowCountMismatch { left: usize, right: usize },
    /// LU elimination met a pivot below the tolerance.
    SingularPivot { step: usize, value: f64 },
    NotSquare {
        op: &'static str,
        shape: (usize, usize),
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::ShapeMismatch { op, left, right } if *op == "multiply" => write!(
                f,
                "Cannot multiply a {}x{} matrix by a {}x{} matrix elementwise, use dot for matrix multiplication",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::ShapeMismatch { op, left, right } => write!(
                f,
                "Cannot {} a {}x{} matrix and a {}x{} matrix: dimensions not compatible",
                op, left.0, left.1, right.0, right.1
            ),
            MatrixError::DimensionMismatch { left, right } => write!(
                f,
                "Dimensions not compatible: {} columns against {} rows",
                left, right
            ),
            MatrixError::RowCountMismatch { left, right } => write!(
                f,
                "Cannot concatenate a matrix with {} rows and a matrix with {} rows",
                left, right
            ),
            MatrixError::SingularPivot { step, value } => write!(
                f,
                "Pivot {} at step {} is too small, cannot proceed without a row exchange",
                value, step
            ),
            MatrixError::NotSquare { op, shape } => write!(
                f,
                "Cannot compute {} of a {}x{} matrix: matrix is not square",
                op, shape.0, shape.1
            ),
        }
    }
}

impl Error for MatrixError {}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
