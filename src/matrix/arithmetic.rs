use std::ops;

use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;

/// Right-hand side of an elementwise operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(f64),
    Matrix(&'a Matrix),
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(value: &'a Matrix) -> Self {
        Operand::Matrix(value)
    }
}

impl Matrix {
    fn elementwise<F>(&self, op: &'static str, rhs: Operand, f: F) -> Result<Matrix, MatrixError>
    where
        F: Fn(f64, f64) -> f64,
    {
        match rhs {
            Operand::Scalar(value) => Ok(self.map_elements(|x, _, _| f(x, value))),
            Operand::Matrix(other) => {
                if self.shape() != other.shape() {
                    return Err(MatrixError::ShapeMismatch {
                        op,
                        left: self.shape(),
                        right: other.shape(),
                    });
                }
                Ok(self.map_elements(|x, i, j| f(x, other[(i, j)])))
            }
        }
    }

    pub fn add<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
        self.elementwise("add", rhs.into(), |a, b| a + b)
    }

    pub fn subtract<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
        self.elementwise("subtract", rhs.into(), |a, b| a - b)
    }

    /// Hadamard (elementwise) product, see [`Matrix::dot`] for the matrix product.
    pub fn multiply<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
        self.elementwise("multiply", rhs.into(), |a, b| a * b)
    }

    pub fn additive_inverse(&self) -> Matrix {
        self.map_elements(|x, _, _| -x)
    }

    /// Scalar division, or `self · rhs⁻¹` for a square matrix of the same shape.
    pub fn divide<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
        match rhs.into() {
            Operand::Scalar(value) => self.multiply(1.0 / value),
            Operand::Matrix(other) => {
                if self.shape() != other.shape() {
                    return Err(MatrixError::ShapeMismatch {
                        op: "divide",
                        left: self.shape(),
                        right: other.shape(),
                    });
                }
                if !other.is_square() {
                    return Err(MatrixError::NotSquare {
                        op: "divide",
                        shape: other.shape(),
                    });
                }
                self.dot(&other.inverse()?)
            }
        }
    }
}

impl ops::Add<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn add(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        Matrix::add(self, rhs)
    }
}

impl ops::Add<f64> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: f64) -> Matrix {
        self.map_elements(|x, _, _| x + rhs)
    }
}

impl ops::Sub<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn sub(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.subtract(rhs)
    }
}

impl ops::Sub<f64> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: f64) -> Matrix {
        self.map_elements(|x, _, _| x - rhs)
    }
}

impl ops::Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        self.map_elements(|x, _, _| x * rhs)
    }
}

impl ops::Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.additive_inverse()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
