use std::ops;

use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;
use crate::utils::round_to;

impl Matrix {
    /// Matrix product `self · rhs`.
    ///
    /// Every `self[i][k] * rhs[k][j]` term is rounded to `self.precision`
    /// decimal digits before being accumulated, which keeps chained products
    /// from drifting. The sum itself is not rounded.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols() != rhs.rows() {
            return Err(MatrixError::DimensionMismatch {
                left: self.cols(),
                right: rhs.rows(),
            });
        }

        let precision = self.precision;
        Ok(
            Matrix::generate(self.rows(), rhs.cols(), |i, j| {
                (0..self.cols())
                    .map(|k| round_to(self[(i, k)] * rhs[(k, j)], precision))
                    .sum()
            })
            .with_precision(precision),
        )
    }

    /// Kronecker product: block `(i, j)` is `self[i][j] * rhs`.
    pub fn kronecker(&self, rhs: &Matrix) -> Matrix {
        let (p, q) = rhs.shape();
        Matrix::generate(self.rows() * p, self.cols() * q, |r, c| {
            self[(r / p, c / q)] * rhs[(r % p, c % q)]
        })
        .with_precision(self.precision)
    }
}

impl ops::Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn mul(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.dot(rhs)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
