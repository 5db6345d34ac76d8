use log::debug;

use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;

/// Result of [`Matrix::lsq`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares {
    /// Solution of the normal equations.
    pub x: Vec<f64>,
    /// `A · x`
    pub fitted: Vec<f64>,
    /// `b - A · x`
    pub residual: Vec<f64>,
}

impl Matrix {
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    pub fn is_symmetric(&self) -> bool {
        self.equals(&self.transpose())
    }

    /// `A · Aᵗ` equals the identity, compared after the usual term rounding.
    pub fn is_orthogonal(&self) -> bool {
        match self.dot(&self.transpose()) {
            Ok(product) => product.equals(&Matrix::identity(self.rows(), self.rows())),
            Err(_) => false,
        }
    }

    pub fn determinant(&self) -> Result<f64, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                op: "determinant",
                shape: self.shape(),
            });
        }

        if self.rows() == 2 {
            return Ok(self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]);
        }

        let (lower, upper) = self.lu()?;
        Ok(upper.diag_product() * lower.diag_product())
    }

    /// Sum of the diagonal of the reduced row echelon form.
    ///
    /// This only matches the rank when every pivot lands on the diagonal.
    /// Rank-deficient matrices whose pivots drift right of the diagonal get a
    /// smaller (or fractional) value, see [`Matrix::pivot_count`] for the
    /// number of pivots.
    pub fn rank(&self) -> f64 {
        self.rref().trace()
    }

    /// Number of non-zero rows of the reduced row echelon form.
    pub fn pivot_count(&self) -> usize {
        self.rref()
            .as_rows()
            .iter()
            .filter(|row| row.iter().any(|x| *x != 0.0))
            .count()
    }

    /// Inverse by Gauss-Jordan elimination of `[A | I]`.
    ///
    /// A singular matrix is not detected: the right half of the reduced
    /// augmented matrix is returned whatever it holds.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                op: "inverse",
                shape: self.shape(),
            });
        }
        debug!("Inverse of a {}x{} matrix", self.rows(), self.cols());

        let n = self.cols();
        let augmented = self.concat(&self.identity_like())?;
        Ok(augmented.rref().map(|row, _| row[n..].to_vec()))
    }

    /// Least squares solution of `A · x ≈ b` through the normal equations
    /// `Aᵗ·A · x = Aᵗ·b`.
    pub fn lsq(&self, b: &[f64]) -> Result<LeastSquares, MatrixError> {
        if b.len() != self.rows() {
            return Err(MatrixError::DimensionMismatch {
                left: self.rows(),
                right: b.len(),
            });
        }
        debug!("Least squares on a {}x{} matrix", self.rows(), self.cols());

        let at = self.transpose();
        let column = |v: &[f64]| {
            Matrix::of(v.iter().map(|x| vec![*x]).collect::<Vec<_>>())
                .with_precision(self.precision)
        };
        let flatten = |m: Matrix| m.into_rows().into_iter().flatten().collect::<Vec<f64>>();

        let normal = at.dot(self)?;
        let target = flatten(at.dot(&column(b))?);
        let x = normal.solve(&target)?;

        let fitted = flatten(self.dot(&column(x.as_slice()))?);
        let residual = b.iter().zip(fitted.iter()).map(|(b, p)| b - p).collect();

        Ok(LeastSquares {
            x,
            fitted,
            residual,
        })
    }

    pub fn diag(&self) -> Vec<f64> {
        self.as_rows()
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.get(i).copied())
            .collect()
    }

    pub fn diag_product(&self) -> f64 {
        self.diag().iter().product()
    }

    pub fn trace(&self) -> f64 {
        self.diag().iter().sum()
    }

    pub fn sum(&self) -> f64 {
        self.as_rows().iter().flatten().sum()
    }

    /// Largest element, `-inf` for an empty matrix.
    pub fn max(&self) -> f64 {
        self.as_rows()
            .iter()
            .flatten()
            .fold(f64::NEG_INFINITY, |acc, x| acc.max(*x))
    }

    /// Smallest element, `inf` for an empty matrix.
    pub fn min(&self) -> f64 {
        self.as_rows()
            .iter()
            .flatten()
            .fold(f64::INFINITY, |acc, x| acc.min(*x))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
