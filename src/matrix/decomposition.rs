use log::{debug, trace, warn};

use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;

/// Pivots with an absolute value below this abort the LU decomposition.
pub const LU_TOLERANCE: f64 = 1e-6;

impl Matrix {
    /// Doolittle LU decomposition without pivoting, `self = L · U` with a unit
    /// diagonal on `L`.
    ///
    /// No row exchange is ever performed: a pivot smaller than
    /// [`LU_TOLERANCE`] fails with [`MatrixError::SingularPivot`].
    pub fn lu(&self) -> Result<(Matrix, Matrix), MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                op: "LU decomposition",
                shape: self.shape(),
            });
        }
        debug!("LU decomposition of a {}x{} matrix", self.rows(), self.cols());

        let n = self.rows();
        let mut a = self.clone();
        let mut lower = self.zeros_like();
        let mut upper = self.zeros_like();

        for k in 0..n {
            let pivot = a[(k, k)];
            if pivot.abs() < LU_TOLERANCE {
                warn!("LU pivot {} at step {} is below tolerance", pivot, k);
                return Err(MatrixError::SingularPivot { step: k, value: pivot });
            }
            trace!("LU step {}: pivot {}", k, pivot);

            lower[(k, k)] = 1.0;
            for i in k + 1..n {
                let factor = a[(i, k)] / pivot;
                lower[(i, k)] = factor;
                for j in k + 1..n {
                    a[(i, j)] -= factor * a[(k, j)];
                }
            }
            for j in k..n {
                upper[(k, j)] = a[(k, j)];
            }
        }

        Ok((lower, upper))
    }

    /// Solve `self · x = b` through the LU factors of `self`.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, MatrixError> {
        if b.len() != self.rows() {
            return Err(MatrixError::DimensionMismatch {
                left: self.rows(),
                right: b.len(),
            });
        }
        let (lower, upper) = self.lu()?;
        let n = b.len();

        // L · c = b
        let mut c = vec![0.0; n];
        for k in 0..n {
            c[k] = b[k] - (0..k).map(|j| lower[(k, j)] * c[j]).sum::<f64>();
        }

        // U · x = c
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let acc = c[i] - (i + 1..n).map(|j| upper[(i, j)] * x[j]).sum::<f64>();
            x[i] = acc / upper[(i, i)];
        }

        Ok(x)
    }

    /// Reduced row echelon form by Gauss-Jordan elimination.
    pub fn rref(&self) -> Matrix {
        let mut mat = self.clone();
        let (rows, cols) = self.shape();
        debug!("RREF of a {}x{} matrix", rows, cols);

        let mut lead = 0;
        for r in 0..rows {
            if lead >= cols {
                return mat;
            }

            let mut i = r;
            while mat[(i, lead)] == 0.0 {
                i += 1;
                if i == rows {
                    i = r;
                    lead += 1;
                    if lead == cols {
                        return mat;
                    }
                }
            }

            let data = mat.rows_mut();
            data.swap(i, r);

            let pivot = data[r][lead];
            trace!("RREF row {}: pivot {} in column {}", r, pivot, lead);
            data[r].iter_mut().for_each(|x| *x /= pivot);

            let pivot_row = data[r].clone();
            for (k, row) in data.iter_mut().enumerate() {
                if k == r {
                    continue;
                }
                let factor = row[lead];
                row.iter_mut()
                    .zip(pivot_row.iter())
                    .for_each(|(x, p)| *x -= factor * p);
            }

            lead += 1;
        }

        mat
    }

    /// Whether the matrix is in reduced row echelon form.
    pub fn is_rref(&self) -> bool {
        let mut lead = None;

        for (i, row) in self.as_rows().iter().enumerate() {
            match row.iter().position(|x| *x != 0.0) {
                None => {
                    if self.as_rows()[i + 1..]
                        .iter()
                        .any(|next| next.iter().any(|x| *x != 0.0))
                    {
                        return false;
                    }
                    break;
                }
                Some(pivot_col) => {
                    if let Some(prev_lead) = lead {
                        if pivot_col <= prev_lead {
                            return false;
                        }
                    }
                    lead = Some(pivot_col);

                    if row[pivot_col] != 1.0 {
                        return false;
                    }

                    for (r, other) in self.as_rows().iter().enumerate() {
                        if r != i && other[pivot_col] != 0.0 {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::of(rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>())
    }

    fn assert_close(a: &Matrix, b: &Matrix) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.as_rows().iter().flatten().zip(b.as_rows().iter().flatten()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_lu() {
        let a = m(&[
            &[3.0, -7.0, -2.0, 2.0],
            &[-3.0, 5.0, 1.0, 0.0],
            &[6.0, -4.0, 0.0, -5.0],
            &[-9.0, 5.0, -5.0, 12.0],
        ]);
        let (l, u) = a.lu().unwrap();
        assert_eq!(
            l.to_list(),
            vec![
                vec![1.0, 0.0, 0.0, 0.0],
                vec![-1.0, 1.0, 0.0, 0.0],
                vec![2.0, -5.0, 1.0, 0.0],
                vec![-3.0, 8.0, 3.0, 1.0],
            ]
        );
        assert_eq!(
            u.to_list(),
            vec![
                vec![3.0, -7.0, -2.0, 2.0],
                vec![0.0, -2.0, -1.0, 2.0],
                vec![0.0, 0.0, -1.0, 1.0],
                vec![0.0, 0.0, 0.0, -1.0],
            ]
        );
        assert_eq!(l.dot(&u).unwrap(), a);
    }

    #[test]
    fn test_lu_does_not_mutate() {
        let a = m(&[&[4.0, 3.0], &[6.0, 3.0]]);
        let before = a.clone();
        let (l, u) = a.lu().unwrap();
        assert_eq!(a, before);
        assert_close(&l.dot(&u).unwrap(), &a);
    }

    #[test]
    fn test_lu_reconstructs_random() {
        for _ in 0..10 {
            // Diagonally dominant, so no pivot gets close to zero.
            let dominant = &Matrix::identity(5, 5) * 10.0;
            let a = Matrix::random(5, 5).add(&dominant).unwrap();
            let (l, u) = a.clone().with_precision(12).lu().unwrap();
            assert_close(&l.dot(&u).unwrap(), &a);
        }
    }

    #[test]
    fn test_lu_singular_pivot() {
        let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        assert_eq!(
            a.lu(),
            Err(MatrixError::SingularPivot { step: 0, value: 0.0 })
        );

        let b = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert!(matches!(
            b.lu(),
            Err(MatrixError::SingularPivot { step: 1, .. })
        ));

        assert!(matches!(
            m(&[&[1.0, 2.0]]).lu(),
            Err(MatrixError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_solve() {
        let a = m(&[&[5.0, 1.0], &[3.0, -4.0]]);
        let x = a.solve(&[7.0, 18.0]).unwrap();
        assert_eq!(x.len(), 2);
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], -3.0, epsilon = 1e-12);

        let b = m(&[&[2.0, 1.0, -1.0], &[-3.0, -1.0, 2.0], &[-2.0, 1.0, 2.0]]);
        let x = b.solve(&[8.0, -11.0, -3.0]).unwrap();
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[2], -1.0, epsilon = 1e-12);

        assert_eq!(
            a.solve(&[1.0]),
            Err(MatrixError::DimensionMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_rref() {
        let a = m(&[
            &[1.0, 2.0, -1.0, -4.0],
            &[2.0, 3.0, -1.0, -11.0],
            &[-2.0, 0.0, -3.0, 22.0],
        ]);
        let r = a.rref();
        assert_close(
            &r,
            &m(&[
                &[1.0, 0.0, 0.0, -8.0],
                &[0.0, 1.0, 0.0, 1.0],
                &[0.0, 0.0, 1.0, -2.0],
            ]),
        );
        assert_eq!(a[(0, 3)], -4.0);
    }

    #[test]
    fn test_rref_needs_swap() {
        let a = m(&[&[0.0, 2.0], &[3.0, 6.0]]);
        assert_eq!(
            a.rref().to_list(),
            vec![vec![1.0, 0.0], vec![0.0, 1.0]]
        );
    }

    #[test]
    fn test_rref_rank_deficient() {
        let a = m(&[&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &[1.0, 3.0, 4.0]]);
        let r = a.rref();
        assert_eq!(
            r.to_list(),
            vec![vec![1.0, 0.0, 1.0], vec![0.0, 1.0, 1.0], vec![0.0, 0.0, 0.0]]
        );
        assert!(r.is_rref());
        assert!(!a.is_rref());

        let zeros = Matrix::zeros(2, 3);
        assert_eq!(zeros.rref(), zeros);

        let wide = m(&[&[0.0, 0.0, 1.0], &[0.0, 0.0, 2.0]]);
        assert_eq!(
            wide.rref().to_list(),
            vec![vec![0.0, 0.0, 1.0], vec![0.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn test_is_rref() {
        assert!(m(&[&[1.0, 0.0, 5.0], &[0.0, 1.0, 2.0]]).is_rref());
        assert!(m(&[&[0.0, 1.0], &[0.0, 0.0]]).is_rref());
        assert!(!m(&[&[1.0, 1.0], &[0.0, 1.0]]).is_rref());
        assert!(!m(&[&[2.0, 0.0], &[0.0, 1.0]]).is_rref());
        assert!(!m(&[&[0.0, 0.0], &[0.0, 1.0]]).is_rref());
        assert!(!m(&[&[0.0, 1.0], &[1.0, 0.0]]).is_rref());
    }
}
