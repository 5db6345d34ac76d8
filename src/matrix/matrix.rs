use itertools::Itertools;
use rand::Rng;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::MatrixError;
use crate::utils::rows_equal;

/// Decimal digits kept on each term of a matrix product.
pub const DEFAULT_PRECISION: u32 = 4;

/// Dense row-major matrix of `f64`.
///
/// All rows are expected to have the same length. Constructors taking a
/// `Vec<Vec<f64>>` by value reuse that storage as is, `from_array` and
/// `clone` produce independent storage.
#[derive(Debug, Clone)]
pub struct Matrix {
    data: Vec<Vec<f64>>,
    pub precision: u32,
}

impl From<Vec<Vec<f64>>> for Matrix {
    fn from(data: Vec<Vec<f64>>) -> Self {
        Matrix {
            data,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Matrix {
    /// Wrap rows (or an existing matrix) without copying.
    ///
    /// `Matrix::of(Matrix::of(x))` is `Matrix::of(x)`.
    pub fn of<M: Into<Matrix>>(value: M) -> Matrix {
        value.into()
    }

    /// Build a matrix owning a deep copy of `rows`.
    pub fn from_array(rows: &[Vec<f64>]) -> Matrix {
        Matrix::of(rows.to_vec())
    }

    pub fn with_precision(mut self, precision: u32) -> Matrix {
        self.precision = precision;
        self
    }

    /// Build a `rows` x `cols` matrix where each cell is `f(row, col)`.
    pub fn generate<F>(rows: usize, cols: usize, mut f: F) -> Matrix
    where
        F: FnMut(usize, usize) -> f64,
    {
        Matrix::of(
            (0..rows)
                .map(|i| (0..cols).map(|j| f(i, j)).collect())
                .collect::<Vec<Vec<f64>>>(),
        )
    }

    /// Blank matrix of the given shape, every cell set to zero.
    pub fn empty(rows: usize, cols: usize) -> Matrix {
        Matrix::generate(rows, cols, |_, _| 0.0)
    }

    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::empty(rows, cols)
    }

    pub fn ones(rows: usize, cols: usize) -> Matrix {
        Matrix::generate(rows, cols, |_, _| 1.0)
    }

    pub fn identity(rows: usize, cols: usize) -> Matrix {
        Matrix::generate(rows, cols, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Matrix filled with values drawn uniformly from `[-1, 1)`.
    pub fn random(rows: usize, cols: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        Matrix::generate(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
    }

    // Same shape as `self`, new contents.

    fn fill_like<F: FnMut(usize, usize) -> f64>(&self, f: F) -> Matrix {
        Matrix::generate(self.rows(), self.cols(), f).with_precision(self.precision)
    }

    pub fn zeros_like(&self) -> Matrix {
        self.fill_like(|_, _| 0.0)
    }

    pub fn ones_like(&self) -> Matrix {
        self.fill_like(|_, _| 1.0)
    }

    pub fn identity_like(&self) -> Matrix {
        self.fill_like(|i, j| if i == j { 1.0 } else { 0.0 })
    }

    pub fn random_like(&self) -> Matrix {
        let mut rng = rand::thread_rng();
        self.fill_like(|_, _| rng.gen_range(-1.0..1.0))
    }

    /// Same shape as `self`, each cell produced by calling `f` once.
    pub fn random_with<F: FnMut() -> f64>(&self, mut f: F) -> Matrix {
        self.fill_like(|_, _| f())
    }

    /// Overwrite every cell in place.
    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|row| row.fill(value));
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Length of the first row.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has no rows.
    pub fn cols(&self) -> usize {
        self.data[0].len()
    }

    /// `(rows, cols)`, see [`Matrix::cols`] for the zero-row case.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.data[index]
    }

    pub fn as_rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.data
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.data
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }

    /// Apply `f(row, row_index)` to every row.
    pub fn map<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(&[f64], usize) -> Vec<f64>,
    {
        Matrix::of(
            self.data
                .iter()
                .enumerate()
                .map(|(i, row)| f(row, i))
                .collect::<Vec<Vec<f64>>>(),
        )
        .with_precision(self.precision)
    }

    /// Apply `f(value, row, col)` to every cell.
    pub fn map_elements<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64, usize, usize) -> f64,
    {
        self.map(|row, i| row.iter().enumerate().map(|(j, x)| f(*x, i, j)).collect())
    }

    /// Left fold over the rows, starting from an empty row list.
    pub fn fold<F>(&self, f: F) -> Matrix
    where
        F: FnMut(Vec<Vec<f64>>, (usize, &Vec<f64>)) -> Vec<Vec<f64>>,
    {
        Matrix::of(self.data.iter().enumerate().fold(vec![], f)).with_precision(self.precision)
    }

    /// Stack `other` to the right of `self`.
    pub fn concat(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.concat_with(other, |a, b| a.iter().chain(b.iter()).copied().collect())
    }

    /// Combine row `i` of `self` with row `i` of `other` through `op`.
    pub fn concat_with<F>(&self, other: &Matrix, mut op: F) -> Result<Matrix, MatrixError>
    where
        F: FnMut(&[f64], &[f64]) -> Vec<f64>,
    {
        if self.rows() != other.rows() {
            return Err(MatrixError::RowCountMismatch {
                left: self.rows(),
                right: other.rows(),
            });
        }
        Ok(self.map(|row, i| op(row, &other.data[i])))
    }

    pub fn transpose(&self) -> Matrix {
        self.fold(|mut acc, (_, row)| {
            for (i, value) in row.iter().enumerate() {
                match acc.get_mut(i) {
                    Some(column) => column.push(*value),
                    None => acc.push(vec![*value]),
                }
            }
            acc
        })
    }

    /// Structural equality of the cells, NaN equals NaN.
    pub fn equals(&self, other: &Matrix) -> bool {
        rows_equal(&self.data, &other.data)
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.equals(other)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline(always)]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row][col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.data
                .iter()
                .map(|row| format!("[{}]", row.iter().join(", ")))
                .join("\n")
        )
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::of(rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>())
    }

    #[test]
    fn test_shape() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(a.rows(), 2);
        assert_eq!(a.cols(), 3);
        assert_eq!(a.shape(), (2, 3));
        assert_eq!(a.precision, DEFAULT_PRECISION);
        assert_eq!(a[(1, 2)], 6.0);
    }

    #[test]
    #[should_panic]
    fn test_cols_of_zero_rows() {
        Matrix::of(Vec::<Vec<f64>>::new()).cols();
    }

    #[test]
    fn test_of_is_idempotent() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let a = Matrix::of(rows.clone());
        let b = Matrix::of(Matrix::of(rows.clone()).with_precision(7));
        assert_eq!(Matrix::of(a.clone()), a);
        assert_eq!(b.precision, 7);
        assert_eq!(b.to_list(), rows);
    }

    #[test]
    fn test_clone_is_independent() {
        let a = Matrix::from_array(&[vec![1.0, 2.0], vec![3.0, 4.0]]).with_precision(2);
        let mut b = a.clone();
        b[(0, 0)] = 9.0;
        b.rows_mut()[1][1] = 8.0;
        assert_eq!(a.to_list(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(b.to_list(), vec![vec![9.0, 2.0], vec![3.0, 8.0]]);
        assert_eq!(b.precision, 2);
    }

    #[test]
    fn test_generators() {
        assert_eq!(
            Matrix::identity(2, 3).to_list(),
            vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]
        );
        assert_eq!(Matrix::zeros(1, 2).to_list(), vec![vec![0.0, 0.0]]);
        assert_eq!(Matrix::ones(2, 1).to_list(), vec![vec![1.0], vec![1.0]]);
        assert_eq!(Matrix::empty(3, 2).shape(), (3, 2));

        let a = m(&[&[5.0, 6.0], &[7.0, 8.0], &[9.0, 1.0]]).with_precision(3);
        assert_eq!(a.zeros_like(), Matrix::zeros(3, 2));
        assert_eq!(a.ones_like(), Matrix::ones(3, 2));
        assert_eq!(a.identity_like(), Matrix::identity(3, 2));
        assert_eq!(a.identity_like().precision, 3);

        let mut counter = 0.0;
        let counted = a.random_with(|| {
            counter += 1.0;
            counter
        });
        assert_eq!(
            counted.to_list(),
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]
        );

        let r = Matrix::random(4, 5);
        assert_eq!(r.shape(), (4, 5));
        assert!(r.as_rows().iter().flatten().all(|x| (-1.0..1.0).contains(x)));
        assert_eq!(a.random_like().shape(), (3, 2));
    }

    #[test]
    fn test_fill() {
        let mut a = Matrix::zeros(2, 2);
        a.fill(3.5);
        assert_eq!(a.to_list(), vec![vec![3.5, 3.5], vec![3.5, 3.5]]);
    }

    #[test]
    fn test_map_and_fold() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let shifted = a.map(|row, i| row.iter().map(|x| x + i as f64).collect());
        assert_eq!(shifted.to_list(), vec![vec![1.0, 2.0], vec![4.0, 5.0]]);

        let scaled = a.map_elements(|x, i, j| x * 10.0 + (i * 2 + j) as f64);
        assert_eq!(scaled.to_list(), vec![vec![10.0, 21.0], vec![32.0, 43.0]]);

        let reversed = a.fold(|mut acc, (_, row)| {
            acc.insert(0, row.clone());
            acc
        });
        assert_eq!(reversed.to_list(), vec![vec![3.0, 4.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn test_concat() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0], &[6.0]]);
        let c = a.concat(&b).unwrap();
        assert_eq!(c.shape(), (2, 3));
        assert_eq!(c.to_list(), vec![vec![1.0, 2.0, 5.0], vec![3.0, 4.0, 6.0]]);

        let sums = a
            .concat_with(&a, |x, y| x.iter().zip(y).map(|(p, q)| p + q).collect())
            .unwrap();
        assert_eq!(sums.to_list(), vec![vec![2.0, 4.0], vec![6.0, 8.0]]);

        assert_eq!(
            a.concat(&m(&[&[1.0]])),
            Err(MatrixError::RowCountMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_transpose() {
        let a = m(&[&[-1.0, 2.0], &[3.0, 4.0], &[-8.0, 2.0]]);
        assert_eq!(
            a.transpose().to_list(),
            vec![vec![-1.0, 3.0, -8.0], vec![2.0, 4.0, 2.0]]
        );
        assert_eq!(a.transpose().transpose(), a);

        let r = Matrix::random(3, 7);
        assert_eq!(r.transpose().shape(), (7, 3));
        assert_eq!(r.transpose().transpose(), r);
    }

    #[test]
    fn test_equals() {
        let a = m(&[&[1.0, f64::NAN]]);
        assert!(a.equals(&m(&[&[1.0, f64::NAN]])));
        assert!(!a.equals(&m(&[&[1.0, 2.0]])));
        assert_ne!(a, m(&[&[1.0, f64::NAN], &[1.0, 2.0]]));
    }

    #[test]
    fn test_display() {
        let a = m(&[&[1.0, 2.5], &[-3.0, 4.0]]);
        assert_eq!(a.to_string(), "[1, 2.5]\n[-3, 4]");
    }
}
