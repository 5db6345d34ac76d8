use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::error::MatrixError;
use crate::matrix::arithmetic::Operand;
use crate::matrix::matrix::Matrix;

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

#[derive(Debug, Clone)]
#[pyclass(name = "Matrix", frozen)]
pub struct PyMatrix {
    pub inner: Matrix,
}

impl From<Matrix> for PyMatrix {
    fn from(inner: Matrix) -> Self {
        PyMatrix { inner }
    }
}

#[derive(FromPyObject)]
pub enum MatrixOrFloat<'a> {
    Matrix(Bound<'a, PyMatrix>),
    Float(f64),
}

impl MatrixOrFloat<'_> {
    fn apply<F>(&self, f: F) -> Result<Matrix, MatrixError>
    where
        F: FnOnce(Operand) -> Result<Matrix, MatrixError>,
    {
        match self {
            MatrixOrFloat::Matrix(other) => f(Operand::Matrix(&other.get().inner)),
            MatrixOrFloat::Float(value) => f(Operand::Scalar(*value)),
        }
    }
}

#[pymethods]
impl PyMatrix {
    #[new]
    #[pyo3(signature = (lines, precision = crate::matrix::matrix::DEFAULT_PRECISION))]
    pub fn new(lines: Vec<Vec<f64>>, precision: u32) -> Self {
        Matrix::of(lines).with_precision(precision).into()
    }

    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> Self {
        Matrix::of(lines).into()
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, rows: usize, cols: usize) -> Self {
        Matrix::identity(rows, cols).into()
    }

    #[classmethod]
    pub fn zeros(_cls: &Bound<PyType>, rows: usize, cols: usize) -> Self {
        Matrix::zeros(rows, cols).into()
    }

    #[classmethod]
    pub fn ones(_cls: &Bound<PyType>, rows: usize, cols: usize) -> Self {
        Matrix::ones(rows, cols).into()
    }

    #[classmethod]
    pub fn random(_cls: &Bound<PyType>, rows: usize, cols: usize) -> Self {
        Matrix::random(rows, cols).into()
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    #[getter]
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    #[getter]
    pub fn precision(&self) -> u32 {
        self.inner.precision
    }

    #[getter]
    #[allow(non_snake_case)]
    pub fn T(&self) -> PyMatrix {
        self.inner.transpose().into()
    }

    pub fn __add__(&self, rhs: MatrixOrFloat) -> PyResult<PyMatrix> {
        Ok(rhs.apply(|rhs| self.inner.add(rhs))?.into())
    }

    pub fn __radd__(&self, lhs: f64) -> PyMatrix {
        (&self.inner + lhs).into()
    }

    pub fn __sub__(&self, rhs: MatrixOrFloat) -> PyResult<PyMatrix> {
        Ok(rhs.apply(|rhs| self.inner.subtract(rhs))?.into())
    }

    pub fn __mul__(&self, rhs: MatrixOrFloat) -> PyResult<PyMatrix> {
        Ok(rhs.apply(|rhs| self.inner.multiply(rhs))?.into())
    }

    pub fn __rmul__(&self, lhs: f64) -> PyMatrix {
        (&self.inner * lhs).into()
    }

    pub fn __truediv__(&self, rhs: MatrixOrFloat) -> PyResult<PyMatrix> {
        Ok(rhs.apply(|rhs| self.inner.divide(rhs))?.into())
    }

    pub fn __matmul__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok(self.inner.dot(&rhs.inner)?.into())
    }

    pub fn __neg__(&self) -> PyMatrix {
        self.inner.additive_inverse().into()
    }

    pub fn __eq__(&self, other: &PyMatrix) -> bool {
        self.inner.equals(&other.inner)
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Matrix({:?})", self.inner.as_rows())
    }

    pub fn dot(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        self.__matmul__(rhs)
    }

    pub fn kronecker(&self, rhs: &PyMatrix) -> PyMatrix {
        self.inner.kronecker(&rhs.inner).into()
    }

    pub fn concat(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok(self.inner.concat(&rhs.inner)?.into())
    }

    pub fn lu(&self) -> PyResult<(PyMatrix, PyMatrix)> {
        let (lower, upper) = self.inner.lu()?;
        Ok((lower.into(), upper.into()))
    }

    pub fn solve(&self, b: Vec<f64>) -> PyResult<Vec<f64>> {
        Ok(self.inner.solve(&b)?)
    }

    pub fn rref(&self) -> PyMatrix {
        self.inner.rref().into()
    }

    pub fn is_rref(&self) -> bool {
        self.inner.is_rref()
    }

    pub fn determinant(&self) -> PyResult<f64> {
        Ok(self.inner.determinant()?)
    }

    pub fn rank(&self) -> f64 {
        self.inner.rank()
    }

    pub fn pivot_count(&self) -> usize {
        self.inner.pivot_count()
    }

    pub fn inverse(&self) -> PyResult<PyMatrix> {
        Ok(self.inner.inverse()?.into())
    }

    /// Returns `(x, fitted, residual)`.
    pub fn lsq(&self, b: Vec<f64>) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>)> {
        let fit = self.inner.lsq(&b)?;
        Ok((fit.x, fit.fitted, fit.residual))
    }

    pub fn is_square(&self) -> bool {
        self.inner.is_square()
    }

    pub fn is_symmetric(&self) -> bool {
        self.inner.is_symmetric()
    }

    pub fn is_orthogonal(&self) -> bool {
        self.inner.is_orthogonal()
    }

    pub fn diag(&self) -> Vec<f64> {
        self.inner.diag()
    }

    pub fn diag_product(&self) -> f64 {
        self.inner.diag_product()
    }

    pub fn trace(&self) -> f64 {
        self.inner.trace()
    }

    pub fn sum(&self) -> f64 {
        self.inner.sum()
    }

    pub fn max(&self) -> f64 {
        self.inner.max()
    }

    pub fn min(&self) -> f64 {
        self.inner.min()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
