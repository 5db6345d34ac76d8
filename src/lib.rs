use pyo3::prelude::*;

pub mod error;
pub mod matrix {
    pub mod arithmetic;
    pub mod decomposition;
    pub mod matrix;
    pub mod matrix_py;
    pub mod product;
    pub mod properties;
}

pub mod utils;

pub use error::MatrixError;
pub use matrix::arithmetic::Operand;
pub use matrix::decomposition::LU_TOLERANCE;
pub use matrix::matrix::{Matrix, DEFAULT_PRECISION};
pub use matrix::properties::LeastSquares;

/// A Python module implemented in Rust.
#[pymodule]
fn rust_matrix(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<matrix::matrix_py::PyMatrix>()?;
    m.add("DEFAULT_PRECISION", DEFAULT_PRECISION)?;
    m.add("LU_TOLERANCE", LU_TOLERANCE)?;
    Ok(())
}
