use num_traits::Float;

/// Round `value` to `precision` decimal digits.
#[inline(always)]
pub fn round_to<F: Float>(value: F, precision: u32) -> F {
    let Some(ten) = F::from(10u8) else {
        return value;
    };
    let scale = ten.powi(precision as i32);
    (value * scale).round() / scale
}

/// Equality where NaN equals NaN.
#[inline(always)]
pub fn same_value<F: Float>(a: F, b: F) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

pub fn rows_equal<F: Float>(a: &[Vec<F>], b: &[Vec<F>]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b.iter()).all(|(ra, rb)| {
            ra.len() == rb.len() && ra.iter().zip(rb.iter()).all(|(x, y)| same_value(*x, *y))
        })
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
