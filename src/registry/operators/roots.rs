//! Integer root operators

use crate::error::{ArithmeticError, OperatorResult};

/// Floor of the square root
pub fn square_root(a: i64) -> OperatorResult<i64> {
    if a < 0 {
        return Err(ArithmeticError::NegativeSquareRoot(a));
    }
    Ok(a.isqrt())
}

/// Cube root truncated toward zero
pub fn cube_root(a: i64) -> i64 {
    let magnitude = i128::from(a).abs();

    // Float estimate, then correct the last step exactly
    let mut root = (magnitude as f64).cbrt() as i128;
    while root * root * root > magnitude {
        root -= 1;
    }
    while (root + 1) * (root + 1) * (root + 1) <= magnitude {
        root += 1;
    }

    // |root| <= 2^21, always fits
    let root = root as i64;
    if a < 0 { -root } else { root }
}
