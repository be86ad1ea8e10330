//! Arithmetic operators

use crate::error::{ArithmeticError, OperatorResult};

/// Checked addition
pub fn add(a: i64, b: i64) -> OperatorResult<i64> {
    ArithmeticError::narrow(i128::from(a) + i128::from(b))
}

/// Checked subtraction
pub fn subtract(a: i64, b: i64) -> OperatorResult<i64> {
    ArithmeticError::narrow(i128::from(a) - i128::from(b))
}

/// Checked multiplication
pub fn multiply(a: i64, b: i64) -> OperatorResult<i64> {
    ArithmeticError::narrow(i128::from(a) * i128::from(b))
}

/// Truncating division
pub fn divide(a: i64, b: i64) -> OperatorResult<i64> {
    if b == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    // Only i64::MIN / -1 leaves the range
    ArithmeticError::narrow(i128::from(a) / i128::from(b))
}

/// Remainder with the sign of the dividend
pub fn modulus(a: i64, b: i64) -> OperatorResult<i64> {
    if b == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a.wrapping_rem(b))
}

/// Exponentiation rounded toward zero
///
/// Negative exponents produce the integer part of the real result, so only bases of
/// magnitude one survive them.
pub fn power(a: i64, b: i64) -> OperatorResult<i64> {
    let odd = b % 2 != 0;
    match a {
        0 if b < 0 => return Err(ArithmeticError::ZeroToNegativePower(b)),
        0 => return Ok(if b == 0 { 1 } else { 0 }),
        1 => return Ok(1),
        -1 => return Ok(if odd { -1 } else { 1 }),
        _ if b < 0 => return Ok(0),
        _ => {}
    }

    let out_of_range = if a < 0 && odd {
        ArithmeticError::WideUnderflow
    } else {
        ArithmeticError::WideOverflow
    };
    u32::try_from(b)
        .ok()
        .and_then(|exponent| a.checked_pow(exponent))
        .ok_or(out_of_range)
}
