//! Shift operators
//!
//! `<` and `>` are shifts, not comparisons.

use crate::error::{ArithmeticError, OperatorResult};

/// Left shift, computed as `a * 2^b`
///
/// Fails with a wide overflow or underflow instead of dropping high bits.
pub fn shift_left(a: i64, b: i64) -> OperatorResult<i64> {
    if b < 0 {
        return Err(ArithmeticError::NegativeShift(b));
    }
    if a == 0 {
        return Ok(0);
    }
    if b >= 64 {
        return Err(if a > 0 {
            ArithmeticError::WideOverflow
        } else {
            ArithmeticError::WideUnderflow
        });
    }
    // |a| <= 2^63 and b <= 63 keep the product inside i128
    ArithmeticError::narrow(i128::from(a) << b)
}

/// Arithmetic right shift; shifting by 63 or more leaves only the sign
pub fn shift_right(a: i64, b: i64) -> OperatorResult<i64> {
    if b < 0 {
        return Err(ArithmeticError::NegativeShift(b));
    }
    Ok(a >> b.min(63))
}
