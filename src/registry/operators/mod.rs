//! Built-in operator implementations
//!
//! All operators work on `i64`. A result that leaves the `i64` range fails with
//! [`ArithmeticError::WideOverflow`](crate::error::ArithmeticError::WideOverflow) or
//! its underflow twin rather than wrapping or clamping.

pub mod arithmetic;
pub mod bitwise;
pub mod roots;

pub use arithmetic::*;
pub use bitwise::*;
pub use roots::*;

use crate::registry::operator::{Operator, OperatorRegistry};

/// Register all built-in operators
pub fn register_builtin_operators(registry: &mut OperatorRegistry) {
    // Arithmetic operators
    registry.register("+", Operator::checked_binary(add));
    registry.register("-", Operator::checked_binary(subtract));
    registry.register("x", Operator::checked_binary(multiply));
    registry.register("*", Operator::checked_binary(multiply));
    registry.register("/", Operator::checked_binary(divide));
    registry.register("%", Operator::checked_binary(modulus));
    registry.register("^", Operator::checked_binary(power));

    // Shift operators
    registry.register("<", Operator::checked_binary(shift_left));
    registry.register(">", Operator::checked_binary(shift_right));

    // Root operators
    registry.register("Q", Operator::checked_unary(square_root));
    registry.register("C", Operator::unary(cube_root));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::operator::Arity;

    #[test]
    fn test_builtin_set() {
        let registry = OperatorRegistry::with_builtins();
        for token in ["+", "-", "x", "*", "/", "%", "^", "<", ">"] {
            assert_eq!(
                registry.lookup(token).unwrap().arity(),
                Arity::Binary,
                "{token}"
            );
        }
        for token in ["Q", "C"] {
            assert_eq!(registry.lookup(token).unwrap().arity(), Arity::Unary, "{token}");
        }
        assert_eq!(registry.len(), 11);
    }
}
