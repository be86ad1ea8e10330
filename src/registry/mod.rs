//! Operator registry
//!
//! Maps one-character (by convention) tokens to unary or binary integer operators.
//! The registry is an explicit value owned by each engine; nothing here is global.

pub mod operator;
pub mod operators;

pub use operator::{Arity, BinaryFn, Operator, OperatorRegistry, UnaryFn};
pub use operators::register_builtin_operators;
