//! Infix expression handling
//!
//! Validation and simplification, tokenization, and precedence-free conversion of
//! infix expressions to postfix notation.

#![warn(missing_docs)]

pub mod converter;
pub mod tokenizer;
pub mod validator;

pub use converter::{convert_infix, convert_simplified};
pub use tokenizer::{InfixToken, Spanned, Tokenizer, is_integer_literal};
pub use validator::{simplify, validate_and_simplify};
