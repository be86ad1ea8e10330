//! Integer expression engine in Rust
//!
//! Validates infix expressions, converts them to postfix notation, and evaluates
//! postfix expressions against an extensible operator registry. The crate also ships
//! the instrumented sorting and word-counting modules the `postfix` binary exposes.
//!
//! ```
//! use postfix_engine::PostfixEngine;
//!
//! let engine = PostfixEngine::new();
//! let postfix = engine.convert_infix_expression("( 3 + 4 ) * 2").unwrap();
//! assert_eq!(postfix, "3 4 + 2 *");
//! assert_eq!(engine.evaluate(&postfix).unwrap(), 14);
//! ```

pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod registry;
pub mod sorting;
pub mod wordcount;

// Re-export main types
pub use config::{EngineConfig, NumericBounds};
pub use engine::{Engine, PostfixEngine};
pub use error::{ArithmeticError, InvalidReason, MalformedReason, PostfixError, Result};
pub use registry::{Arity, Operator, OperatorRegistry};
