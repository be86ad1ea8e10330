//! Error types for expression validation, conversion and evaluation

use std::fmt;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, PostfixError>;

/// Result type returned by operator implementations
pub type OperatorResult<T> = std::result::Result<T, ArithmeticError>;

/// Why an infix expression was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The expression was empty or contained only whitespace
    Empty,
    /// Opening and closing parentheses do not pair up
    UnmatchedParenthesis,
    /// A unary operator is not followed by an operand or a group
    MissingUnaryOperand {
        /// The operator character
        operator: char,
        /// Character offset in the simplified expression
        position: usize,
    },
    /// A binary operator is not preceded by an operand or a group
    MissingBinaryOperand {
        /// The operator character
        operator: char,
        /// Character offset in the simplified expression
        position: usize,
    },
    /// A character that is neither a literal, a parenthesis nor a registered operator
    UnrecognizedToken {
        /// The offending character
        token: char,
        /// Character offset in the simplified expression
        position: usize,
    },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Empty => write!(f, "empty expression"),
            InvalidReason::UnmatchedParenthesis => write!(f, "unmatched parenthesis"),
            InvalidReason::MissingUnaryOperand { operator, position } => {
                write!(f, "missing operand for unary operator '{operator}' at {position}")
            }
            InvalidReason::MissingBinaryOperand { operator, position } => {
                write!(f, "missing operand for binary operator '{operator}' at {position}")
            }
            InvalidReason::UnrecognizedToken { token, position } => {
                write!(f, "unrecognized token '{token}' at {position}")
            }
        }
    }
}

/// Structural problems found while evaluating a postfix expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// An operator found fewer operands on the stack than its arity
    NotEnoughLiterals,
    /// More than one value remained once every token was consumed
    TooManyLiterals,
    /// A token that is neither a registered operator nor an integer literal
    UnrecognizedToken(String),
    /// The expression held no tokens at all
    Empty,
    /// An integer literal too large for the wide evaluation type
    LiteralOutOfRange(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::NotEnoughLiterals => write!(f, "not enough literals"),
            MalformedReason::TooManyLiterals => write!(f, "too many literals"),
            MalformedReason::UnrecognizedToken(token) => write!(f, "unrecognized token {token}"),
            MalformedReason::Empty => write!(f, "empty expression"),
            MalformedReason::LiteralOutOfRange(token) => write!(f, "literal out of range {token}"),
        }
    }
}

/// Failures raised by an operator implementation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Division or modulus by zero
    #[error("division by zero")]
    DivisionByZero,
    /// Square root of a negative operand
    #[error("square root of negative operand {0}")]
    NegativeSquareRoot(i64),
    /// Shift by a negative amount
    #[error("negative shift amount {0}")]
    NegativeShift(i64),
    /// Zero raised to a negative power
    #[error("zero raised to negative power {0}")]
    ZeroToNegativePower(i64),
    /// Result above the `i64` range
    #[error("result exceeds the 64-bit range")]
    WideOverflow,
    /// Result below the `i64` range
    #[error("result is below the 64-bit range")]
    WideUnderflow,
}

impl ArithmeticError {
    /// Narrow an `i128` intermediate, classifying values outside `i64`
    pub fn narrow(value: i128) -> OperatorResult<i64> {
        i64::try_from(value).map_err(|_| {
            if value > 0 {
                Self::WideOverflow
            } else {
                Self::WideUnderflow
            }
        })
    }
}

/// Main error type for the postfix engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostfixError {
    /// Malformed infix input
    #[error("Invalid infix expression ({reason}): '{expression}'")]
    InvalidExpression {
        /// What was wrong with the expression
        reason: InvalidReason,
        /// The expression as given by the caller
        expression: String,
    },

    /// Lookup of a token with no registered operator
    #[error("Undefined postfix operator: {token}")]
    UndefinedOperator {
        /// The token that was looked up
        token: String,
    },

    /// Structurally invalid postfix input
    #[error("Malformed postfix expression ({reason}): '{expression}'")]
    MalformedExpression {
        /// What was wrong with the expression
        reason: MalformedReason,
        /// The expression as given by the caller
        expression: String,
    },

    /// Result above the published numeric domain
    #[error("Result {value} overflows the maximum of {max}")]
    Overflow {
        /// The computed wide value, `i64::MAX` when even that range was exceeded
        value: i64,
        /// Upper bound of the domain
        max: i64,
    },

    /// Result below the published numeric domain
    #[error("Result {value} underflows the minimum of {min}")]
    Underflow {
        /// The computed wide value, `i64::MIN` when even that range was exceeded
        value: i64,
        /// Lower bound of the domain
        min: i64,
    },

    /// An operator refused its operands
    #[error("Error evaluating operator '{operator}' ({source}): '{expression}'")]
    Arithmetic {
        /// The operator token
        operator: String,
        /// The operator failure
        #[source]
        source: ArithmeticError,
        /// The expression being evaluated
        expression: String,
    },

    /// Invalid engine configuration
    #[error("Invalid engine configuration: {message}")]
    Configuration {
        /// What was wrong
        message: String,
    },
}

impl PostfixError {
    /// Create an invalid infix expression error
    pub fn invalid(reason: InvalidReason, expression: impl Into<String>) -> Self {
        Self::InvalidExpression {
            reason,
            expression: expression.into(),
        }
    }

    /// Create a malformed postfix expression error
    pub fn malformed(reason: MalformedReason, expression: impl Into<String>) -> Self {
        Self::MalformedExpression {
            reason,
            expression: expression.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The offending expression text, when the error carries one
    pub fn expression(&self) -> Option<&str> {
        match self {
            Self::InvalidExpression { expression, .. }
            | Self::MalformedExpression { expression, .. }
            | Self::Arithmetic { expression, .. } => Some(expression),
            _ => None,
        }
    }

    /// The unbounded computed value for overflow and underflow errors
    pub fn unbounded_value(&self) -> Option<i64> {
        match self {
            Self::Overflow { value, .. } | Self::Underflow { value, .. } => Some(*value),
            _ => None,
        }
    }
}
