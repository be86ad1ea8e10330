//! Operator registry and operator variants

use crate::error::{OperatorResult, PostfixError, Result};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Shared unary operator implementation
pub type UnaryFn = Arc<dyn Fn(i64) -> OperatorResult<i64> + Send + Sync>;

/// Shared binary operator implementation, called with `(left, right)`
pub type BinaryFn = Arc<dyn Fn(i64, i64) -> OperatorResult<i64> + Send + Sync>;

/// Number of operands an operator consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arity {
    /// One operand
    Unary,
    /// Two operands
    Binary,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Unary => write!(f, "unary"),
            Arity::Binary => write!(f, "binary"),
        }
    }
}

/// An operator bound to a token
#[derive(Clone)]
pub enum Operator {
    /// Maps one operand to a result
    Unary(UnaryFn),
    /// Maps ordered `(left, right)` operands to a result
    Binary(BinaryFn),
}

impl Operator {
    /// Wrap an infallible unary function
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        Operator::Unary(Arc::new(move |a| Ok(f(a))))
    }

    /// Wrap an infallible binary function
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(i64, i64) -> i64 + Send + Sync + 'static,
    {
        Operator::Binary(Arc::new(move |a, b| Ok(f(a, b))))
    }

    /// Wrap a unary function that may refuse its operand
    pub fn checked_unary<F>(f: F) -> Self
    where
        F: Fn(i64) -> OperatorResult<i64> + Send + Sync + 'static,
    {
        Operator::Unary(Arc::new(f))
    }

    /// Wrap a binary function that may refuse its operands
    pub fn checked_binary<F>(f: F) -> Self
    where
        F: Fn(i64, i64) -> OperatorResult<i64> + Send + Sync + 'static,
    {
        Operator::Binary(Arc::new(f))
    }

    /// Operand count of this operator
    pub fn arity(&self) -> Arity {
        match self {
            Operator::Unary(_) => Arity::Unary,
            Operator::Binary(_) => Arity::Binary,
        }
    }

    /// Whether this is a unary operator
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::Unary(_))
    }

    /// Whether this is a binary operator
    pub fn is_binary(&self) -> bool {
        matches!(self, Operator::Binary(_))
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Operator").field(&self.arity()).finish()
    }
}

/// Registry mapping tokens to operators
///
/// At most one operator is bound to a token; registering a token again replaces the
/// previous binding.
#[derive(Clone, Default)]
pub struct OperatorRegistry {
    operators: FxHashMap<String, Operator>,
}

impl OperatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in operator set
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::operators::register_builtin_operators(&mut registry);
        registry
    }

    /// Bind `token` to `operator`, replacing any earlier binding
    pub fn register(&mut self, token: impl Into<String>, operator: Operator) {
        let token = token.into();
        log::debug!("Registering {} operator '{}'", operator.arity(), token);
        if self.operators.insert(token.clone(), operator).is_some() {
            log::debug!("Operator '{token}' replaced an earlier registration");
        }
    }

    /// Whether `token` has a registered operator
    pub fn is_valid_operator(&self, token: &str) -> bool {
        self.operators.contains_key(token)
    }

    /// Get the operator bound to `token`
    pub fn lookup(&self, token: &str) -> Result<&Operator> {
        self.operators
            .get(token)
            .ok_or_else(|| PostfixError::UndefinedOperator {
                token: token.to_string(),
            })
    }

    /// Get the operator bound to `token`, if any
    pub fn get(&self, token: &str) -> Option<&Operator> {
        self.operators.get(token)
    }

    /// Arity of the single-character operator `c`, if one is registered
    pub fn char_arity(&self, c: char) -> Option<Arity> {
        let mut buf = [0u8; 4];
        let token: &str = c.encode_utf8(&mut buf);
        self.operators.get(token).map(Operator::arity)
    }

    /// Snapshot of every registered token
    pub fn supported_operators(&self) -> BTreeSet<String> {
        self.operators.keys().cloned().collect()
    }

    /// Registered tokens paired with their arity, ordered by token
    pub fn entries(&self) -> Vec<(&str, Arity)> {
        let mut entries: Vec<_> = self
            .operators
            .iter()
            .map(|(token, op)| (token.as_str(), op.arity()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Number of registered operators
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether no operator is registered
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
