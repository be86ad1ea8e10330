//! Postfix engine - the main entry point for expression conversion and evaluation

use crate::config::EngineConfig;
use crate::error::{OperatorResult, PostfixError, Result};
use crate::evaluator::Evaluator;
use crate::parser::{convert_infix, convert_simplified, validate_and_simplify};
use crate::registry::{Arity, Operator, OperatorRegistry};
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// Integer expression engine with an extensible operator set
///
/// The engine owns its operator registry behind a read-write lock: validation,
/// conversion and evaluation hold a read guard for the whole call, registration takes
/// the write guard. An engine can therefore be shared across threads and extended
/// while in use without an in-flight evaluation ever seeing a half-updated registry.
pub struct PostfixEngine {
    registry: RwLock<OperatorRegistry>,
    config: EngineConfig,
}

impl Default for PostfixEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PostfixEngine {
    fn clone(&self) -> Self {
        Self {
            registry: RwLock::new(self.registry.read().clone()),
            config: self.config.clone(),
        }
    }
}

impl std::fmt::Debug for PostfixEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostfixEngine")
            .field("registry", &*self.registry.read())
            .field("config", &self.config)
            .finish()
    }
}

impl PostfixEngine {
    /// Create an engine with the built-in operators and the default configuration
    pub fn new() -> Self {
        Self::from_parts(OperatorRegistry::with_builtins(), EngineConfig::default())
    }

    /// Create an engine with the built-in operators and a custom configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Self::with_registry(OperatorRegistry::with_builtins(), config)
    }

    /// Create an engine from an existing registry
    ///
    /// Fails when the configuration is invalid or when the separator is itself a
    /// registered operator, since infix input could then never use that operator.
    pub fn with_registry(registry: OperatorRegistry, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        if let Some(arity) = registry.char_arity(config.separator) {
            return Err(PostfixError::configuration(format!(
                "separator '{}' is registered as a {arity} operator",
                config.separator
            )));
        }
        Ok(Self::from_parts(registry, config))
    }

    fn from_parts(registry: OperatorRegistry, config: EngineConfig) -> Self {
        log::debug!(
            "Created postfix engine with {} operators, bounds {}",
            registry.len(),
            config.bounds
        );
        Self {
            registry: RwLock::new(registry),
            config,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bind `token` to `operator`, replacing any earlier binding
    ///
    /// A token equal to the configured separator is accepted but only works in
    /// postfix expressions: infix validation and tokenizing treat it as a separator.
    pub fn register(&self, token: impl Into<String>, operator: Operator) {
        let token = token.into();
        if self.is_separator(&token) {
            log::warn!(
                "Operator '{token}' matches the separator and is only usable in postfix expressions"
            );
        }
        self.registry.write().register(token, operator);
    }

    fn is_separator(&self, token: &str) -> bool {
        let mut chars = token.chars();
        chars.next() == Some(self.config.separator) && chars.next().is_none()
    }

    /// Register an infallible unary operator
    pub fn register_unary<F>(&self, token: impl Into<String>, f: F)
    where
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        self.register(token, Operator::unary(f));
    }

    /// Register an infallible binary operator, called with `(left, right)`
    pub fn register_binary<F>(&self, token: impl Into<String>, f: F)
    where
        F: Fn(i64, i64) -> i64 + Send + Sync + 'static,
    {
        self.register(token, Operator::binary(f));
    }

    /// Register a unary operator that may refuse its operand
    pub fn register_checked_unary<F>(&self, token: impl Into<String>, f: F)
    where
        F: Fn(i64) -> OperatorResult<i64> + Send + Sync + 'static,
    {
        self.register(token, Operator::checked_unary(f));
    }

    /// Register a binary operator that may refuse its operands
    pub fn register_checked_binary<F>(&self, token: impl Into<String>, f: F)
    where
        F: Fn(i64, i64) -> OperatorResult<i64> + Send + Sync + 'static,
    {
        self.register(token, Operator::checked_binary(f));
    }

    /// Whether `token` has a registered operator
    pub fn is_valid_operator(&self, token: &str) -> bool {
        self.registry.read().is_valid_operator(token)
    }

    /// Get the operator bound to `token`
    pub fn lookup(&self, token: &str) -> Result<Operator> {
        self.registry.read().lookup(token).cloned()
    }

    /// Snapshot of every registered token
    pub fn supported_operators(&self) -> BTreeSet<String> {
        self.registry.read().supported_operators()
    }

    /// Registered tokens with their arity, ordered by token
    pub fn operator_table(&self) -> Vec<(String, Arity)> {
        self.registry
            .read()
            .entries()
            .into_iter()
            .map(|(token, arity)| (token.to_string(), arity))
            .collect()
    }

    /// Copy of the current registry
    pub fn registry_snapshot(&self) -> OperatorRegistry {
        self.registry.read().clone()
    }

    /// Validate an infix expression and return its simplified form
    pub fn validate_and_simplify(&self, expression: &str) -> Result<String> {
        validate_and_simplify(expression, &self.registry.read(), self.config.separator)
    }

    /// Convert an infix expression to postfix notation
    pub fn convert_infix_expression(&self, expression: &str) -> Result<String> {
        convert_infix(expression, &self.registry.read(), self.config.separator)
    }

    /// Evaluate a postfix expression
    pub fn evaluate(&self, expression: &str) -> Result<i64> {
        let registry = self.registry.read();
        Evaluator::new(&registry, self.config.bounds).evaluate(expression)
    }

    /// Evaluate an infix expression by converting it to postfix first
    ///
    /// The registry stays read-locked across both steps, so conversion and evaluation
    /// see the same operator set.
    pub fn evaluate_infix(&self, expression: &str) -> Result<i64> {
        let registry = self.registry.read();
        let separator = self.config.separator;

        let simplified = validate_and_simplify(expression, &registry, separator)?;
        let postfix = convert_simplified(&simplified, &registry, separator)
            .map_err(|reason| PostfixError::invalid(reason, expression))?;
        Evaluator::new(&registry, self.config.bounds).evaluate(&postfix)
    }
}

/// Shorter name for [`PostfixEngine`]
pub type Engine = PostfixEngine;
