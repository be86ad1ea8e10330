//! Postfix expression evaluation
//!
//! Tokens are separated by spaces or tabs. Arithmetic runs on `i64` and only the
//! final value is checked against the configured [`NumericBounds`], so a result
//! outside the domain is reported with its true value instead of wrapping. An
//! intermediate that leaves the `i64` range fails at once with the overflow or
//! underflow error, carrying the `i64` limit it passed.

use crate::buffer::ExpressionBuffer;
use crate::config::NumericBounds;
use crate::error::{ArithmeticError, MalformedReason, PostfixError, Result};
use crate::parser::is_integer_literal;
use crate::registry::{Operator, OperatorRegistry};

/// Evaluates postfix expressions against a borrowed registry
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    registry: &'a OperatorRegistry,
    bounds: NumericBounds,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator
    pub fn new(registry: &'a OperatorRegistry, bounds: NumericBounds) -> Self {
        Self { registry, bounds }
    }

    /// Evaluate `expression`, returning the single remaining value
    pub fn evaluate(&self, expression: &str) -> Result<i64> {
        let malformed = |reason| PostfixError::malformed(reason, expression);
        let mut buffer: ExpressionBuffer<i64> = ExpressionBuffer::new();
        let mut seen_token = false;

        for token in expression.split_whitespace() {
            seen_token = true;

            if let Some(operator) = self.registry.get(token) {
                let applied = match operator {
                    Operator::Binary(apply) => {
                        let (left, right) = buffer
                            .pop_pair()
                            .ok_or_else(|| malformed(MalformedReason::NotEnoughLiterals))?;
                        apply(left, right)
                    }
                    Operator::Unary(apply) => {
                        let operand = buffer
                            .pop()
                            .ok_or_else(|| malformed(MalformedReason::NotEnoughLiterals))?;
                        apply(operand)
                    }
                };
                let value =
                    applied.map_err(|source| self.operator_error(token, source, expression))?;
                log::trace!("Applied '{token}' -> {value}");
                buffer.push(value);
            } else if is_integer_literal(token) {
                let value: i64 = token.parse().map_err(|_| {
                    malformed(MalformedReason::LiteralOutOfRange(token.to_string()))
                })?;
                log::trace!("Pushed literal {value}");
                buffer.push(value);
            } else {
                return Err(malformed(MalformedReason::UnrecognizedToken(
                    token.to_string(),
                )));
            }
        }

        if !seen_token {
            return Err(malformed(MalformedReason::Empty));
        }

        let result = buffer
            .into_single()
            .ok_or_else(|| malformed(MalformedReason::TooManyLiterals))?;
        log::debug!("Evaluated '{expression}' to {result}");
        self.bounds.check(result)
    }

    fn operator_error(
        &self,
        token: &str,
        source: ArithmeticError,
        expression: &str,
    ) -> PostfixError {
        match source {
            ArithmeticError::WideOverflow => {
                log::debug!("Operator '{token}' left the i64 range in '{expression}'");
                PostfixError::Overflow {
                    value: i64::MAX,
                    max: self.bounds.max,
                }
            }
            ArithmeticError::WideUnderflow => {
                log::debug!("Operator '{token}' left the i64 range in '{expression}'");
                PostfixError::Underflow {
                    value: i64::MIN,
                    min: self.bounds.min,
                }
            }
            source => PostfixError::Arithmetic {
                operator: token.to_string(),
                source,
                expression: expression.to_string(),
            },
        }
    }
}

/// Evaluate a postfix expression
pub fn evaluate(
    expression: &str,
    registry: &OperatorRegistry,
    bounds: NumericBounds,
) -> Result<i64> {
    Evaluator::new(registry, bounds).evaluate(expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expression: &str) -> Result<i64> {
        evaluate(
            expression,
            &OperatorRegistry::with_builtins(),
            NumericBounds::default(),
        )
    }

    fn malformed_reason(expression: &str) -> MalformedReason {
        match eval(expression) {
            Err(PostfixError::MalformedExpression { reason, .. }) => reason,
            other => panic!("expected malformed expression for {expression:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("3 4 + 2 *"), Ok(14));
        assert_eq!(eval("3 4 + 2 x"), Ok(14));
        assert_eq!(eval("10 3 -"), Ok(7));
        assert_eq!(eval("10 3 /"), Ok(3));
        assert_eq!(eval("10 3 %"), Ok(1));
        assert_eq!(eval("2 10 ^"), Ok(1024));
        assert_eq!(eval("1 4 <"), Ok(16));
        assert_eq!(eval("256 4 >"), Ok(16));
    }

    #[test]
    fn test_operand_order() {
        // The right-hand operand comes off the stack first
        assert_eq!(eval("2 10 -"), Ok(-8));
        assert_eq!(eval("20 5 /"), Ok(4));
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(eval("5 Q"), Ok(2));
        assert_eq!(eval("27 C"), Ok(3));
        assert_eq!(eval("-27 C"), Ok(-3));
        assert_eq!(eval("9 7 + Q"), Ok(4));
    }

    #[test]
    fn test_tabs_and_spaces() {
        assert_eq!(eval("  3\t\t4 \t+  "), Ok(7));
    }

    #[test]
    fn test_negative_literals() {
        assert_eq!(eval("-3 -4 *"), Ok(12));
        assert_eq!(eval("-3 4 -"), Ok(-7));
    }

    #[test]
    fn test_not_enough_literals() {
        assert_eq!(malformed_reason("+"), MalformedReason::NotEnoughLiterals);
        assert_eq!(malformed_reason("3 +"), MalformedReason::NotEnoughLiterals);
        assert_eq!(malformed_reason("Q"), MalformedReason::NotEnoughLiterals);
    }

    #[test]
    fn test_too_many_literals() {
        assert_eq!(malformed_reason("3 4"), MalformedReason::TooManyLiterals);
        assert_eq!(malformed_reason("1 2 3 +"), MalformedReason::TooManyLiterals);
    }

    #[test]
    fn test_unrecognized_token() {
        assert_eq!(
            malformed_reason("3 4 &"),
            MalformedReason::UnrecognizedToken("&".to_string())
        );
        assert_eq!(
            malformed_reason("3 4+"),
            MalformedReason::UnrecognizedToken("4+".to_string())
        );
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(malformed_reason(""), MalformedReason::Empty);
        assert_eq!(malformed_reason(" \t "), MalformedReason::Empty);
    }

    #[test]
    fn test_literal_out_of_range() {
        assert_eq!(
            malformed_reason("99999999999999999999"),
            MalformedReason::LiteralOutOfRange("99999999999999999999".to_string())
        );
    }

    #[test]
    fn test_overflow_reports_wide_value() {
        assert_eq!(
            eval("2147483647 1 +"),
            Err(PostfixError::Overflow {
                value: 2_147_483_648,
                max: 2_147_483_647
            })
        );
    }

    #[test]
    fn test_underflow_reports_wide_value() {
        assert_eq!(
            eval("-2147483648 1 -"),
            Err(PostfixError::Underflow {
                value: -2_147_483_649,
                min: -2_147_483_648
            })
        );
    }

    #[test]
    fn test_intermediate_values_may_leave_bounds() {
        assert_eq!(eval("2147483647 1 + 1 -"), Ok(2_147_483_647));
    }

    #[test]
    fn test_wide_overflow_is_reported() {
        let overflow = Err(PostfixError::Overflow {
            value: i64::MAX,
            max: 2_147_483_647,
        });
        assert_eq!(eval("2 100 ^"), overflow);
        // Later operators must not bring a lost intermediate back into range
        assert_eq!(eval("2 100 ^ 2 99 ^ /"), overflow);
        assert_eq!(eval("2 100 ^ 98 >"), overflow);
        assert_eq!(eval("9223372036854775807 1 + 9223372036854775807 -"), overflow);
        assert_eq!(eval("1 64 < 64 >"), overflow);
        assert_eq!(eval("-9223372036854775808 -1 / 2 /"), overflow);
    }

    #[test]
    fn test_wide_underflow_is_reported() {
        let underflow = Err(PostfixError::Underflow {
            value: i64::MIN,
            min: -2_147_483_648,
        });
        assert_eq!(eval("-9223372036854775808 1 - 9223372036854775807 +"), underflow);
        assert_eq!(eval("-2 101 ^ 2 100 ^ /"), underflow);
        assert_eq!(eval("9223372036854775807 -2 x 4 /"), underflow);
    }

    #[test]
    fn test_wide_values_inside_i64_survive() {
        assert_eq!(eval("2 62 ^ 2 61 ^ /"), Ok(2));
        assert_eq!(eval("9223372036854775807 1 - 9223372036854775806 -"), Ok(0));
    }

    #[test]
    fn test_arithmetic_failure() {
        assert_eq!(
            eval("1 0 /"),
            Err(PostfixError::Arithmetic {
                operator: "/".to_string(),
                source: ArithmeticError::DivisionByZero,
                expression: "1 0 /".to_string(),
            })
        );
    }

    #[test]
    fn test_narrow_bounds() {
        let registry = OperatorRegistry::with_builtins();
        assert_eq!(
            evaluate("100 28 +", &registry, NumericBounds::i8()),
            Err(PostfixError::Overflow { value: 128, max: 127 })
        );
        assert_eq!(evaluate("100 27 +", &registry, NumericBounds::i8()), Ok(127));
    }

    #[test]
    fn test_multi_character_tokens() {
        let mut registry = OperatorRegistry::with_builtins();
        registry.register("max", Operator::binary(i64::max));
        registry.register("neg", Operator::unary(|a| -a));
        assert_eq!(
            evaluate("3 9 max neg", &registry, NumericBounds::default()),
            Ok(-9)
        );
    }
}
