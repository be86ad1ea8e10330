//! Infix validation and whitespace simplification

use super::tokenizer::{CLOSE_GROUP, OPEN_GROUP, is_sign_at};
use crate::error::{InvalidReason, PostfixError, Result};
use crate::registry::{Arity, OperatorRegistry};

/// Validate an infix expression and return its simplified form
///
/// Parenthesis balance is checked on the raw input. Operand adjacency is checked on
/// the simplified string, where every whitespace run has become one `separator`.
pub fn validate_and_simplify(
    expression: &str,
    registry: &OperatorRegistry,
    separator: char,
) -> Result<String> {
    if expression.trim().is_empty() {
        return Err(PostfixError::invalid(InvalidReason::Empty, expression));
    }

    check_balance(expression).map_err(|reason| PostfixError::invalid(reason, expression))?;

    let simplified = simplify(expression, separator);
    check_operands(&simplified, registry, separator)
        .map_err(|reason| PostfixError::invalid(reason, expression))?;

    log::debug!("Simplified '{expression}' to '{simplified}'");
    Ok(simplified)
}

/// Replace every run of whitespace with a single `separator`
pub fn simplify(expression: &str, separator: char) -> String {
    let mut simplified = String::with_capacity(expression.len());
    let mut in_whitespace = false;

    for c in expression.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                simplified.push(separator);
            }
            in_whitespace = true;
        } else {
            simplified.push(c);
            in_whitespace = false;
        }
    }
    simplified
}

/// Running `(` minus `)` count must never dip below zero and must end at zero
fn check_balance(expression: &str) -> std::result::Result<(), InvalidReason> {
    let mut depth: i64 = 0;
    for c in expression.chars() {
        match c {
            OPEN_GROUP => depth += 1,
            CLOSE_GROUP => {
                depth -= 1;
                if depth < 0 {
                    return Err(InvalidReason::UnmatchedParenthesis);
                }
            }
            _ => {}
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(InvalidReason::UnmatchedParenthesis)
    }
}

fn check_operands(
    simplified: &str,
    registry: &OperatorRegistry,
    separator: char,
) -> std::result::Result<(), InvalidReason> {
    let chars: Vec<char> = simplified.chars().collect();

    for (position, &c) in chars.iter().enumerate() {
        if c == separator {
            continue;
        }

        match registry.char_arity(c) {
            Some(Arity::Unary) => {
                let followed = chars
                    .get(position + 1)
                    .is_some_and(|&next| next.is_ascii_digit() || next == OPEN_GROUP || next == separator);
                if !followed {
                    return Err(InvalidReason::MissingUnaryOperand {
                        operator: c,
                        position,
                    });
                }
            }
            Some(Arity::Binary) => {
                if is_sign_at(&chars, position, registry, separator) {
                    continue;
                }
                let preceded = position
                    .checked_sub(1)
                    .and_then(|i| chars.get(i))
                    .is_some_and(|&prev| prev.is_ascii_digit() || prev == CLOSE_GROUP || prev == separator);
                if !preceded {
                    return Err(InvalidReason::MissingBinaryOperand {
                        operator: c,
                        position,
                    });
                }
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(expression: &str) -> Result<String> {
        validate_and_simplify(expression, &OperatorRegistry::with_builtins(), '_')
    }

    fn reason(expression: &str) -> InvalidReason {
        match validate(expression) {
            Err(PostfixError::InvalidExpression { reason, .. }) => reason,
            other => panic!("expected invalid expression for {expression:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_simplify_collapses_whitespace() {
        assert_eq!(simplify("3  +\t\t4", '_'), "3_+_4");
        assert_eq!(simplify(" ( 3 ) ", '_'), "_(_3_)_");
        assert_eq!(simplify("3+4", '_'), "3+4");
        assert_eq!(simplify("1 \t\n 2", '#'), "1#2");
    }

    #[test]
    fn test_accepts_valid_expressions() {
        assert_eq!(validate("( 3 + 4 ) * 2").unwrap(), "(_3_+_4_)_*_2");
        assert_eq!(validate("3+4").unwrap(), "3+4");
        assert_eq!(validate("Q(16)").unwrap(), "Q(16)");
        assert_eq!(validate("-3 + 4").unwrap(), "-3_+_4");
        assert_eq!(validate("3 * -4").unwrap(), "3_*_-4");
    }

    #[test]
    fn test_empty() {
        assert_eq!(reason(""), InvalidReason::Empty);
        assert_eq!(reason(" \t "), InvalidReason::Empty);
    }

    #[test]
    fn test_unmatched_parenthesis() {
        assert_eq!(reason("(3+4"), InvalidReason::UnmatchedParenthesis);
        assert_eq!(reason("3+4)"), InvalidReason::UnmatchedParenthesis);
        assert_eq!(reason(")3+4("), InvalidReason::UnmatchedParenthesis);
    }

    #[test]
    fn test_balance_checked_before_operands() {
        assert_eq!(reason("(Q"), InvalidReason::UnmatchedParenthesis);
    }

    #[test]
    fn test_missing_unary_operand() {
        assert_eq!(
            reason("Q"),
            InvalidReason::MissingUnaryOperand {
                operator: 'Q',
                position: 0
            }
        );
        assert_eq!(
            reason("3+C-8"),
            InvalidReason::MissingUnaryOperand {
                operator: 'C',
                position: 2
            }
        );
    }

    #[test]
    fn test_missing_binary_operand() {
        assert_eq!(
            reason("+3"),
            InvalidReason::MissingBinaryOperand {
                operator: '+',
                position: 0
            }
        );
        assert_eq!(
            reason("(*2)"),
            InvalidReason::MissingBinaryOperand {
                operator: '*',
                position: 1
            }
        );
        assert_eq!(
            reason("--4"),
            InvalidReason::MissingBinaryOperand {
                operator: '-',
                position: 0
            }
        );
    }

    #[test]
    fn test_custom_separator() {
        let registry = OperatorRegistry::with_builtins();
        assert_eq!(
            validate_and_simplify("1 + 2", &registry, '#').unwrap(),
            "1#+#2"
        );
    }
}
