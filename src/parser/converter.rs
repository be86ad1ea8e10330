//! Infix to postfix conversion
//!
//! Operator precedence is ignored: an arriving operator flushes everything above the
//! nearest open group before it is pushed, so operators resolve strictly in arrival
//! order within a group. `3 + 4 * 2` therefore converts to `3 4 + 2 *`.

use super::tokenizer::{InfixToken, Tokenizer};
use super::validator::validate_and_simplify;
use crate::buffer::ExpressionBuffer;
use crate::error::{InvalidReason, PostfixError, Result};
use crate::registry::OperatorRegistry;

/// Validate, simplify and convert an infix expression to postfix
pub fn convert_infix(
    expression: &str,
    registry: &OperatorRegistry,
    separator: char,
) -> Result<String> {
    let simplified = validate_and_simplify(expression, registry, separator)?;
    convert_simplified(&simplified, registry, separator)
        .map_err(|reason| PostfixError::invalid(reason, expression))
}

/// Convert an already simplified infix expression to space-separated postfix
pub fn convert_simplified(
    simplified: &str,
    registry: &OperatorRegistry,
    separator: char,
) -> std::result::Result<String, InvalidReason> {
    let mut output = PostfixWriter::default();
    let mut buffer: ExpressionBuffer<InfixToken<'_>> = ExpressionBuffer::new();

    for token in Tokenizer::new(simplified, registry, separator) {
        match token?.value {
            InfixToken::Operator(c) => {
                while let Some(&top) = buffer.peek() {
                    if top == InfixToken::OpenGroup {
                        break;
                    }
                    buffer.pop();
                    output.append(top);
                }
                buffer.push(InfixToken::Operator(c));
            }
            InfixToken::OpenGroup => buffer.push(InfixToken::OpenGroup),
            InfixToken::CloseGroup => loop {
                match buffer.pop() {
                    Some(InfixToken::OpenGroup) => break,
                    Some(pending) => output.append(pending),
                    None => return Err(InvalidReason::UnmatchedParenthesis),
                }
            },
            literal @ InfixToken::Literal(_) => output.append(literal),
        }
    }

    while let Some(pending) = buffer.pop() {
        if pending == InfixToken::OpenGroup {
            return Err(InvalidReason::UnmatchedParenthesis);
        }
        output.append(pending);
    }

    let postfix = output.finish();
    log::debug!("Converted '{simplified}' to postfix '{postfix}'");
    Ok(postfix)
}

/// Accumulates postfix tokens, each followed by a space
#[derive(Default)]
struct PostfixWriter {
    out: String,
}

impl PostfixWriter {
    fn append(&mut self, token: InfixToken<'_>) {
        use std::fmt::Write;
        // Writing into a String cannot fail
        let _ = write!(self.out, "{token} ");
    }

    fn finish(mut self) -> String {
        self.out.truncate(self.out.trim_end().len());
        self.out
    }
}
