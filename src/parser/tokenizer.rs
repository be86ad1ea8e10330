//! Tokenizer for simplified infix expressions and postfix literal matching
//!
//! Infix input is scanned character by character:
//! - separator placeholders (and any stray whitespace) are skipped
//! - a run of ASCII digits is an integer literal, optionally led by a `-` sign
//! - `(` and `)` are group tokens
//! - any single character with a registered operator is an operator token

use crate::error::InvalidReason;
use crate::registry::OperatorRegistry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Opening group character
pub const OPEN_GROUP: char = '(';

/// Closing group character
pub const CLOSE_GROUP: char = ')';

/// Matches a single integer literal: an optional minus sign then one or more digits
pub static INTEGER_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+$").expect("integer literal pattern is valid"));

/// Whether `token` is an integer literal
pub fn is_integer_literal(token: &str) -> bool {
    INTEGER_LITERAL.is_match(token)
}

/// A lexical unit of an infix expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixToken<'input> {
    /// Integer literal text, sign included
    Literal(&'input str),
    /// Single-character registered operator
    Operator(char),
    /// `(`
    OpenGroup,
    /// `)`
    CloseGroup,
}

impl fmt::Display for InfixToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfixToken::Literal(text) => f.write_str(text),
            InfixToken::Operator(c) => write!(f, "{c}"),
            InfixToken::OpenGroup => write!(f, "{OPEN_GROUP}"),
            InfixToken::CloseGroup => write!(f, "{CLOSE_GROUP}"),
        }
    }
}

/// A scanned token with the char range `start..end` it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The token
    pub value: T,
    /// First char index
    pub start: usize,
    /// One past the last char index
    pub end: usize,
}

impl<T> Spanned<T> {
    /// Pair `value` with its char range
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self { value, start, end }
    }
}

/// Whether the `-` at `index` is the sign of a literal rather than subtraction
///
/// It is a sign when a digit follows it and the nearest earlier character that is not
/// a separator is missing, an opening group, or a registered operator.
pub fn is_sign_at(
    chars: &[char],
    index: usize,
    registry: &OperatorRegistry,
    separator: char,
) -> bool {
    if chars.get(index) != Some(&'-') {
        return false;
    }
    if !chars.get(index + 1).is_some_and(char::is_ascii_digit) {
        return false;
    }

    let previous = chars[..index]
        .iter()
        .rev()
        .find(|&&c| c != separator && !c.is_whitespace());

    match previous {
        None | Some(&OPEN_GROUP) => true,
        Some(c) if c.is_ascii_digit() || *c == CLOSE_GROUP => false,
        Some(&c) => registry.char_arity(c).is_some(),
    }
}

/// Infix tokenizer over a simplified expression
pub struct Tokenizer<'input> {
    input: &'input str,
    chars: Vec<char>,
    /// Byte offset of every char, plus the input length as a sentinel
    offsets: Vec<usize>,
    position: usize,
    registry: &'input OperatorRegistry,
    separator: char,
}

impl<'input> Tokenizer<'input> {
    /// Create a tokenizer for `input`
    pub fn new(input: &'input str, registry: &'input OperatorRegistry, separator: char) -> Self {
        let (mut offsets, chars): (Vec<usize>, Vec<char>) = input.char_indices().unzip();
        offsets.push(input.len());

        Self {
            input,
            chars,
            offsets,
            position: 0,
            registry,
            separator,
        }
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<Spanned<InfixToken<'input>>>, InvalidReason> {
        while self
            .chars
            .get(self.position)
            .is_some_and(|&c| c == self.separator || c.is_whitespace())
        {
            self.position += 1;
        }

        let start = self.position;
        let Some(&c) = self.chars.get(start) else {
            return Ok(None);
        };

        let signed = is_sign_at(&self.chars, start, self.registry, self.separator);
        let token = if c.is_ascii_digit() || signed {
            self.position += 1;
            while self
                .chars
                .get(self.position)
                .is_some_and(char::is_ascii_digit)
            {
                self.position += 1;
            }
            let input = self.input;
            InfixToken::Literal(&input[self.offsets[start]..self.offsets[self.position]])
        } else if c == OPEN_GROUP {
            self.position += 1;
            InfixToken::OpenGroup
        } else if c == CLOSE_GROUP {
            self.position += 1;
            InfixToken::CloseGroup
        } else if self.registry.char_arity(c).is_some() {
            self.position += 1;
            InfixToken::Operator(c)
        } else {
            return Err(InvalidReason::UnrecognizedToken {
                token: c,
                position: start,
            });
        };

        log::trace!("Scanned token '{}' at {}..{}", token, start, self.position);
        Ok(Some(Spanned::new(token, start, self.position)))
    }

    /// Tokenize the remaining input
    pub fn tokenize_all(&mut self) -> Result<Vec<Spanned<InfixToken<'input>>>, InvalidReason> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

impl<'input> Iterator for Tokenizer<'input> {
    type Item = Result<Spanned<InfixToken<'input>>, InvalidReason>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<String> {
        let registry = OperatorRegistry::with_builtins();
        Tokenizer::new(input, &registry, '_')
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.value.to_string())
            .collect()
    }

    #[test]
    fn test_integer_literal_pattern() {
        assert!(is_integer_literal("42"));
        assert!(is_integer_literal("-7"));
        assert!(is_integer_literal("007"));
        assert!(!is_integer_literal("-"));
        assert!(!is_integer_literal("4-2"));
        assert!(!is_integer_literal("+3"));
        assert!(!is_integer_literal(""));
    }

    #[test]
    fn test_tokenizes_without_separators() {
        assert_eq!(tokens("(3+4)x2"), vec!["(", "3", "+", "4", ")", "x", "2"]);
    }

    #[test]
    fn test_skips_separators() {
        assert_eq!(tokens("_12__+_Q9_"), vec!["12", "+", "Q", "9"]);
    }

    #[test]
    fn test_sign_versus_subtraction() {
        assert_eq!(tokens("-3-4"), vec!["-3", "-", "4"]);
        assert_eq!(tokens("3_-4"), vec!["3", "-", "4"]);
        assert_eq!(tokens("3_-_-4"), vec!["3", "-", "-4"]);
        assert_eq!(tokens("(-3)"), vec!["(", "-3", ")"]);
        assert_eq!(tokens("2x-3"), vec!["2", "x", "-3"]);
        assert_eq!(tokens("(1)-2"), vec!["(", "1", ")", "-", "2"]);
    }

    #[test]
    fn test_spans() {
        let registry = OperatorRegistry::with_builtins();
        let spanned = Tokenizer::new("12_+_345", &registry, '_')
            .tokenize_all()
            .unwrap();
        assert_eq!(spanned[0], Spanned::new(InfixToken::Literal("12"), 0, 2));
        assert_eq!(spanned[1], Spanned::new(InfixToken::Operator('+'), 3, 4));
        assert_eq!(spanned[2], Spanned::new(InfixToken::Literal("345"), 5, 8));
    }

    #[test]
    fn test_unrecognized_token() {
        let registry = OperatorRegistry::with_builtins();
        let err = Tokenizer::new("3_&_4", &registry, '_')
            .tokenize_all()
            .unwrap_err();
        assert_eq!(
            err,
            InvalidReason::UnrecognizedToken {
                token: '&',
                position: 2
            }
        );
    }

    #[test]
    fn test_iterator_stops_at_end() {
        let registry = OperatorRegistry::with_builtins();
        let mut tokenizer = Tokenizer::new("1", &registry, '_');
        assert!(tokenizer.next().is_some());
        assert!(tokenizer.next().is_none());
    }
}
