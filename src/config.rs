//! Engine configuration

use crate::error::{PostfixError, Result};
use serde::{Deserialize, Serialize};

/// Default placeholder substituted for whitespace runs in infix input
pub const DEFAULT_SEPARATOR: char = '_';

/// The published numeric domain results are checked against
///
/// Evaluation itself runs on `i64`; only the final result must fit these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericBounds {
    /// Smallest accepted result
    pub min: i64,
    /// Largest accepted result
    pub max: i64,
}

impl NumericBounds {
    /// Create custom bounds
    pub fn new(min: i64, max: i64) -> Result<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Signed 8-bit domain
    pub const fn i8() -> Self {
        Self {
            min: i8::MIN as i64,
            max: i8::MAX as i64,
        }
    }

    /// Signed 16-bit domain
    pub const fn i16() -> Self {
        Self {
            min: i16::MIN as i64,
            max: i16::MAX as i64,
        }
    }

    /// Signed 32-bit domain
    pub const fn i32() -> Self {
        Self {
            min: i32::MIN as i64,
            max: i32::MAX as i64,
        }
    }

    /// Check that the domain leaves room above and below for out-of-range results
    pub fn validate(&self) -> Result<()> {
        if !(self.min < 0 && self.max > 0) {
            return Err(PostfixError::configuration(format!(
                "bounds [{}, {}] must contain zero strictly inside",
                self.min, self.max
            )));
        }
        if self.min == i64::MIN || self.max == i64::MAX {
            return Err(PostfixError::configuration(
                "bounds must lie strictly inside the i64 range",
            ));
        }
        Ok(())
    }

    /// Whether `value` lies inside the domain
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Check a candidate result against the domain
    pub fn check(&self, value: i64) -> Result<i64> {
        if value > self.max {
            Err(PostfixError::Overflow {
                value,
                max: self.max,
            })
        } else if value < self.min {
            Err(PostfixError::Underflow {
                value,
                min: self.min,
            })
        } else {
            Ok(value)
        }
    }
}

impl Default for NumericBounds {
    fn default() -> Self {
        Self::i32()
    }
}

impl std::fmt::Display for NumericBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl std::str::FromStr for NumericBounds {
    type Err = PostfixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "i8" => Ok(Self::i8()),
            "i16" => Ok(Self::i16()),
            "i32" => Ok(Self::i32()),
            _ => Err(PostfixError::configuration(format!(
                "unknown numeric domain: {s}"
            ))),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Numeric domain for final results
    pub bounds: NumericBounds,
    /// Placeholder the simplifier writes in place of whitespace runs
    pub separator: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bounds: NumericBounds::default(),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl EngineConfig {
    /// Replace the numeric bounds
    pub fn with_bounds(mut self, bounds: NumericBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replace the separator placeholder
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;

        let sep = self.separator;
        if sep.is_whitespace() || sep.is_ascii_digit() || matches!(sep, '-' | '(' | ')') {
            return Err(PostfixError::configuration(format!(
                "separator '{sep}' collides with expression syntax"
            )));
        }
        Ok(())
    }
}
