//! Token coercion rules
//!
//! Exact parsing rules for each [`FieldType`](crate::FieldType):
//!
//! - Integer: base-10 `i64`, optional leading `-`, digits only. A leading `+`,
//!   whitespace, thousands separators and out-of-range values are all errors.
//! - Float: optional leading `-`, digits with an optional fraction, optional
//!   exponent (`e`/`E`, signed). `inf`/`nan` spellings are rejected, and so is
//!   a literal whose magnitude overflows to infinity.
//! - Boolean: case-insensitive match against a [`BooleanVocabulary`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted spellings of `true` under [`BooleanVocabulary::Strict`].
pub const STRICT_TRUE_TOKENS: &[&str] = &["true"];
/// Accepted spellings of `false` under [`BooleanVocabulary::Strict`].
pub const STRICT_FALSE_TOKENS: &[&str] = &["false"];
/// Accepted spellings of `true` under [`BooleanVocabulary::Extended`].
pub const EXTENDED_TRUE_TOKENS: &[&str] = &["true", "t", "yes", "y", "1"];
/// Accepted spellings of `false` under [`BooleanVocabulary::Extended`].
pub const EXTENDED_FALSE_TOKENS: &[&str] = &["false", "f", "no", "n", "0"];

/// A token that could not be parsed as its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CoercionError {
    #[error("invalid integer")]
    InvalidInteger,

    #[error("invalid float")]
    InvalidFloat,

    #[error("invalid boolean")]
    InvalidBoolean,
}

/// The fixed set of tokens a Boolean field accepts. Matching is
/// case-insensitive; anything outside the vocabulary is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanVocabulary {
    /// `true` / `false` only (default)
    #[default]
    Strict,

    /// Strict vocabulary plus `t`/`f`, `yes`/`no`, `y`/`n` and `1`/`0`
    Extended,
}

impl BooleanVocabulary {
    pub fn true_tokens(&self) -> &'static [&'static str] {
        match self {
            BooleanVocabulary::Strict => STRICT_TRUE_TOKENS,
            BooleanVocabulary::Extended => EXTENDED_TRUE_TOKENS,
        }
    }

    pub fn false_tokens(&self) -> &'static [&'static str] {
        match self {
            BooleanVocabulary::Strict => STRICT_FALSE_TOKENS,
            BooleanVocabulary::Extended => EXTENDED_FALSE_TOKENS,
        }
    }

    pub fn parse(&self, token: &str) -> Result<bool, CoercionError> {
        if self.true_tokens().iter().any(|t| t.eq_ignore_ascii_case(token)) {
            Ok(true)
        } else if self.false_tokens().iter().any(|t| t.eq_ignore_ascii_case(token)) {
            Ok(false)
        } else {
            Err(CoercionError::InvalidBoolean)
        }
    }
}

/// Parse a base-10 signed 64-bit integer consuming the entire token.
pub fn parse_integer(token: &str) -> Result<i64, CoercionError> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if !is_digits(digits) {
        return Err(CoercionError::InvalidInteger);
    }
    // Overflow surfaces here as a parse error.
    token.parse::<i64>().map_err(|_| CoercionError::InvalidInteger)
}

/// Parse a finite decimal floating-point number consuming the entire token.
pub fn parse_float(token: &str) -> Result<f64, CoercionError> {
    if !is_decimal_literal(token) {
        return Err(CoercionError::InvalidFloat);
    }
    let value = token.parse::<f64>().map_err(|_| CoercionError::InvalidFloat)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoercionError::InvalidFloat)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal_literal(token: &str) -> bool {
    let body = token.strip_prefix('-').unwrap_or(token);
    let (mantissa, exponent) = match body.find(|c| c == 'e' || c == 'E') {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    let digits_ok = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits_ok(int_part) || !digits_ok(frac_part) {
        return false;
    }

    match exponent {
        Some(exp) => {
            let exp_digits = exp
                .strip_prefix('-')
                .or_else(|| exp.strip_prefix('+'))
                .unwrap_or(exp);
            is_digits(exp_digits)
        }
        None => true,
    }
}
