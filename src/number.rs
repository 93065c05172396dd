use std::fmt;
use std::str::FromStr;

use crate::error::ExprError;

/// Numeric tag, fixed by the lexical form of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Integer,
    Float,
}

/// A value of the language. The two variants never mix in one operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn tag(&self) -> Tag {
        match self {
            Number::Integer(_) => Tag::Integer,
            Number::Float(_) => Tag::Float,
        }
    }

    pub fn checked_neg(self) -> Result<Number, ExprError> {
        match self {
            Number::Integer(v) => v.checked_neg().map(Number::Integer).ok_or(ExprError::Overflow),
            Number::Float(v) => Ok(Number::Float(-v)),
        }
    }

    /// The value as its printed form reads back: an integral float becomes an
    /// integer. Floats outside the `i64` range keep their tag.
    pub fn retagged(self) -> Number {
        match self {
            Number::Float(v)
                if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 =>
            {
                Number::Integer(v as i64)
            }
            other => other,
        }
    }

    /// Renders the value so that parsing it back yields the same tag.
    pub fn literal(&self) -> String {
        match *self {
            Number::Integer(v) => v.to_string(),
            Number::Float(v) => {
                let text = v.to_string();
                if v.is_finite() && !text.contains('.') {
                    text + ".0"
                } else {
                    text
                }
            }
        }
    }
}

/// Integral floats print without a decimal point. Presentation only.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Integer(v) => write!(f, "{}", v),
            // -0.0 would otherwise print as "-0"
            Number::Float(v) if v == 0.0 => write!(f, "0"),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

impl FromStr for Number {
    type Err = ExprError;

    /// Accepts an optional `-`, digits and at most one `.`. A `.` makes it a float.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExprError::InvalidNumber(s.into());
        let digits = s.strip_prefix('-').unwrap_or(s);

        let well_formed = digits.chars().all(|c| c.is_ascii_digit() || c == '.')
            && digits.chars().any(|c| c.is_ascii_digit())
            && digits.matches('.').count() <= 1;
        if !well_formed {
            return Err(invalid());
        }

        if digits.contains('.') {
            s.parse().map(Number::Float).map_err(|_| invalid())
        } else {
            s.parse().map(Number::Integer).map_err(|_| invalid())
        }
    }
}

/// Strict literal form used by the command layer: `-?digits(.digits)?`.
pub fn is_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    all_digits(whole) && fraction.map_or(true, all_digits)
}
