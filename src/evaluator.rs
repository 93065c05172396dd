use crate::error::ExprError;
use crate::number::{Number, Tag};
use crate::postfix::Postfix;
use crate::tokenizer::{Operation, Token};

/// The tag shared by every operand, `None` when there are no operands.
///
/// Operators are skipped. An operand with a tag different from the first one
/// fails with [`ExprError::TypeMismatch`].
pub fn operand_tag(postfix: &Postfix) -> Result<Option<Tag>, ExprError> {
    let mut expected = None;
    for token in postfix.tokens() {
        if let Token::Num(n) = token {
            match expected {
                None => expected = Some(n.tag()),
                Some(tag) if tag != n.tag() => return Err(ExprError::TypeMismatch),
                Some(_) => {}
            }
        }
    }
    Ok(expected)
}

/// Type-checks, then evaluates in the mode picked by the operand tag.
pub fn evaluate(postfix: &Postfix) -> Result<Number, ExprError> {
    match operand_tag(postfix)? {
        Some(Tag::Float) => evaluate_as::<f64>(postfix),
        Some(Tag::Integer) | None => evaluate_as::<i64>(postfix),
    }
}

/// Arithmetic of one evaluation mode.
pub trait Operand: Copy {
    fn from_number(number: Number) -> Option<Self>;
    fn into_number(self) -> Number;
    fn apply(op: Operation, lhs: Self, rhs: Self) -> Result<Self, ExprError>;
}

impl Operand for i64 {
    fn from_number(number: Number) -> Option<Self> {
        match number {
            Number::Integer(v) => Some(v),
            Number::Float(_) => None,
        }
    }

    fn into_number(self) -> Number {
        Number::Integer(self)
    }

    // Division and remainder truncate toward zero.
    fn apply(op: Operation, lhs: i64, rhs: i64) -> Result<i64, ExprError> {
        let result = match op {
            Operation::Add => lhs.checked_add(rhs),
            Operation::Sub => lhs.checked_sub(rhs),
            Operation::Mul => lhs.checked_mul(rhs),
            Operation::Div if rhs == 0 => return Err(ExprError::DivisionByZero),
            Operation::Div => lhs.checked_div(rhs),
            Operation::Rem if rhs == 0 => return Err(ExprError::ModuloByZero),
            // i64::MIN % -1 is 0, not an overflow
            Operation::Rem => Some(lhs.wrapping_rem(rhs)),
        };
        result.ok_or(ExprError::Overflow)
    }
}

impl Operand for f64 {
    fn from_number(number: Number) -> Option<Self> {
        match number {
            Number::Float(v) => Some(v),
            Number::Integer(_) => None,
        }
    }

    fn into_number(self) -> Number {
        Number::Float(self)
    }

    fn apply(op: Operation, lhs: f64, rhs: f64) -> Result<f64, ExprError> {
        match op {
            Operation::Add => Ok(lhs + rhs),
            Operation::Sub => Ok(lhs - rhs),
            Operation::Mul => Ok(lhs * rhs),
            Operation::Div if rhs == 0.0 => Err(ExprError::DivisionByZero),
            Operation::Div => Ok(lhs / rhs),
            Operation::Rem => Err(ExprError::ModuloTypeError),
        }
    }
}

/// Runs the postfix sequence on an operand stack of `T`.
pub fn evaluate_as<T: Operand>(postfix: &Postfix) -> Result<Number, ExprError> {
    let mut stack: Vec<T> = Vec::new();

    for token in postfix.tokens() {
        match *token {
            Token::Num(n) => {
                let value =
                    T::from_number(n).ok_or_else(|| ExprError::InvalidToken(n.literal().into()))?;
                stack.push(value);
            }
            Token::Op(op) => {
                // right operand is on top
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(ExprError::InvalidExpression);
                };
                stack.push(T::apply(op, lhs, rhs)?);
            }
            Token::LParen | Token::RParen => {
                return Err(ExprError::InvalidToken(token.to_string().into()))
            }
        }
    }

    match stack.as_slice() {
        [result] => Ok(result.into_number()),
        _ => Err(ExprError::InvalidExpression),
    }
}
