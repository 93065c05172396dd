use compact_str::CompactString;
use thiserror::Error;

/// Which side of a parenthesis pair is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imbalance {
    /// A `)` arrived with no open `(` to match.
    UnexpectedClose,
    /// Input ended with at least one `(` still open.
    UnclosedOpen,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("Error! [{0}] is not defined!")]
    UndefinedVariable(CompactString),
    #[error("Unknown command! Does not match any valid command of the language.")]
    KeywordInExpression(CompactString),
    #[error("Error! Unbalanced parentheses in the expression.")]
    UnbalancedParentheses(Imbalance),
    #[error("Error! Operands must be of the same type in an arithmetic operation!")]
    TypeMismatch,
    #[error("Error! Invalid token in the expression.")]
    InvalidToken(CompactString),
    #[error("Error! Invalid expression.")]
    InvalidExpression,
    #[error("Division by zero is not allowed!")]
    DivisionByZero,
    #[error("Modulo by zero is not allowed!")]
    ModuloByZero,
    #[error("Modulo only allowed on integers.")]
    ModuloTypeError,
    #[error("Error! Integer overflow in the expression.")]
    Overflow,
    #[error("Error! Unexpected character '{0}' in the expression.")]
    UnexpectedCharacter(char),
    #[error("Error! [{0}] is not a valid number.")]
    InvalidNumber(CompactString),
    #[error("Error! '{0}' is not a valid variable name.")]
    InvalidVariableName(CompactString),
    #[error("Error! Input must be a number.")]
    InputNotNumber,
}
