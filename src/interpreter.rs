use log::debug;

use crate::error::ExprError;
use crate::evaluator;
use crate::number::{self, Number};
use crate::postfix::{Converter, Postfix};
use crate::symbols::{is_variable_name, SymbolTable};
use crate::tokenizer::Tokenizer;

/// Expression pipeline of one session, owning that session's variables.
///
/// Nothing is written to the symbol table unless every stage succeeded.
#[derive(Debug, Default)]
pub struct Interpreter {
    symbols: SymbolTable,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Lexes `expr` and converts it to postfix, resolving variables on the way.
    pub fn to_postfix(&self, expr: &str) -> Result<Postfix, ExprError> {
        let mut tokenizer = Tokenizer::new(&self.symbols);
        let mut converter = Converter::default();

        for c in expr.chars() {
            tokenizer
                .update(c)?
                .map(|t| converter.handle_token(t))
                .transpose()?;
        }
        tokenizer
            .finalize()?
            .map(|t| converter.handle_token(t))
            .transpose()?;

        converter.finalize()
    }

    pub fn evaluate(&self, expr: &str) -> Result<Number, ExprError> {
        let postfix = self.to_postfix(expr)?;
        debug!("postfix of {:?}: {}", expr, postfix);
        let result = evaluator::evaluate(&postfix)?;
        debug!("{:?} evaluates to {:?}", expr, result);
        Ok(result)
    }

    /// Evaluates `expr` and stores the result under `name`. The stored tag is
    /// the one of the printed result, so `2.5 * 2.0` is stored as the integer 5.
    pub fn assign(&mut self, name: &str, expr: &str) -> Result<Number, ExprError> {
        if !is_variable_name(name) {
            return Err(ExprError::InvalidVariableName(name.into()));
        }
        let value = self.evaluate(expr)?.retagged();
        debug!("{} := {:?}", name, value);
        Ok(self.symbols.set(name, value))
    }

    /// Stores a value typed in by the user. Only plain number literals are accepted.
    pub fn capture(&mut self, name: &str, input: &str) -> Result<Number, ExprError> {
        if !is_variable_name(name) {
            return Err(ExprError::InvalidVariableName(name.into()));
        }
        let input = input.trim();
        if !number::is_literal(input) {
            return Err(ExprError::InputNotNumber);
        }
        let value = input.parse::<Number>()?;
        debug!("{} := {:?} (input)", name, value);
        Ok(self.symbols.set(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Imbalance;

    #[test]
    fn test_precedence_and_grouping() {
        let interpreter = Interpreter::new();
        let cases = [
            ("1 + 2 * 3", 7),
            ("(1 + 3) * 5", 20),
            ("10 - 3 - 2", 5),
            ("100 / 10 / 5", 2),
            ("2 * 3 % 4", 2),
            ("2 + 3 * 4 - 6 / 2", 11),
            ("((7))", 7),
            ("17 % 5 * 3 + 1", 7),
            ("8 - (3 - (2 - 1))", 6),
            ("-10 / 3", -3),
            ("-20 / 3 / 2", -3),
            ("-20 % 7 % 4", -2),
            ("100 / -7 % 4", -2),
            ("-9 / 2 * 2 + -9 % 2", -9),
            ("7 - -3 * (2 - (5 % -3))", 7),
            ("((2 + 3) * (4 - 6)) / -3", 3),
            ("2 * (3 + (4 * (5 - 1)) % 6)", 14),
            ("(((-8)))", -8),
        ];

        for (expr, expected) in cases {
            assert_eq!(interpreter.evaluate(expr), Ok(Number::Integer(expected)), "{expr}");
        }
    }

    #[test]
    fn test_sign_before_paren_is_subtraction() {
        let interpreter = Interpreter::new();
        assert_eq!(
            interpreter.to_postfix("-3 * -(2)").map(|p| p.to_string()),
            Ok("-3 * 2 -".to_string())
        );
        assert_eq!(
            interpreter.evaluate("-3 * -(2)"),
            Err(ExprError::InvalidExpression)
        );
    }

    #[test]
    fn test_float_expressions() {
        let interpreter = Interpreter::new();
        assert_eq!(interpreter.evaluate("1.5 * 4.0"), Ok(Number::Float(6.0)));
        assert_eq!(interpreter.evaluate("7.0 / 2.0"), Ok(Number::Float(3.5)));
        assert_eq!(interpreter.evaluate("1.0 + 2"), Err(ExprError::TypeMismatch));
        assert_eq!(
            interpreter.evaluate("5.0 % 2.0"),
            Err(ExprError::ModuloTypeError)
        );
    }

    #[test]
    fn test_stage_errors_surface() {
        let interpreter = Interpreter::new();
        assert_eq!(
            interpreter.evaluate("(1 + 3"),
            Err(ExprError::UnbalancedParentheses(Imbalance::UnclosedOpen))
        );
        assert_eq!(
            interpreter.evaluate("1 + 3)"),
            Err(ExprError::UnbalancedParentheses(Imbalance::UnexpectedClose))
        );
        assert_eq!(
            interpreter.evaluate("y + 1"),
            Err(ExprError::UndefinedVariable("y".into()))
        );
        assert_eq!(interpreter.evaluate("4 / 0"), Err(ExprError::DivisionByZero));
        assert_eq!(interpreter.evaluate(""), Err(ExprError::InvalidExpression));
    }

    #[test]
    fn test_assignment_round_trip() {
        let mut interpreter = Interpreter::new();
        for expr in ["3 * 4", "-7 % 3", "0.1 + 0.2", "7.0 / 2.0"] {
            let direct = interpreter.evaluate(expr).unwrap();
            interpreter.assign("v", expr).unwrap();
            assert_eq!(interpreter.evaluate("v"), Ok(direct), "{expr}");
            assert_eq!(interpreter.symbols().get("v"), Ok(direct));
        }
    }

    #[test]
    fn test_integral_float_result_is_stored_as_integer() {
        let mut interpreter = Interpreter::new();
        assert_eq!(interpreter.evaluate("2.5 * 2.0"), Ok(Number::Float(5.0)));
        assert_eq!(interpreter.assign("y", "2.5 * 2.0"), Ok(Number::Integer(5)));
        assert_eq!(interpreter.assign("z", "y + 1"), Ok(Number::Integer(6)));
        assert_eq!(interpreter.evaluate("y + 1.0"), Err(ExprError::TypeMismatch));

        // a captured float literal is not touched
        interpreter.capture("w", "5.0").unwrap();
        assert_eq!(interpreter.symbols().get("w"), Ok(Number::Float(5.0)));
    }

    #[test]
    fn test_assignment_uses_variables() {
        let mut interpreter = Interpreter::new();
        interpreter.assign("num", "10").unwrap();
        interpreter.assign("num", "num * 2 + 1").unwrap();
        assert_eq!(interpreter.symbols().get("num"), Ok(Number::Integer(21)));

        interpreter.assign("half", "-num").unwrap();
        assert_eq!(interpreter.symbols().get("half"), Ok(Number::Integer(-21)));
    }

    #[test]
    fn test_failed_assignment_keeps_prior_value() {
        let mut interpreter = Interpreter::new();
        interpreter.assign("x", "5").unwrap();

        assert_eq!(interpreter.assign("x", "x / 0"), Err(ExprError::DivisionByZero));
        assert_eq!(interpreter.assign("x", "x + 1.0"), Err(ExprError::TypeMismatch));
        assert_eq!(
            interpreter.assign("y", "undefinedVar"),
            Err(ExprError::UndefinedVariable("undefinedVar".into()))
        );
        assert_eq!(interpreter.symbols().get("x"), Ok(Number::Integer(5)));
        assert!(!interpreter.symbols().contains("y"));
    }

    #[test]
    fn test_invalid_targets() {
        let mut interpreter = Interpreter::new();
        assert_eq!(
            interpreter.assign("1x", "1"),
            Err(ExprError::InvalidVariableName("1x".into()))
        );
        assert_eq!(
            interpreter.assign("HELP", "1"),
            Err(ExprError::InvalidVariableName("HELP".into()))
        );
        assert_eq!(
            interpreter.assign("x", "BEG"),
            Err(ExprError::KeywordInExpression("BEG".into()))
        );
        assert!(interpreter.symbols().is_empty());
    }

    #[test]
    fn test_capture() {
        let mut interpreter = Interpreter::new();
        assert_eq!(interpreter.capture("a", "12"), Ok(Number::Integer(12)));
        assert_eq!(interpreter.capture("b", " -0.5 "), Ok(Number::Float(-0.5)));
        assert_eq!(interpreter.capture("c", "abc"), Err(ExprError::InputNotNumber));
        assert_eq!(interpreter.capture("c", "1 + 1"), Err(ExprError::InputNotNumber));
        assert!(!interpreter.symbols().contains("c"));
        assert_eq!(interpreter.evaluate("a * 2"), Ok(Number::Integer(24)));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut first = Interpreter::new();
        let second = Interpreter::new();
        first.assign("shared", "1").unwrap();
        assert_eq!(
            second.evaluate("shared"),
            Err(ExprError::UndefinedVariable("shared".into()))
        );
    }
}
