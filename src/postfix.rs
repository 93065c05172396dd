use std::fmt;
use std::str::FromStr;

use crate::error::{ExprError, Imbalance};
use crate::tokenizer::{Operation, Token};

#[derive(Debug, Clone, Copy)]
enum Pending {
    Op(Operation),
    LParen,
}

/// Shunting-yard conversion from infix tokens to postfix.
#[derive(Debug, Default)]
pub struct Converter {
    output: Vec<Token>,
    pending: Vec<Pending>,
}

impl Converter {
    pub fn handle_token(&mut self, token: Token) -> Result<(), ExprError> {
        match token {
            Token::Num(_) => self.output.push(token),
            Token::Op(op) => self.prioritized_push(op),
            Token::LParen => self.pending.push(Pending::LParen),
            Token::RParen => loop {
                match self.pending.pop() {
                    Some(Pending::Op(op)) => self.output.push(Token::Op(op)),
                    Some(Pending::LParen) => break,
                    None => {
                        return Err(ExprError::UnbalancedParentheses(
                            Imbalance::UnexpectedClose,
                        ))
                    }
                }
            },
        }

        Ok(())
    }

    // Left-associative: equal precedence pops before pushing.
    fn prioritized_push(&mut self, new: Operation) {
        while let Some(&Pending::Op(top)) = self.pending.last() {
            if top.precedence() < new.precedence() {
                break;
            }
            self.pending.pop();
            self.output.push(Token::Op(top));
        }
        self.pending.push(Pending::Op(new));
    }

    pub fn finalize(&mut self) -> Result<Postfix, ExprError> {
        let mut output = std::mem::take(&mut self.output);
        let pending = std::mem::take(&mut self.pending);

        for entry in pending.into_iter().rev() {
            match entry {
                Pending::Op(op) => output.push(Token::Op(op)),
                Pending::LParen => {
                    return Err(ExprError::UnbalancedParentheses(Imbalance::UnclosedOpen))
                }
            }
        }

        Ok(Postfix(output))
    }
}

/// A token sequence in reverse Polish order. Displays space-joined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }
}

#[cfg(test)]
impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Postfix(tokens)
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Reads a space separated postfix string, e.g. `3 4 + 2 *`.
impl FromStr for Postfix {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(parse_word)
            .collect::<Result<Vec<_>, _>>()
            .map(Postfix)
    }
}

fn parse_word(word: &str) -> Result<Token, ExprError> {
    let mut chars = word.chars();
    let single = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    };

    match single {
        Some('(') => Ok(Token::LParen),
        Some(')') => Ok(Token::RParen),
        _ => match single.and_then(Operation::from_char) {
            Some(op) => Ok(Token::Op(op)),
            None => word
                .parse()
                .map(Token::Num)
                .map_err(|_| ExprError::InvalidToken(word.into())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;

    fn convert(expr: &str) -> Result<String, ExprError> {
        Interpreter::new()
            .to_postfix(expr)
            .map(|postfix| postfix.to_string())
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(convert("(1 + 3) * 5"), Ok("1 3 + 5 *".to_string()));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(convert("1 + 2 * 3"), Ok("1 2 3 * +".to_string()));
        assert_eq!(convert("8 % 3 - 1"), Ok("8 3 % 1 -".to_string()));
        assert_eq!(convert("2 * (3 + 4) / 7"), Ok("2 3 4 + * 7 /".to_string()));
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(convert("10 - 3 - 2"), Ok("10 3 - 2 -".to_string()));
        assert_eq!(convert("8 / 4 * 2"), Ok("8 4 / 2 *".to_string()));
    }

    #[test]
    fn test_nested_and_signed() {
        assert_eq!(
            convert("((1.5 + -2.0)) * 3.0"),
            Ok("1.5 -2.0 + 3.0 *".to_string())
        );
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            convert("(1 + 3"),
            Err(ExprError::UnbalancedParentheses(Imbalance::UnclosedOpen))
        );
        assert_eq!(
            convert("1 + 3)"),
            Err(ExprError::UnbalancedParentheses(Imbalance::UnexpectedClose))
        );
        assert_eq!(
            convert(")("),
            Err(ExprError::UnbalancedParentheses(Imbalance::UnexpectedClose))
        );
    }

    #[test]
    fn test_finalize_resets() {
        let mut converter = Converter::default();
        converter.handle_token(Token::LParen).unwrap();
        assert!(converter.finalize().is_err());
        assert_eq!(converter.finalize(), Ok(Postfix::default()));
    }

    #[test]
    fn test_parse_postfix_string() {
        let postfix: Postfix = "3 4.5 + ( %".parse().unwrap();
        assert_eq!(postfix.to_string(), "3 4.5 + ( %");
        assert_eq!(
            "3 x +".parse::<Postfix>(),
            Err(ExprError::InvalidToken("x".into()))
        );
        assert_eq!(
            "3 ++".parse::<Postfix>(),
            Err(ExprError::InvalidToken("++".into()))
        );
    }
}
