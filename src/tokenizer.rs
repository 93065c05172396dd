use std::fmt;

use compact_str::{CompactString, ToCompactString};
use log::trace;

use crate::error::ExprError;
use crate::number::Number;
use crate::symbols::{is_keyword, SymbolTable};

#[derive(Debug, Default)]
enum TokenizerState {
    #[default]
    Clean,
    // `-` seen where an operand is expected
    Sign,
    InNumber(CompactString),
    InIdent {
        name: CompactString,
        negative: bool,
    },
    // Single character token, emitted once the next character arrives
    Pending(Token),
}

/// Push-driven lexer. Variables are replaced by their values as soon as the
/// identifier ends, so no identifier ever leaves the tokenizer.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    symbols: &'a SymbolTable,
    state: TokenizerState,
    last: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            state: TokenizerState::Clean,
            last: None,
        }
    }

    pub fn update(&mut self, c: char) -> Result<Option<Token>, ExprError> {
        use TokenizerState::*;

        match self.state {
            Clean => {
                self.state = match c {
                    '0'..='9' | '.' => InNumber(c.to_compact_string()),
                    'a'..='z' | 'A'..='Z' => InIdent {
                        name: c.to_compact_string(),
                        negative: false,
                    },
                    '-' if self.expects_operand() => Sign,
                    '(' => Pending(Token::LParen),
                    ')' => Pending(Token::RParen),
                    _ if c.is_whitespace() => Clean,
                    _ => match Operation::from_char(c) {
                        Some(op) => Pending(Token::Op(op)),
                        None => return Err(ExprError::UnexpectedCharacter(c)),
                    },
                };
                Ok(None)
            }
            Sign => match c {
                '0'..='9' | '.' => {
                    let mut text = CompactString::new("-");
                    text.push(c);
                    self.state = InNumber(text);
                    Ok(None)
                }
                'a'..='z' | 'A'..='Z' => {
                    self.state = InIdent {
                        name: c.to_compact_string(),
                        negative: true,
                    };
                    Ok(None)
                }
                // A sign with nothing to attach to is a plain minus
                _ => self.emit_then(c),
            },
            InNumber(ref mut text) => match c {
                '0'..='9' | '.' | 'a'..='z' | 'A'..='Z' => {
                    text.push(c);
                    Ok(None)
                }
                _ if c.is_whitespace() => self.finalize(),
                _ => self.emit_then(c),
            },
            InIdent { ref mut name, .. } => match c {
                '0'..='9' | 'a'..='z' | 'A'..='Z' | '!' => {
                    name.push(c);
                    Ok(None)
                }
                _ if c.is_whitespace() => self.finalize(),
                _ => self.emit_then(c),
            },
            Pending(_) => self.emit_then(c),
        }
    }

    pub fn finalize(&mut self) -> Result<Option<Token>, ExprError> {
        use TokenizerState::*;

        let token = match std::mem::take(&mut self.state) {
            Clean => None,
            Sign => Some(Token::Op(Operation::Sub)),
            InNumber(text) => Some(Token::Num(text.parse()?)),
            InIdent { name, negative } => {
                let value = self.resolve(&name)?;
                Some(Token::Num(if negative { value.checked_neg()? } else { value }))
            }
            Pending(token) => Some(token),
        };

        if let Some(token) = token {
            trace!("token: {}", token);
            self.last = Some(token);
        }
        Ok(token)
    }

    /// Emits whatever is in progress, then feeds `c` to the clean state.
    fn emit_then(&mut self, c: char) -> Result<Option<Token>, ExprError> {
        let token = self.finalize()?;
        // From a clean state no token is ever returned
        self.update(c)?;
        Ok(token)
    }

    /// One-token lookback deciding whether `-` is a sign or a subtraction.
    fn expects_operand(&self) -> bool {
        matches!(self.last, None | Some(Token::Op(_)) | Some(Token::LParen))
    }

    fn resolve(&self, name: &str) -> Result<Number, ExprError> {
        if is_keyword(name) {
            return Err(ExprError::KeywordInExpression(name.into()));
        }
        if name.contains('!') {
            return Err(ExprError::UnexpectedCharacter('!'));
        }
        self.symbols.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Num(Number),
    Op(Operation),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => f.write_str(&n.literal()),
            Token::Op(op) => write!(f, "{}", op),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Operation {
    pub fn from_char(c: char) -> Option<Operation> {
        match c {
            '+' => Some(Operation::Add),
            '-' => Some(Operation::Sub),
            '*' => Some(Operation::Mul),
            '/' => Some(Operation::Div),
            '%' => Some(Operation::Rem),
            _ => None,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Operation::Add | Operation::Sub => 1,
            Operation::Mul | Operation::Div | Operation::Rem => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "*",
            Operation::Div => "/",
            Operation::Rem => "%",
        };
        f.write_str(symbol)
    }
}
