use crate::number;
use crate::symbols::is_variable_name;

const OPERATORS: [char; 5] = ['+', '-', '*', '/', '%'];

/// One classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Empty,
    /// `BEG name`: read a value for `name`.
    Beg(&'a str),
    /// `PRINT target`: show a variable or a literal.
    Print(&'a str),
    Exit,
    Help,
    /// A lone variable or literal.
    Value(&'a str),
    Assign {
        name: &'a str,
        expr: &'a str,
    },
    Expression(&'a str),
    Unknown,
}

impl<'a> Command<'a> {
    /// Classifies a line. The first matching form wins.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            return Command::Empty;
        }
        if let Some(name) = keyword_argument(line, "BEG") {
            return Command::Beg(name);
        }
        if let Some(target) = keyword_argument(line, "PRINT") {
            return Command::Print(target);
        }

        match line {
            "EXIT!" => Command::Exit,
            "HELP" => Command::Help,
            _ if is_variable_name(line) || number::is_literal(line) => Command::Value(line),
            _ => match line.split_once('=') {
                Some((name, expr)) => Command::Assign {
                    name: name.trim(),
                    expr: expr.trim(),
                },
                None if line.contains(&OPERATORS[..]) => Command::Expression(line),
                None => Command::Unknown,
            },
        }
    }
}

/// The single whitespace-separated argument after `keyword`, if that is the
/// whole shape of the line.
fn keyword_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let argument = rest.trim();
    (!argument.is_empty() && !argument.contains(char::is_whitespace)).then_some(argument)
}
