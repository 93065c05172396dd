use std::collections::BTreeMap;

use compact_str::CompactString;

use crate::error::ExprError;
use crate::number::Number;

/// Words reserved by the command layer. They can never name a variable.
pub const KEYWORDS: [&str; 4] = ["BEG", "PRINT", "EXIT!", "HELP"];

pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// A letter followed by letters or digits, and not a keyword.
pub fn is_variable_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
        && !is_keyword(s)
}

/// Variables of one session. Entries are created or overwritten, never removed.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    variables: BTreeMap<CompactString, Number>,
}

impl SymbolTable {
    pub fn set(&mut self, name: &str, value: Number) -> Number {
        self.variables.insert(name.into(), value);
        value
    }

    pub fn get(&self, name: &str) -> Result<Number, ExprError> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| ExprError::UndefinedVariable(name.into()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// All variables, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Number)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_names() {
        assert!(is_variable_name("x"));
        assert!(is_variable_name("num2"));
        assert!(is_variable_name("Total"));
        assert!(!is_variable_name("2num"));
        assert!(!is_variable_name("my_var"));
        assert!(!is_variable_name(""));
        assert!(!is_variable_name("PRINT"));
        assert!(!is_variable_name("EXIT!"));
        // case-sensitive
        assert!(is_variable_name("print"));
    }

    #[test]
    fn test_set_and_get() {
        let mut table = SymbolTable::default();
        assert!(table.is_empty());
        assert_eq!(
            table.get("x"),
            Err(ExprError::UndefinedVariable("x".into()))
        );

        table.set("x", Number::Integer(3));
        assert!(table.contains("x"));
        assert!(!table.contains("X"));
        assert_eq!(table.get("x"), Ok(Number::Integer(3)));

        table.set("x", Number::Float(1.5));
        assert_eq!(table.get("x"), Ok(Number::Float(1.5)));
        assert_eq!(table.iter().count(), 1);
    }

    #[test]
    fn test_iter_is_ordered_by_name() {
        let mut table = SymbolTable::default();
        table.set("b", Number::Integer(2));
        table.set("a", Number::Float(1.0));
        table.set("c", Number::Integer(3));

        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
