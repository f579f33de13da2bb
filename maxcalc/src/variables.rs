//! User variables
//!
//! Names are case-insensitive: `X` and `x` are the same variable. The
//! spelling used by the most recent assignment is kept for display.

use crate::error::ParserError;
use maxcalc_core::Complex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: Complex,
}

/// Variables keyed by lower-cased name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variables {
    vars: BTreeMap<String, Variable>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable or replace the value of an existing one
    pub fn add(&mut self, name: &str, value: Complex) {
        debug!(name, "assign variable");
        self.vars.insert(
            name.to_lowercase(),
            Variable {
                name: name.to_string(),
                value,
            },
        );
    }

    pub fn get(&self, name: &str) -> Result<&Complex, ParserError> {
        self.vars
            .get(&name.to_lowercase())
            .map(|var| &var.value)
            .ok_or_else(|| ParserError::UnknownVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(&name.to_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Result<Variable, ParserError> {
        debug!(name, "delete variable");
        self.vars
            .remove(&name.to_lowercase())
            .ok_or_else(|| ParserError::UnknownVariable(name.to_string()))
    }

    pub fn remove_all(&mut self) {
        debug!(count = self.vars.len(), "delete all variables");
        self.vars.clear();
    }

    pub fn count(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variables in lower-cased name order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_case_insensitive() {
        let mut vars = Variables::new();
        vars.add("HelloWorld", Complex::one());
        assert_eq!(vars.get("helloworld"), Ok(&Complex::one()));
        assert_eq!(vars.get("HELLOWORLD"), Ok(&Complex::one()));
        assert_eq!(vars.iter().next().map(|v| v.name.as_str()), Some("HelloWorld"));
        vars.add("helloWORLD", Complex::i());
        assert_eq!(vars.count(), 1);
        assert_eq!(vars.iter().next().map(|v| v.name.as_str()), Some("helloWORLD"));
    }

    #[test]
    fn test_unknown_variable() {
        let mut vars = Variables::new();
        assert_eq!(vars.get("x"), Err(ParserError::UnknownVariable("x".into())));
        assert_eq!(vars.remove("x"), Err(ParserError::UnknownVariable("x".into())));
    }

    #[test]
    fn test_iteration_follows_folded_names() {
        let mut vars = Variables::new();
        vars.add("b", Complex::one());
        vars.add("C", Complex::one());
        vars.add("a", Complex::one());
        let names: Vec<_> = vars.iter().map(|v| v.name.clone()).collect();
        assert_eq!(names, ["a", "b", "C"]);
        vars.remove("c").unwrap();
        assert_eq!(vars.count(), 2);
        vars.remove_all();
        assert!(vars.is_empty());
    }
}
