//! Builder for `filter=` expressions.
//!
//! The API filters collections with a single `filter` query parameter holding
//! `field[.exact]:value` predicates joined by `;`, e.g.
//! `name:ad01;type:microsoft`. Values may not contain either separator.

use std::fmt;

use crate::error::{Error, Result};

/// A list of filter predicates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<String>,
}

impl Filter {
    /// Create an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Append a `field:value` predicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `value` contains `;` or `:`.
    pub fn matches(self, field: &str, value: impl fmt::Display) -> Result<Self> {
        self.push(field, "", &value.to_string())
    }

    /// Append a `field.exact:value` predicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `value` contains `;` or `:`.
    pub fn exact(self, field: &str, value: impl fmt::Display) -> Result<Self> {
        self.push(field, ".exact", &value.to_string())
    }

    fn push(mut self, field: &str, lookup: &str, value: &str) -> Result<Self> {
        if value.contains(|c: char| c == ';' || c == ':') {
            return Err(Error::Validation(format!(
                "filter value for `{field}` must not contain `;` or `:`, got `{value}`"
            )));
        }
        self.predicates.push(format!("{field}{lookup}:{value}"));
        Ok(self)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.predicates.join(";"))
    }
}
