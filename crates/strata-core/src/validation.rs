//! Validation accumulator for generation attempts.
//!
//! Checks never short-circuit: every required-field and disallowed-field
//! violation is collected so one report can carry multiple simultaneous
//! problems. Errors block generation; warnings are advisory only.

use std::fmt;

use crate::database::{Database, Dialect};

/// Accumulated validation errors and warnings for one generation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error if the field is absent.
    pub fn check_required_field(&mut self, field: &str, present: bool) {
        if !present {
            self.errors.push(format!("{field} is required"));
        }
    }

    /// Records an error if the string field is absent or blank.
    pub fn check_required_str(&mut self, field: &str, value: Option<&str>) {
        self.check_required_field(field, value.is_some_and(|v| !v.trim().is_empty()));
    }

    /// Records an error unless at least one of the named fields is present.
    pub fn check_required_one_of(&mut self, fields: &[&str], any_present: bool) {
        if !any_present {
            self.errors
                .push(format!("One of {} is required", fields.join(", ")));
        }
    }

    /// Records an error if the field is set and the target dialect is one
    /// of the disallowed ones.
    pub fn check_disallowed_field(
        &mut self,
        field: &str,
        set: bool,
        database: &Database,
        disallowed: &[Dialect],
    ) {
        if set && disallowed.contains(&database.dialect()) {
            self.errors
                .push(format!("{field} is not allowed on {}", database.dialect()));
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Merges another accumulator into this one.
    pub fn add_all(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    #[must_use]
    pub fn error_messages(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn warning_messages(&self) -> &[String] {
        &self.warnings
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_accumulates() {
        let mut errors = ValidationErrors::new();
        errors.check_required_str("tableName", None);
        errors.check_required_str("columnName", Some(""));
        errors.check_required_str("newColumnName", Some("b"));
        assert_eq!(
            errors.error_messages(),
            &["tableName is required", "columnName is required"]
        );
    }

    #[test]
    fn test_disallowed_field_matches_dialect() {
        let firebird = Database::new(Dialect::Firebird);
        let postgres = Database::new(Dialect::Postgres);

        let mut errors = ValidationErrors::new();
        errors.check_disallowed_field("minValue", true, &firebird, &[Dialect::Firebird]);
        errors.check_disallowed_field("minValue", true, &postgres, &[Dialect::Firebird]);
        errors.check_disallowed_field("maxValue", false, &firebird, &[Dialect::Firebird]);

        assert_eq!(errors.error_messages(), &["minValue is not allowed on firebird"]);
    }

    #[test]
    fn test_warnings_do_not_block() {
        let mut errors = ValidationErrors::new();
        errors.add_warning("SQL Anywhere will apply RESTRICT instead of NO ACTION");
        assert!(!errors.has_errors());
        assert!(errors.has_warnings());
    }

    #[test]
    fn test_merge() {
        let mut first = ValidationErrors::new();
        first.add_error("a is required");
        let mut second = ValidationErrors::new();
        second.add_error("b is required");
        second.add_warning("advisory");
        first.add_all(second);
        assert_eq!(first.error_messages().len(), 2);
        assert_eq!(first.warning_messages().len(), 1);
    }

    #[test]
    fn test_one_of_check() {
        let mut errors = ValidationErrors::new();
        errors.check_required_one_of(&["columns", "computed"], false);
        assert_eq!(errors.error_messages(), &["One of columns, computed is required"]);
    }
}
