//! Generated SQL fragments and the schema objects they touch.

use serde::{Deserialize, Serialize};

/// Default end-of-statement delimiter.
pub const DEFAULT_DELIMITER: &str = ";";

/// A reference to the abstract schema object a SQL fragment affects.
///
/// Consumed by diff/snapshot tooling to track what changed without
/// re-parsing the generated SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatabaseObject {
    Table {
        schema: Option<String>,
        name: String,
    },
    Column {
        schema: Option<String>,
        table: String,
        name: String,
    },
    View {
        schema: Option<String>,
        name: String,
    },
    Sequence {
        schema: Option<String>,
        name: String,
    },
    ForeignKey {
        table: String,
        name: String,
    },
    UniqueConstraint {
        table: String,
        name: String,
    },
}

impl DatabaseObject {
    /// Creates a table reference.
    #[must_use]
    pub fn table(schema: Option<&str>, name: &str) -> Self {
        Self::Table {
            schema: schema.map(ToString::to_string),
            name: name.to_string(),
        }
    }

    /// Creates a column reference.
    #[must_use]
    pub fn column(schema: Option<&str>, table: &str, name: &str) -> Self {
        Self::Column {
            schema: schema.map(ToString::to_string),
            table: table.to_string(),
            name: name.to_string(),
        }
    }

    /// Creates a view reference.
    #[must_use]
    pub fn view(schema: Option<&str>, name: &str) -> Self {
        Self::View {
            schema: schema.map(ToString::to_string),
            name: name.to_string(),
        }
    }

    /// Creates a sequence reference.
    #[must_use]
    pub fn sequence(schema: Option<&str>, name: &str) -> Self {
        Self::Sequence {
            schema: schema.map(ToString::to_string),
            name: name.to_string(),
        }
    }

    /// Creates a foreign key reference.
    #[must_use]
    pub fn foreign_key(table: &str, name: &str) -> Self {
        Self::ForeignKey {
            table: table.to_string(),
            name: name.to_string(),
        }
    }

    /// Creates a unique constraint reference.
    #[must_use]
    pub fn unique_constraint(table: &str, name: &str) -> Self {
        Self::UniqueConstraint {
            table: table.to_string(),
            name: name.to_string(),
        }
    }
}

/// One generated SQL fragment: the literal text, the end-of-statement
/// delimiter, and the schema objects it affects. A pure value produced
/// fresh per generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sql {
    sql: String,
    end_delimiter: String,
    affected: Vec<DatabaseObject>,
}

impl Sql {
    /// Creates a fragment with the default `;` delimiter.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            end_delimiter: DEFAULT_DELIMITER.to_string(),
            affected: Vec::new(),
        }
    }

    /// Overrides the end-of-statement delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = delimiter.into();
        self
    }

    /// Attaches an affected schema object.
    #[must_use]
    pub fn affecting(mut self, object: DatabaseObject) -> Self {
        self.affected.push(object);
        self
    }

    /// Attaches several affected schema objects.
    #[must_use]
    pub fn affecting_all(mut self, objects: impl IntoIterator<Item = DatabaseObject>) -> Self {
        self.affected.extend(objects);
        self
    }

    /// The literal SQL text, without delimiter.
    #[must_use]
    pub fn to_sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn end_delimiter(&self) -> &str {
        &self.end_delimiter
    }

    #[must_use]
    pub fn affected_objects(&self) -> &[DatabaseObject] {
        &self.affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_defaults() {
        let sql = Sql::new("SELECT 1");
        assert_eq!(sql.to_sql(), "SELECT 1");
        assert_eq!(sql.end_delimiter(), ";");
        assert!(sql.affected_objects().is_empty());
    }

    #[test]
    fn test_sql_with_affected_objects() {
        let sql = Sql::new("ALTER TABLE users ADD email VARCHAR(255)")
            .affecting(DatabaseObject::column(None, "users", "email"));
        assert_eq!(sql.affected_objects().len(), 1);
        match &sql.affected_objects()[0] {
            DatabaseObject::Column { table, name, .. } => {
                assert_eq!(table, "users");
                assert_eq!(name, "email");
            }
            other => panic!("Expected column reference, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_delimiter() {
        let sql = Sql::new("CREATE PROCEDURE p AS BEGIN SELECT 1 END").with_delimiter("GO");
        assert_eq!(sql.end_delimiter(), "GO");
    }

    #[test]
    fn test_affected_object_serialization() {
        let object = DatabaseObject::sequence(Some("app"), "seq_users");
        let json = serde_json::to_string(&object).expect("serializes");
        assert!(json.contains("\"kind\":\"sequence\""));
        let back: DatabaseObject = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, object);
    }
}
