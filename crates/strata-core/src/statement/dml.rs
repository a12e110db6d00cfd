//! Data manipulation and raw SQL statements.

use crate::datatype::LiteralValue;

/// A single column/value pair for insert and update statements.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    pub column: String,
    pub value: LiteralValue,
}

impl ColumnValue {
    #[must_use]
    pub fn new(column: impl Into<String>, value: LiteralValue) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// Inserts a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub schema: Option<String>,
    pub table: String,
    pub values: Vec<ColumnValue>,
}

impl InsertStatement {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn value(mut self, column: impl Into<String>, value: LiteralValue) -> Self {
        self.values.push(ColumnValue::new(column, value));
        self
    }
}

/// Updates rows matching an optional WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub schema: Option<String>,
    pub table: String,
    pub values: Vec<ColumnValue>,
    pub where_clause: Option<String>,
    pub where_parameters: Vec<LiteralValue>,
}

impl UpdateStatement {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            values: Vec::new(),
            where_clause: None,
            where_parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: LiteralValue) -> Self {
        self.values.push(ColumnValue::new(column, value));
        self
    }

    /// WHERE clause text without the leading keyword. `?` placeholders are
    /// substituted in order from [`Self::where_parameter`] values.
    #[must_use]
    pub fn where_clause(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    #[must_use]
    pub fn where_parameter(mut self, value: LiteralValue) -> Self {
        self.where_parameters.push(value);
        self
    }
}

/// Inserts a row, or updates it when the primary key already exists.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOrUpdateStatement {
    pub schema: Option<String>,
    pub table: String,
    pub values: Vec<ColumnValue>,
    /// Comma separated list of primary key column names.
    pub primary_key: String,
    /// When set, never update existing rows, only insert missing ones.
    pub only_update: bool,
}

impl InsertOrUpdateStatement {
    #[must_use]
    pub fn new(table: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            values: Vec::new(),
            primary_key: primary_key.into(),
            only_update: false,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn value(mut self, column: impl Into<String>, value: LiteralValue) -> Self {
        self.values.push(ColumnValue::new(column, value));
        self
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &str> {
        self.primary_key.split(',').map(str::trim)
    }
}

/// Verbatim SQL supplied by the user, passed through with its delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSqlStatement {
    pub sql: String,
    pub end_delimiter: String,
}

impl RawSqlStatement {
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            end_delimiter: crate::sql::DEFAULT_DELIMITER.to_string(),
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = delimiter.into();
        self
    }
}

/// Counts rows in a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRowCountStatement {
    pub schema: Option<String>,
    pub table: String,
}

impl TableRowCountStatement {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Checks whether a table has any rows at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIsEmptyStatement {
    pub schema: Option<String>,
    pub table: String,
}

impl TableIsEmptyStatement {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_builder() {
        let statement = InsertStatement::new("users")
            .value("id", LiteralValue::Integer(1))
            .value("name", LiteralValue::String("alice".to_string()));
        assert_eq!(statement.values.len(), 2);
        assert_eq!(statement.values[0].column, "id");
    }

    #[test]
    fn test_primary_key_columns_split() {
        let statement = InsertOrUpdateStatement::new("users", "tenant_id, id");
        let keys: Vec<&str> = statement.primary_key_columns().collect();
        assert_eq!(keys, vec!["tenant_id", "id"]);
    }
}
