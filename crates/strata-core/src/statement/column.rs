//! Column-level statements.

use crate::datatype::{DataType, LiteralValue};

/// How a column foreign key names its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForeignKeyReference {
    /// Textual form `table(column)`, parsed at generation time.
    Expression(String),
    /// Already-resolved table and column names.
    Named { table: String, column: String },
}

/// Inline foreign key on an added column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnForeignKey {
    pub name: String,
    pub reference: ForeignKeyReference,
    pub delete_cascade: bool,
    pub validate: bool,
}

/// Adds one column to an existing table, with optional inline
/// constraints. Several single-column statements can be folded into one
/// multi-column statement via [`Self::multiple`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddColumnStatement {
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
    pub column_type: Option<DataType>,
    pub default_value: Option<LiteralValue>,
    pub default_value_constraint_name: Option<String>,
    pub remarks: Option<String>,
    pub nullable: bool,
    pub not_null_constraint_name: Option<String>,
    pub primary_key: bool,
    pub validate_nullable: bool,
    pub validate_primary_key: bool,
    pub unique: bool,
    pub unique_constraint_name: Option<String>,
    pub auto_increment: bool,
    pub start_with: Option<i64>,
    pub increment_by: Option<i64>,
    pub foreign_key: Option<ColumnForeignKey>,
    pub add_after_column: Option<String>,
    pub add_before_column: Option<String>,
    pub add_at_position: Option<u32>,
    /// Computed columns carry no explicit type.
    pub computed: bool,
    /// Sub-statements when this is a multi-column statement.
    pub columns: Vec<AddColumnStatement>,
}

impl AddColumnStatement {
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>, column_type: DataType) -> Self {
        Self {
            schema: None,
            table: table.into(),
            column: column.into(),
            column_type: Some(column_type),
            default_value: None,
            default_value_constraint_name: None,
            remarks: None,
            nullable: true,
            not_null_constraint_name: None,
            primary_key: false,
            validate_nullable: true,
            validate_primary_key: true,
            unique: false,
            unique_constraint_name: None,
            auto_increment: false,
            start_with: None,
            increment_by: None,
            foreign_key: None,
            add_after_column: None,
            add_before_column: None,
            add_at_position: None,
            computed: false,
            columns: Vec::new(),
        }
    }

    /// Folds several single-column statements into one multi-column
    /// statement.
    #[must_use]
    pub fn multiple(columns: Vec<AddColumnStatement>) -> Self {
        let first = columns
            .first()
            .map(|c| (c.schema.clone(), c.table.clone()))
            .unwrap_or_default();
        let mut statement = Self::new(first.1, "", DataType::Integer);
        statement.schema = first.0;
        statement.column_type = None;
        statement.columns = columns;
        statement
    }

    #[must_use]
    pub fn is_multiple(&self) -> bool {
        !self.columns.is_empty()
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    #[must_use]
    pub fn unique(mut self, constraint_name: Option<String>) -> Self {
        self.unique = true;
        self.unique_constraint_name = constraint_name;
        self
    }

    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: LiteralValue) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: ColumnForeignKey) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }

    #[must_use]
    pub fn after_column(mut self, column: impl Into<String>) -> Self {
        self.add_after_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn skip_nullable_validation(mut self) -> Self {
        self.validate_nullable = false;
        self
    }

    #[must_use]
    pub fn skip_primary_key_validation(mut self) -> Self {
        self.validate_primary_key = false;
        self
    }
}

/// Makes an existing column auto-incrementing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAutoIncrementStatement {
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
    pub column_type: Option<DataType>,
    pub start_with: Option<i64>,
    pub increment_by: Option<i64>,
}

impl AddAutoIncrementStatement {
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            column: column.into(),
            column_type: None,
            start_with: None,
            increment_by: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_column_type(mut self, column_type: DataType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    #[must_use]
    pub const fn with_start_with(mut self, start_with: i64) -> Self {
        self.start_with = Some(start_with);
        self
    }

    #[must_use]
    pub const fn with_increment_by(mut self, increment_by: i64) -> Self {
        self.increment_by = Some(increment_by);
        self
    }
}

/// Sets a column default.
#[derive(Debug, Clone, PartialEq)]
pub struct AddDefaultValueStatement {
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
    pub column_type: Option<DataType>,
    pub default_value: LiteralValue,
    pub constraint_name: Option<String>,
}

impl AddDefaultValueStatement {
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        default_value: LiteralValue,
    ) -> Self {
        Self {
            schema: None,
            table: table.into(),
            column: column.into(),
            column_type: None,
            default_value,
            constraint_name: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_column_type(mut self, column_type: DataType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    #[must_use]
    pub fn with_constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }
}

/// Removes a column default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDefaultValueStatement {
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
    pub column_type: Option<DataType>,
}

impl DropDefaultValueStatement {
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            column: column.into(),
            column_type: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Renames a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameColumnStatement {
    pub schema: Option<String>,
    pub table: String,
    pub old_column: String,
    pub new_column: String,
    /// Full data type, required by dialects that restate it on rename
    /// (MySQL `CHANGE`).
    pub column_data_type: Option<DataType>,
    pub remarks: Option<String>,
}

impl RenameColumnStatement {
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        old_column: impl Into<String>,
        new_column: impl Into<String>,
    ) -> Self {
        Self {
            schema: None,
            table: table.into(),
            old_column: old_column.into(),
            new_column: new_column.into(),
            column_data_type: None,
            remarks: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_column_data_type(mut self, column_data_type: DataType) -> Self {
        self.column_data_type = Some(column_data_type);
        self
    }

    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

/// Sets a column comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetColumnRemarksStatement {
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
    pub remarks: String,
    /// Needed by MySQL, which restates the column definition.
    pub column_data_type: Option<DataType>,
}

impl SetColumnRemarksStatement {
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            schema: None,
            table: table.into(),
            column: column.into(),
            remarks: remarks.into(),
            column_data_type: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_column_data_type(mut self, column_data_type: DataType) -> Self {
        self.column_data_type = Some(column_data_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_column_defaults() {
        let statement = AddColumnStatement::new("users", "email", DataType::Varchar(Some(255)));
        assert!(statement.nullable);
        assert!(!statement.primary_key);
        assert!(!statement.is_multiple());
    }

    #[test]
    fn test_primary_key_implies_not_null() {
        let statement =
            AddColumnStatement::new("users", "id", DataType::Bigint).primary_key();
        assert!(statement.primary_key);
        assert!(!statement.nullable);
    }

    #[test]
    fn test_multiple_takes_table_from_first() {
        let statement = AddColumnStatement::multiple(vec![
            AddColumnStatement::new("users", "a", DataType::Integer),
            AddColumnStatement::new("users", "b", DataType::Integer),
        ]);
        assert!(statement.is_multiple());
        assert_eq!(statement.table, "users");
        assert_eq!(statement.columns.len(), 2);
    }
}
