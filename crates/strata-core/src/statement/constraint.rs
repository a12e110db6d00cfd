//! Table-level constraint statements.

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ForeignKeyAction {
    /// SQL keyword form.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Adds a named foreign key constraint between two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForeignKeyConstraintStatement {
    pub constraint_name: String,
    pub base_schema: Option<String>,
    pub base_table: String,
    pub base_columns: Vec<String>,
    pub referenced_schema: Option<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    pub on_delete: Option<ForeignKeyAction>,
    pub on_update: Option<ForeignKeyAction>,
    pub deferrable: bool,
    pub initially_deferred: bool,
    pub validate: bool,
}

impl AddForeignKeyConstraintStatement {
    #[must_use]
    pub fn new(
        constraint_name: impl Into<String>,
        base_table: impl Into<String>,
        base_columns: Vec<String>,
        referenced_table: impl Into<String>,
        referenced_columns: Vec<String>,
    ) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            base_schema: None,
            base_table: base_table.into(),
            base_columns,
            referenced_schema: None,
            referenced_table: referenced_table.into(),
            referenced_columns,
            on_delete: None,
            on_update: None,
            deferrable: false,
            initially_deferred: false,
            validate: true,
        }
    }

    #[must_use]
    pub fn with_base_schema(mut self, schema: impl Into<String>) -> Self {
        self.base_schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_referenced_schema(mut self, schema: impl Into<String>) -> Self {
        self.referenced_schema = Some(schema.into());
        self
    }

    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    #[must_use]
    pub const fn deferrable(mut self, initially_deferred: bool) -> Self {
        self.deferrable = true;
        self.initially_deferred = initially_deferred;
        self
    }

    #[must_use]
    pub const fn skip_validation(mut self) -> Self {
        self.validate = false;
        self
    }
}

/// Drops a foreign key constraint by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropForeignKeyConstraintStatement {
    pub schema: Option<String>,
    pub base_table: String,
    pub constraint_name: String,
}

impl DropForeignKeyConstraintStatement {
    #[must_use]
    pub fn new(base_table: impl Into<String>, constraint_name: impl Into<String>) -> Self {
        Self {
            schema: None,
            base_table: base_table.into(),
            constraint_name: constraint_name.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Adds a primary key to an existing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPrimaryKeyStatement {
    pub schema: Option<String>,
    pub table: String,
    pub columns: Vec<String>,
    pub constraint_name: Option<String>,
    pub validate: bool,
}

impl AddPrimaryKeyStatement {
    #[must_use]
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            columns,
            constraint_name: None,
            validate: true,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn skip_validation(mut self) -> Self {
        self.validate = false;
        self
    }
}

/// Adds a unique constraint to an existing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddUniqueConstraintStatement {
    pub schema: Option<String>,
    pub table: String,
    pub columns: Vec<String>,
    pub constraint_name: Option<String>,
    pub validate: bool,
}

impl AddUniqueConstraintStatement {
    #[must_use]
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            columns,
            constraint_name: None,
            validate: true,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn skip_validation(mut self) -> Self {
        self.validate = false;
        self
    }
}
