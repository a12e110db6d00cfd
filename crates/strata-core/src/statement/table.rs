//! Table rename and remarks statements.

/// Renames a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTableStatement {
    pub schema: Option<String>,
    pub old_table: String,
    pub new_table: String,
}

impl RenameTableStatement {
    #[must_use]
    pub fn new(old_table: impl Into<String>, new_table: impl Into<String>) -> Self {
        Self {
            schema: None,
            old_table: old_table.into(),
            new_table: new_table.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Sets (or clears) the comment stored on a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTableRemarksStatement {
    pub schema: Option<String>,
    pub table: String,
    /// Empty string clears the comment.
    pub remarks: String,
}

impl SetTableRemarksStatement {
    #[must_use]
    pub fn new(table: impl Into<String>, remarks: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            remarks: remarks.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}
