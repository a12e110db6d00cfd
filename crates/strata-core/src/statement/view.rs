//! View statements.

/// Creates (or replaces) a view from a SELECT definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateViewStatement {
    pub schema: Option<String>,
    pub view_name: String,
    /// SELECT body, without the CREATE VIEW prefix.
    pub select_query: String,
    pub replace_if_exists: bool,
    /// The select query already is a full CREATE VIEW statement.
    pub full_definition: bool,
}

impl CreateViewStatement {
    #[must_use]
    pub fn new(view_name: impl Into<String>, select_query: impl Into<String>) -> Self {
        Self {
            schema: None,
            view_name: view_name.into(),
            select_query: select_query.into(),
            replace_if_exists: false,
            full_definition: false,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub const fn replace_if_exists(mut self) -> Self {
        self.replace_if_exists = true;
        self
    }

    #[must_use]
    pub const fn full_definition(mut self) -> Self {
        self.full_definition = true;
        self
    }
}

/// Drops a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropViewStatement {
    pub schema: Option<String>,
    pub view_name: String,
    pub if_exists: bool,
}

impl DropViewStatement {
    #[must_use]
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            schema: None,
            view_name: view_name.into(),
            if_exists: false,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}

/// Renames a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameViewStatement {
    pub schema: Option<String>,
    pub old_view: String,
    pub new_view: String,
}

impl RenameViewStatement {
    #[must_use]
    pub fn new(old_view: impl Into<String>, new_view: impl Into<String>) -> Self {
        Self {
            schema: None,
            old_view: old_view.into(),
            new_view: new_view.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Sets (or clears) the comment stored on a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetViewRemarksStatement {
    pub schema: Option<String>,
    pub view_name: String,
    /// Empty string clears the comment.
    pub remarks: String,
}

impl SetViewRemarksStatement {
    #[must_use]
    pub fn new(view_name: impl Into<String>, remarks: impl Into<String>) -> Self {
        Self {
            schema: None,
            view_name: view_name.into(),
            remarks: remarks.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}
