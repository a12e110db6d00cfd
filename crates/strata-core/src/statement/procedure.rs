//! Stored procedure statements.

/// Creates (or replaces) a stored procedure from verbatim procedure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProcedureStatement {
    pub schema: Option<String>,
    /// Procedure name, when known separately from the body.
    pub procedure_name: Option<String>,
    /// Full procedure text as authored for the target database.
    pub procedure_text: String,
    pub end_delimiter: Option<String>,
    pub replace_if_exists: bool,
}

impl CreateProcedureStatement {
    #[must_use]
    pub fn new(procedure_text: impl Into<String>) -> Self {
        Self {
            schema: None,
            procedure_name: None,
            procedure_text: procedure_text.into(),
            end_delimiter: None,
            replace_if_exists: false,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_procedure_name(mut self, name: impl Into<String>) -> Self {
        self.procedure_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_end_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = Some(delimiter.into());
        self
    }

    #[must_use]
    pub const fn replace_if_exists(mut self) -> Self {
        self.replace_if_exists = true;
        self
    }
}
