//! Error types for SQL generation.

use strata_core::ValidationErrors;

/// Errors that can occur while turning a statement into SQL.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// No registered generator supports the statement on the target, or a
    /// generator determined mid-generation that the target cannot do it.
    #[error("{statement} is not supported on {database}: {reason}")]
    NotSupported {
        /// Statement kind name.
        statement: String,
        /// Target dialect name.
        database: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// Statement-level validation failed before generation started.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A failure no generator anticipated (e.g. a live-query hook error).
    #[error("{0}")]
    Unexpected(String),
}

impl GenerateError {
    /// Convenience constructor for the common unsupported case.
    pub fn not_supported(
        statement: &strata_core::SqlStatement,
        database: &strata_core::Database,
        reason: impl Into<String>,
    ) -> Self {
        Self::NotSupported {
            statement: statement.name().to_string(),
            database: database.dialect().name().to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the generator crate.
pub type Result<T> = std::result::Result<T, GenerateError>;
