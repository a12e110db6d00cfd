//! # strata-core
//!
//! Database-agnostic building blocks for schema migrations.
//!
//! This crate provides:
//! - **Statements** - Abstract descriptions of schema changes (`AddColumn`,
//!   `RenameTable`, `CreateSequence`, ...) with no SQL text of their own
//! - **Dialects** - A [`Database`] value combining a [`Dialect`], an optional
//!   version and quoting/identifier rules
//! - **Value objects** - [`Sql`] fragments with affected-object metadata,
//!   accumulated [`ValidationErrors`], changelog bookkeeping types
//!
//! Turning a statement into dialect SQL is the job of the companion
//! `strata-sqlgen` crate.
//!
//! # Example
//!
//! ```rust
//! use strata_core::{Database, Dialect, SqlStatement};
//! use strata_core::statement::RenameTableStatement;
//!
//! let database = Database::new(Dialect::Postgres).with_default_schema("public");
//! let statement: SqlStatement = RenameTableStatement::new("person", "people").into();
//!
//! assert_eq!(statement.name(), "renameTable");
//! assert_eq!(database.escape_table_name(None, "person"), "person");
//! ```

pub mod changeset;
pub mod database;
pub mod datatype;
pub mod sql;
pub mod statement;
pub mod validation;

pub use changeset::{ChangeSet, ExecType};
pub use database::{Database, Dialect, LiveQuery, ObjectQuotingStrategy, QuotingGuard};
pub use datatype::{DataType, LiteralValue};
pub use sql::{DatabaseObject, Sql, DEFAULT_DELIMITER};
pub use statement::SqlStatement;
pub use validation::ValidationErrors;
