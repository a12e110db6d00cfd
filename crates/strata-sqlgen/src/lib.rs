//! # strata-sqlgen
//!
//! Translates the abstract statements of `strata-core` into
//! dialect-correct SQL.
//!
//! Generation is a priority dispatch: every registered [`SqlGenerator`]
//! declares which (statement, database) pairs it supports; the
//! [`GeneratorRegistry`] sorts the supporting set by descending priority
//! and runs the winner, handing it a chain cursor over the rest so a
//! dialect override can delegate, wrap, or replace the portable form.
//!
//! # Example
//!
//! ```rust
//! use strata_core::{Database, Dialect};
//! use strata_core::statement::RenameTableStatement;
//! use strata_sqlgen::GeneratorRegistry;
//!
//! let registry = GeneratorRegistry::with_builtins();
//! let database = Database::new(Dialect::Postgres);
//! let statement = RenameTableStatement::new("person", "people").into();
//!
//! let sql = registry.generate_sql(&statement, &database).unwrap();
//! assert_eq!(sql[0].to_sql(), "ALTER TABLE person RENAME TO people");
//! ```

pub mod clauses;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod generators;

pub use dispatch::{GeneratorRegistry, SqlGeneratorChain};
pub use error::{GenerateError, Result};
pub use generator::{SqlGenerator, PRIORITY_DEFAULT, PRIORITY_DIALECT};
