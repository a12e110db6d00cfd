//! Stored procedure creation.
//!
//! Procedure bodies are verbatim dialect SQL; the generator only adjusts
//! the surroundings: qualifying the procedure name with a schema, session
//! schema wrapping where name rewriting is unsafe, and replace-if-exists
//! scaffolding.

use tracing::warn;

use strata_core::{Database, Dialect, Sql, SqlStatement, ValidationErrors, DEFAULT_DELIMITER};

use crate::clauses::{strip_trailing_delimiter, Clauses};
use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

pub struct CreateProcedureGenerator;

impl SqlGenerator for CreateProcedureGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::CreateProcedure(_))
            && database.dialect() != Dialect::Sqlite
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::CreateProcedure(statement) = statement {
            errors.check_required_field("procedureText", !statement.procedure_text.is_empty());
            if statement.replace_if_exists {
                let dialect = database.dialect();
                if dialect == Dialect::Mssql
                    || dialect.is_mysql_family()
                    || dialect.is_db2_family()
                {
                    errors.check_required_field(
                        "procedureName",
                        statement.procedure_name.is_some(),
                    );
                } else {
                    errors.add_error(format!(
                        "replaceIfExists is not allowed on {}",
                        dialect.name()
                    ));
                }
            }
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::CreateProcedure(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "create procedure generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let delimiter = statement
            .end_delimiter
            .clone()
            .unwrap_or_else(|| DEFAULT_DELIMITER.to_string());
        let schema = statement
            .schema
            .as_deref()
            .or_else(|| database.default_schema_name());

        let mut body = statement.procedure_text.clone();
        let mut prologue: Vec<Sql> = Vec::new();
        let mut epilogue: Vec<Sql> = Vec::new();

        if let Some(schema) = schema {
            match dialect {
                // Session-schema dialects: rewriting the name inside the
                // body is unreliable, set the schema around it instead.
                Dialect::Oracle => {
                    prologue.push(Sql::new(format!(
                        "ALTER SESSION SET CURRENT_SCHEMA={}",
                        database.escape_object_name(schema)
                    )));
                    if let Some(restore) = restore_schema(database, schema) {
                        epilogue.push(Sql::new(format!(
                            "ALTER SESSION SET CURRENT_SCHEMA={}",
                            database.escape_object_name(&restore)
                        )));
                    }
                }
                Dialect::Db2Luw | Dialect::Db2z => {
                    prologue.push(Sql::new(format!(
                        "SET CURRENT SCHEMA {}",
                        database.escape_object_name(schema)
                    )));
                    if let Some(restore) = restore_schema(database, schema) {
                        epilogue.push(Sql::new(format!(
                            "SET CURRENT SCHEMA {}",
                            database.escape_object_name(&restore)
                        )));
                    }
                }
                Dialect::Postgres => {
                    let original = current_search_path(database);
                    let already_first = original
                        .split(',')
                        .next()
                        .is_some_and(|first| first.trim().eq_ignore_ascii_case(schema));
                    if !already_first {
                        prologue.push(Sql::new(format!(
                            "SET SEARCH_PATH TO {}, {original}",
                            database.escape_object_name(schema)
                        )));
                        epilogue.push(Sql::new(format!("SET SEARCH_PATH TO {original}")));
                    }
                }
                _ => {
                    let mut clauses = Clauses::parse(&body);
                    // Procedure declarations inside a package body belong
                    // to the package's schema; leave those untouched.
                    clauses.rewrite_after_keyword("PROCEDURE", &["PACKAGE"], |name| {
                        qualify_name(name, schema)
                    });
                    body = clauses.to_string();
                }
            }
        }

        if statement.replace_if_exists {
            // Validation guarantees a name is present here.
            let name = statement.procedure_name.as_deref().ok_or_else(|| {
                GenerateError::Unexpected(
                    "replace-if-exists procedure without a procedure name".to_string(),
                )
            })?;
            let qualified = database.escape_table_name(schema, name);
            if dialect == Dialect::Mssql {
                // Guarantee the object exists, then turn CREATE into ALTER
                // so the body replaces it without a drop.
                prologue.push(Sql::new(format!(
                    "if object_id('{qualified}', 'p') is null exec ('create procedure {qualified} as select 1 a')"
                )));
                let mut clauses = Clauses::parse(&body);
                clauses.replace_first_keyword(&["create", "alter"], "ALTER");
                body = clauses.to_string();
            } else if dialect.is_db2_family() {
                let mut clauses = Clauses::parse(&body);
                clauses.replace_first_keyword(&["create"], "CREATE OR REPLACE");
                body = clauses.to_string();
            } else {
                prologue.push(Sql::new(format!("DROP PROCEDURE IF EXISTS {qualified}")));
            }
        }

        let body = strip_trailing_delimiter(&body, &delimiter);

        let mut out = prologue;
        out.push(Sql::new(body).with_delimiter(delimiter));
        out.extend(epilogue);
        Ok(out)
    }
}

/// Schema to restore the session to after creating the procedure, when
/// one differs from the schema being set.
fn restore_schema(database: &Database, schema: &str) -> Option<String> {
    database
        .default_schema_name()
        .filter(|default| !default.eq_ignore_ascii_case(schema))
        .map(ToString::to_string)
}

/// Current Postgres search path, read from the live connection when one
/// is available. Failures fall back to the configured default schema.
fn current_search_path(database: &Database) -> String {
    let fallback = || {
        database
            .default_schema_name()
            .unwrap_or("public")
            .to_string()
    };
    match database.live_query() {
        Some(executor) => match executor.query_string("SHOW SEARCH_PATH") {
            Ok(path) => path.trim().to_string(),
            Err(error) => {
                warn!(error = %error, "could not read current search path, using default schema");
                fallback()
            }
        },
        None => fallback(),
    }
}

/// Prefixes a procedure name with a schema. Two-part names have their
/// schema replaced; three-part names keep the catalog and replace the
/// middle part.
fn qualify_name(name: &str, schema: &str) -> String {
    let parts: Vec<&str> = name.split('.').collect();
    match parts.as_slice() {
        [only] => format!("{schema}.{only}"),
        [_, object] => format!("{schema}.{object}"),
        [catalog, _, object] => format!("{catalog}.{schema}.{object}"),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_name_forms() {
        assert_eq!(qualify_name("my_proc", "app"), "app.my_proc");
        assert_eq!(qualify_name("old.my_proc", "app"), "app.my_proc");
        assert_eq!(qualify_name("cat.old.my_proc", "app"), "cat.app.my_proc");
    }

    #[test]
    fn test_package_body_is_left_alone() {
        let mut clauses = Clauses::parse("CREATE PACKAGE pkg AS PROCEDURE p; END;");
        let rewritten =
            clauses.rewrite_after_keyword("PROCEDURE", &["PACKAGE"], |n| format!("app.{n}"));
        assert!(!rewritten);
    }
}
