//! Making an existing column auto-incrementing.

use strata_core::statement::AddAutoIncrementStatement;
use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::{SqlGenerator, PRIORITY_DIALECT};

pub struct AddAutoIncrementGenerator;

impl SqlGenerator for AddAutoIncrementGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        if !matches!(statement, SqlStatement::AddAutoIncrement(_)) {
            return false;
        }
        let dialect = database.dialect();
        // MSSQL and Sybase cannot turn an existing column into an
        // identity column; SQLite only supports it at table creation.
        dialect.supports_auto_increment()
            && !matches!(
                dialect,
                Dialect::Mssql | Dialect::Sybase | Dialect::SybaseAnywhere | Dialect::Sqlite
            )
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        validate_add_auto_increment(statement, database)
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::AddAutoIncrement(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "add auto increment generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let schema = statement.schema.as_deref();
        let table = database.escape_table_name(schema, &statement.table);
        let column = database.escape_column_name(&statement.column);

        let sql = if dialect.is_mysql_family() {
            let column_type = statement
                .column_type
                .as_ref()
                .map(|t| t.to_database_type(dialect))
                .unwrap_or_default();
            format!("ALTER TABLE {table} MODIFY {column} {column_type} AUTO_INCREMENT")
        } else {
            let identity = identity_options(statement.start_with, statement.increment_by);
            let verb = if dialect == Dialect::Postgres { "ADD" } else { "SET" };
            format!(
                "ALTER TABLE {table} ALTER COLUMN {column} {verb} GENERATED BY DEFAULT AS IDENTITY{identity}"
            )
        };

        let mut result = vec![Sql::new(sql).affecting(DatabaseObject::column(
            schema,
            &statement.table,
            &statement.column,
        ))];

        // MySQL sets the counter start as a table option.
        if dialect.is_mysql_family() {
            if let Some(start) = statement.start_with {
                result.push(
                    Sql::new(format!("ALTER TABLE {table} AUTO_INCREMENT = {start}"))
                        .affecting(DatabaseObject::table(schema, &statement.table)),
                );
            }
        }

        Ok(result)
    }
}

/// Informix expresses identity through the SERIAL types, so the column
/// is retyped instead of gaining an identity clause. Outranks the
/// portable generator whenever the target is Informix.
pub struct InformixAddAutoIncrementGenerator;

impl SqlGenerator for InformixAddAutoIncrementGenerator {
    fn priority(&self) -> i32 {
        PRIORITY_DIALECT
    }

    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::AddAutoIncrement(_))
            && database.dialect() == Dialect::Informix
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        validate_add_auto_increment(statement, database)
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::AddAutoIncrement(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "informix auto increment generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let table = database.escape_table_name(schema, &statement.table);
        let column = database.escape_column_name(&statement.column);

        let serial_type = match &statement.column_type {
            Some(t) if t.to_database_type(Dialect::Informix).eq_ignore_ascii_case("BIGINT") => {
                "BIGSERIAL"
            }
            _ => "SERIAL",
        };
        let start = statement
            .start_with
            .map(|s| format!("({s})"))
            .unwrap_or_default();

        Ok(vec![Sql::new(format!(
            "ALTER TABLE {table} MODIFY ({column} {serial_type}{start})"
        ))
        .affecting(DatabaseObject::column(
            schema,
            &statement.table,
            &statement.column,
        ))])
    }
}

fn validate_add_auto_increment(
    statement: &SqlStatement,
    database: &Database,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let SqlStatement::AddAutoIncrement(statement) = statement else {
        return errors;
    };
    errors.check_required_field("tableName", !statement.table.is_empty());
    errors.check_required_field("columnName", !statement.column.is_empty());
    // The MySQL MODIFY form restates the full column type.
    if database.dialect().is_mysql_family() {
        errors.check_required_field("columnDataType", statement.column_type.is_some());
    }
    errors
}

fn identity_options(start_with: Option<i64>, increment_by: Option<i64>) -> String {
    match (start_with, increment_by) {
        (None, None) => String::new(),
        (start, increment) => format!(
            " (START WITH {} INCREMENT BY {})",
            start.unwrap_or(1),
            increment.unwrap_or(1)
        ),
    }
}
