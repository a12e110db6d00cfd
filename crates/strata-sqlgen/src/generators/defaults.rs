//! Column default value generation.

use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

pub struct AddDefaultValueGenerator;

impl SqlGenerator for AddDefaultValueGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::AddDefaultValue(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::AddDefaultValue(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
            errors.check_required_field("columnName", !statement.column.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::AddDefaultValue(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "add default value generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);
        let column = database.escape_column_name(&statement.column);
        let literal = statement.default_value.to_sql(dialect);

        let sql = match dialect {
            Dialect::Mssql => {
                let constraint_name = statement.constraint_name.clone().unwrap_or_else(|| {
                    database.generate_default_constraint_name(&statement.table, &statement.column)
                });
                format!(
                    "ALTER TABLE {table} ADD CONSTRAINT {constraint_name} DEFAULT {literal} FOR {column}"
                )
            }
            Dialect::MySql | Dialect::MariaDb => {
                format!("ALTER TABLE {table} ALTER {column} SET DEFAULT {literal}")
            }
            Dialect::Oracle | Dialect::SybaseAnywhere => {
                format!("ALTER TABLE {table} MODIFY {column} DEFAULT {literal}")
            }
            Dialect::Derby => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} WITH DEFAULT {literal}")
            }
            Dialect::Db2Luw | Dialect::Db2z => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} SET WITH DEFAULT {literal}")
            }
            Dialect::Sybase => {
                format!("ALTER TABLE {table} REPLACE {column} DEFAULT {literal}")
            }
            _ => format!("ALTER TABLE {table} ALTER COLUMN {column} SET DEFAULT {literal}"),
        };

        Ok(vec![Sql::new(sql).affecting(DatabaseObject::column(
            statement.schema.as_deref(),
            &statement.table,
            &statement.column,
        ))])
    }
}

pub struct DropDefaultValueGenerator;

impl SqlGenerator for DropDefaultValueGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::DropDefaultValue(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::DropDefaultValue(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
            errors.check_required_field("columnName", !statement.column.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::DropDefaultValue(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "drop default value generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);
        let column = database.escape_column_name(&statement.column);

        let sql = match dialect {
            Dialect::Mssql => {
                // The constraint carries the default; without a known name
                // we fall back to the name MSSQL generates itself.
                let constraint_name =
                    database.generate_default_constraint_name(&statement.table, &statement.column);
                format!("ALTER TABLE {table} DROP CONSTRAINT {constraint_name}")
            }
            Dialect::MySql | Dialect::MariaDb => {
                format!("ALTER TABLE {table} ALTER {column} DROP DEFAULT")
            }
            Dialect::Oracle | Dialect::SybaseAnywhere => {
                format!("ALTER TABLE {table} MODIFY {column} DEFAULT NULL")
            }
            Dialect::Sybase => {
                format!("ALTER TABLE {table} REPLACE {column} DEFAULT NULL")
            }
            _ => format!("ALTER TABLE {table} ALTER COLUMN {column} DROP DEFAULT"),
        };

        Ok(vec![Sql::new(sql).affecting(DatabaseObject::column(
            statement.schema.as_deref(),
            &statement.table,
            &statement.column,
        ))])
    }
}
