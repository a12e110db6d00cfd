//! Column rename, the widest dialect branch in the crate.

use strata_core::statement::RenameColumnStatement;
use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

pub struct RenameColumnGenerator;

impl SqlGenerator for RenameColumnGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        if !matches!(statement, SqlStatement::RenameColumn(_)) {
            return false;
        }
        // SQLite grew column renames in 3.25; unknown versions count as
        // too old.
        if database.dialect() == Dialect::Sqlite {
            return database.version_at_least(3, 25) == Some(true);
        }
        true
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let SqlStatement::RenameColumn(statement) = statement else {
            return errors;
        };
        errors.check_required_field("tableName", !statement.table.is_empty());
        errors.check_required_field("oldColumnName", !statement.old_column.is_empty());
        errors.check_required_field("newColumnName", !statement.new_column.is_empty());
        if database.dialect().is_mysql_family() {
            errors.check_required_field("columnDataType", statement.column_data_type.is_some());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::RenameColumn(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "rename column generator invoked for a different statement".to_string(),
            ));
        };

        let schema = statement.schema.as_deref();
        let table = database.escape_table_name(schema, &statement.table);
        let old_column = database.escape_column_name(&statement.old_column);
        let new_column = database.escape_column_name(&statement.new_column);

        let mut sql = match database.dialect() {
            Dialect::Mssql => {
                // The new name must stay unescaped or sp_rename would
                // store the brackets as part of the name.
                format!(
                    "exec sp_rename '{table}.{old_column}', '{}', 'COLUMN'",
                    statement.new_column
                )
            }
            Dialect::MySql | Dialect::MariaDb => mysql_rename(statement, database, &table),
            Dialect::Sybase => format!(
                "exec sp_rename '{}.{}', '{}'",
                statement.table, statement.old_column, statement.new_column
            ),
            Dialect::Hsqldb | Dialect::H2 => {
                format!("ALTER TABLE {table} ALTER COLUMN {old_column} RENAME TO {new_column}")
            }
            Dialect::Firebird => {
                format!("ALTER TABLE {table} ALTER COLUMN {old_column} TO {new_column}")
            }
            Dialect::Derby | Dialect::Informix => {
                format!("RENAME COLUMN {table}.{old_column} TO {new_column}")
            }
            Dialect::SybaseAnywhere => {
                format!("ALTER TABLE {table} RENAME {old_column} TO {new_column}")
            }
            // DB2 family, Postgres, Oracle, SQLite >= 3.25 and anything
            // ANSI-shaped share the standard form.
            _ => format!("ALTER TABLE {table} RENAME COLUMN {old_column} TO {new_column}"),
        };

        if database.dialect().is_mysql_family() {
            if let Some(remarks) = &statement.remarks {
                sql.push_str(" COMMENT '");
                sql.push_str(&database.escape_string_literal(remarks));
                sql.push('\'');
            }
        }

        Ok(vec![Sql::new(sql).affecting_all([
            DatabaseObject::column(schema, &statement.table, &statement.old_column),
            DatabaseObject::column(schema, &statement.table, &statement.new_column),
        ])])
    }
}

fn mysql_rename(statement: &RenameColumnStatement, database: &Database, table: &str) -> String {
    let old_column = database.escape_column_name(&statement.old_column);
    let new_column = database.escape_column_name(&statement.new_column);

    let rename_keyword_supported = if database.dialect() == Dialect::MariaDb {
        database.version_at_least(11, 0) == Some(true)
            || (database.version_at_least(10, 5) == Some(true)
                && database.version_at_least(11, 0) == Some(false))
    } else {
        database.version_at_least(8, 0) == Some(true)
    };

    if rename_keyword_supported {
        format!("ALTER TABLE {table} RENAME COLUMN {old_column} TO {new_column}")
    } else {
        // CHANGE requires the full column type restated; validation made
        // sure it is present.
        let column_type = statement
            .column_data_type
            .as_ref()
            .map(|t| t.to_database_type(database.dialect()))
            .unwrap_or_default();
        format!("ALTER TABLE {table} CHANGE {old_column} {new_column} {column_type}")
    }
}
