//! Foreign key constraint generation.

use strata_core::statement::ForeignKeyAction;
use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

pub struct AddForeignKeyConstraintGenerator;

impl SqlGenerator for AddForeignKeyConstraintGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        // SQLite cannot add constraints to an existing table.
        matches!(statement, SqlStatement::AddForeignKeyConstraint(_))
            && database.dialect() != Dialect::Sqlite
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let SqlStatement::AddForeignKeyConstraint(statement) = statement else {
            return errors;
        };

        errors.check_required_field("constraintName", !statement.constraint_name.is_empty());
        errors.check_required_field("baseTableName", !statement.base_table.is_empty());
        errors.check_required_field("baseColumnNames", !statement.base_columns.is_empty());
        errors.check_required_field("referencedTableName", !statement.referenced_table.is_empty());
        errors.check_required_field(
            "referencedColumnNames",
            !statement.referenced_columns.is_empty(),
        );

        if !database.dialect().supports_deferrable_constraints() {
            errors.check_disallowed_field(
                "deferrable",
                statement.deferrable,
                database,
                &[database.dialect()],
            );
            errors.check_disallowed_field(
                "initiallyDeferred",
                statement.initially_deferred,
                database,
                &[database.dialect()],
            );
        }

        if database.dialect() == Dialect::SybaseAnywhere
            && (statement.on_delete == Some(ForeignKeyAction::NoAction)
                || statement.on_update == Some(ForeignKeyAction::NoAction))
        {
            errors.add_warning("SQL Anywhere will apply RESTRICT instead of NO ACTION");
        }

        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::AddForeignKeyConstraint(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "add foreign key generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();

        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            database.escape_table_name(statement.base_schema.as_deref(), &statement.base_table),
            database.escape_constraint_name(&statement.constraint_name),
            database.escape_column_list(&statement.base_columns),
            database.escape_table_name(
                statement.referenced_schema.as_deref(),
                &statement.referenced_table
            ),
            database.escape_column_list(&statement.referenced_columns),
        );

        if let Some(action) = statement.on_update {
            if emit_action(dialect, action, false) {
                sql.push_str(" ON UPDATE ");
                sql.push_str(action.as_sql());
            }
        }
        if let Some(action) = statement.on_delete {
            if emit_action(dialect, action, true) {
                sql.push_str(" ON DELETE ");
                sql.push_str(action.as_sql());
            }
        }

        if statement.deferrable {
            sql.push_str(" DEFERRABLE");
        }
        if statement.initially_deferred {
            sql.push_str(" INITIALLY DEFERRED");
        }
        if dialect == Dialect::Oracle && !statement.validate {
            sql.push_str(" ENABLE NOVALIDATE");
        }

        Ok(vec![Sql::new(sql).affecting(DatabaseObject::foreign_key(
            &statement.base_table,
            &statement.constraint_name,
        ))])
    }
}

/// Whether the referential-action clause may be written at all. Oracle
/// treats RESTRICT / NO ACTION as its implicit default and rejects the
/// explicit clause, and supports no ON UPDATE action whatsoever.
fn emit_action(dialect: Dialect, action: ForeignKeyAction, is_delete: bool) -> bool {
    if dialect == Dialect::Oracle {
        if !is_delete {
            return false;
        }
        return !matches!(
            action,
            ForeignKeyAction::Restrict | ForeignKeyAction::NoAction
        );
    }
    true
}

pub struct DropForeignKeyConstraintGenerator;

impl SqlGenerator for DropForeignKeyConstraintGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::DropForeignKeyConstraint(_))
            && database.dialect() != Dialect::Sqlite
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::DropForeignKeyConstraint(statement) = statement {
            errors.check_required_field("baseTableName", !statement.base_table.is_empty());
            errors.check_required_field("constraintName", !statement.constraint_name.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::DropForeignKeyConstraint(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "drop foreign key generator invoked for a different statement".to_string(),
            ));
        };

        let table = database.escape_table_name(statement.schema.as_deref(), &statement.base_table);
        let constraint = database.escape_constraint_name(&statement.constraint_name);
        let sql = if database.dialect().is_mysql_family() {
            format!("ALTER TABLE {table} DROP FOREIGN KEY {constraint}")
        } else {
            format!("ALTER TABLE {table} DROP CONSTRAINT {constraint}")
        };

        Ok(vec![Sql::new(sql).affecting(DatabaseObject::foreign_key(
            &statement.base_table,
            &statement.constraint_name,
        ))])
    }
}
