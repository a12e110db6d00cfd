//! Primary key and unique constraint generation.

use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

pub struct AddPrimaryKeyGenerator;

impl SqlGenerator for AddPrimaryKeyGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::AddPrimaryKey(_))
            && database.dialect() != Dialect::Sqlite
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::AddPrimaryKey(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
            errors.check_required_field("columnNames", !statement.columns.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::AddPrimaryKey(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "add primary key generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);
        let columns = database.escape_column_list(&statement.columns);

        let mut sql = if dialect == Dialect::Informix {
            // Informix puts the constraint name after the column list.
            let mut s = format!("ALTER TABLE {table} ADD CONSTRAINT PRIMARY KEY ({columns})");
            if let Some(name) = &statement.constraint_name {
                s.push_str(" CONSTRAINT ");
                s.push_str(&database.escape_constraint_name(name));
            }
            s
        } else {
            let mut s = format!("ALTER TABLE {table} ADD");
            if let Some(name) = &statement.constraint_name {
                s.push_str(" CONSTRAINT ");
                s.push_str(&database.escape_constraint_name(name));
            }
            s.push_str(&format!(" PRIMARY KEY ({columns})"));
            s
        };

        if dialect == Dialect::Oracle && !statement.validate {
            sql.push_str(" ENABLE NOVALIDATE");
        }

        Ok(vec![Sql::new(sql).affecting(DatabaseObject::table(
            statement.schema.as_deref(),
            &statement.table,
        ))])
    }
}

pub struct AddUniqueConstraintGenerator;

impl SqlGenerator for AddUniqueConstraintGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::AddUniqueConstraint(_))
            && database.dialect() != Dialect::Sqlite
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::AddUniqueConstraint(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
            errors.check_required_field("columnNames", !statement.columns.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::AddUniqueConstraint(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "add unique constraint generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);
        let columns = database.escape_column_list(&statement.columns);

        let mut sql = if dialect == Dialect::Informix {
            let mut s = format!("ALTER TABLE {table} ADD CONSTRAINT UNIQUE ({columns})");
            if let Some(name) = &statement.constraint_name {
                s.push_str(" CONSTRAINT ");
                s.push_str(&database.escape_constraint_name(name));
            }
            s
        } else {
            let mut s = format!("ALTER TABLE {table} ADD");
            if let Some(name) = &statement.constraint_name {
                s.push_str(" CONSTRAINT ");
                s.push_str(&database.escape_constraint_name(name));
            }
            s.push_str(&format!(" UNIQUE ({columns})"));
            s
        };

        if dialect == Dialect::Oracle && !statement.validate {
            sql.push_str(" ENABLE NOVALIDATE");
        }

        let constraint_name = statement.constraint_name.as_deref().unwrap_or_default();
        Ok(vec![Sql::new(sql).affecting(
            DatabaseObject::unique_constraint(&statement.table, constraint_name),
        )])
    }
}
