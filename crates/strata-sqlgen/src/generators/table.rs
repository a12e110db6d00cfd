//! Table renames and table/column comments.

use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

pub struct RenameTableGenerator;

impl SqlGenerator for RenameTableGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::RenameTable(_))
            && database.dialect() != Dialect::Firebird
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::RenameTable(statement) = statement {
            errors.check_required_field("oldTableName", !statement.old_table.is_empty());
            errors.check_required_field("newTableName", !statement.new_table.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::RenameTable(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "rename table generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let old = database.escape_table_name(schema, &statement.old_table);
        let new = database.escape_object_name(&statement.new_table);

        let sql = match database.dialect() {
            Dialect::Mssql | Dialect::Sybase => {
                format!("exec sp_rename '{old}', '{}'", statement.new_table)
            }
            d if d.is_mysql_family() => format!("ALTER TABLE {old} RENAME {new}"),
            Dialect::Db2Luw | Dialect::Db2z | Dialect::Derby | Dialect::Informix => {
                format!("RENAME TABLE {old} TO {new}")
            }
            _ => format!("ALTER TABLE {old} RENAME TO {new}"),
        };
        Ok(vec![Sql::new(sql)
            .affecting(DatabaseObject::table(schema, &statement.old_table))
            .affecting(DatabaseObject::table(schema, &statement.new_table))])
    }
}

pub struct SetTableRemarksGenerator;

impl SqlGenerator for SetTableRemarksGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::SetTableRemarks(_))
            && matches!(
                database.dialect(),
                Dialect::Postgres
                    | Dialect::MySql
                    | Dialect::MariaDb
                    | Dialect::Mssql
                    | Dialect::Oracle
                    | Dialect::Db2Luw
                    | Dialect::Db2z
                    | Dialect::H2
                    | Dialect::Hsqldb
            )
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::SetTableRemarks(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::SetTableRemarks(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "set table remarks generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let table = database.escape_table_name(schema, &statement.table);
        let remarks = database.escape_string_literal(&statement.remarks);

        let sql = match database.dialect() {
            d if d.is_mysql_family() => format!("ALTER TABLE {table} COMMENT = '{remarks}'"),
            Dialect::Mssql => extended_property_sql(database, statement.schema.as_deref(), &statement.table, None, &statement.remarks),
            _ => format!("COMMENT ON TABLE {table} IS '{remarks}'"),
        };
        Ok(vec![Sql::new(sql).affecting(DatabaseObject::table(schema, &statement.table))])
    }
}

pub struct SetColumnRemarksGenerator;

impl SqlGenerator for SetColumnRemarksGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::SetColumnRemarks(_))
            && matches!(
                database.dialect(),
                Dialect::Postgres
                    | Dialect::MySql
                    | Dialect::MariaDb
                    | Dialect::Mssql
                    | Dialect::Oracle
                    | Dialect::Db2Luw
                    | Dialect::Db2z
                    | Dialect::H2
                    | Dialect::Hsqldb
            )
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::SetColumnRemarks(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
            errors.check_required_field("columnName", !statement.column.is_empty());
            if database.dialect().is_mysql_family() {
                // MySQL restates the whole column definition for a comment.
                errors.check_required_field(
                    "columnDataType",
                    statement.column_data_type.is_some(),
                );
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
        let SqlStatement::SetColumnRemarks(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "set column remarks generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let table = database.escape_table_name(schema, &statement.table);
        let column = database.escape_column_name(&statement.column);
        let remarks = database.escape_string_literal(&statement.remarks);

        let sql = if database.dialect().is_mysql_family() {
            let data_type = statement
                .column_data_type
                .as_ref()
                .map(|t| t.to_database_type(database.dialect()))
                .ok_or_else(|| {
                    GenerateError::Unexpected(
                        "column remarks on mysql without a column data type".to_string(),
                    )
                })?;
            format!("ALTER TABLE {table} MODIFY {column} {data_type} COMMENT '{remarks}'")
        } else if database.dialect() == Dialect::Mssql {
            extended_property_sql(
                database,
                statement.schema.as_deref(),
                &statement.table,
                Some(&statement.column),
                &statement.remarks,
            )
        } else {
            format!("COMMENT ON COLUMN {table}.{column} IS '{remarks}'")
        };
        Ok(vec![Sql::new(sql).affecting(DatabaseObject::column(
            schema,
            &statement.table,
            &statement.column,
        ))])
    }
}

/// MSSQL stores comments as the MS_Description extended property.
pub(super) fn extended_property_sql(
    database: &Database,
    schema: Option<&str>,
    table: &str,
    column: Option<&str>,
    remarks: &str,
) -> String {
    let schema = schema.unwrap_or("dbo");
    let remarks = database.escape_string_literal(remarks);
    let mut sql = format!(
        "EXEC sp_addextendedproperty @name = N'MS_Description', @value = N'{remarks}', \
         @level0type = N'SCHEMA', @level0name = N'{schema}', \
         @level1type = N'TABLE', @level1name = N'{table}'"
    );
    if let Some(column) = column {
        sql.push_str(&format!(
            ", @level2type = N'COLUMN', @level2name = N'{column}'"
        ));
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::GeneratorRegistry;
    use strata_core::statement::{RenameTableStatement, SetTableRemarksStatement};

    #[test]
    fn test_rename_table_forms() {
        let registry = GeneratorRegistry::with_builtins();
        let statement: SqlStatement = RenameTableStatement::new("person", "people").into();

        let cases = [
            (Dialect::Postgres, "ALTER TABLE person RENAME TO people"),
            (Dialect::MySql, "ALTER TABLE person RENAME people"),
            (Dialect::Db2Luw, "RENAME TABLE person TO people"),
            (Dialect::Mssql, "exec sp_rename 'person', 'people'"),
        ];
        for (dialect, expected) in cases {
            let database = Database::new(dialect);
            let sql = registry.generate_sql(&statement, &database).unwrap();
            assert_eq!(sql[0].to_sql(), expected, "{}", dialect.name());
        }
    }

    #[test]
    fn test_rename_table_unsupported_on_firebird() {
        let registry = GeneratorRegistry::with_builtins();
        let statement: SqlStatement = RenameTableStatement::new("person", "people").into();
        let database = Database::new(Dialect::Firebird);
        assert!(registry.generate_sql(&statement, &database).is_err());
    }

    #[test]
    fn test_table_remarks_escapes_quotes() {
        let registry = GeneratorRegistry::with_builtins();
        let statement: SqlStatement =
            SetTableRemarksStatement::new("person", "the 'main' table").into();
        let database = Database::new(Dialect::Postgres);
        let sql = registry.generate_sql(&statement, &database).unwrap();
        assert_eq!(
            sql[0].to_sql(),
            "COMMENT ON TABLE person IS 'the ''main'' table'"
        );
    }
}
