//! Row-level statements: inserts, updates, upserts and probes.

use strata_core::statement::ColumnValue;
use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

pub struct InsertGenerator;

impl SqlGenerator for InsertGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::Insert(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::Insert(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
            errors.check_required_field("columns", !statement.values.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::Insert(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "insert generator invoked for a different statement".to_string(),
            ));
        };
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            column_list(&statement.values, database),
            value_list(&statement.values, database),
        );
        Ok(vec![Sql::new(sql).affecting(DatabaseObject::table(
            statement.schema.as_deref(),
            &statement.table,
        ))])
    }
}

pub struct UpdateGenerator;

impl SqlGenerator for UpdateGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::Update(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::Update(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
            errors.check_required_field("columns", !statement.values.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::Update(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "update generator invoked for a different statement".to_string(),
            ));
        };
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);
        let mut sql = format!("UPDATE {table} SET {}", set_list(&statement.values, database));

        if let Some(where_clause) = &statement.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&substitute_placeholders(
                where_clause,
                &statement.where_parameters,
                database,
            )?);
        }

        Ok(vec![Sql::new(sql).affecting(DatabaseObject::table(
            statement.schema.as_deref(),
            &statement.table,
        ))])
    }
}

pub struct InsertOrUpdateGenerator;

impl SqlGenerator for InsertOrUpdateGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::InsertOrUpdate(_))
            && matches!(
                database.dialect(),
                Dialect::Postgres
                    | Dialect::MySql
                    | Dialect::MariaDb
                    | Dialect::Mssql
                    | Dialect::Oracle
                    | Dialect::Db2Luw
                    | Dialect::Db2z
            )
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::InsertOrUpdate(statement) = statement {
            errors.check_required_field("tableName", !statement.table.is_empty());
            errors.check_required_field("columns", !statement.values.is_empty());
            errors.check_required_field("primaryKey", !statement.primary_key.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::InsertOrUpdate(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "insert or update generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);
        let keys: Vec<&str> = statement.primary_key_columns().collect();
        let (key_values, non_key_values): (Vec<&ColumnValue>, Vec<&ColumnValue>) = statement
            .values
            .iter()
            .partition(|v| keys.contains(&v.column.as_str()));

        if key_values.is_empty() {
            return Err(GenerateError::Unexpected(format!(
                "none of the primary key columns ({}) have values",
                statement.primary_key
            )));
        }

        if statement.only_update {
            let mut sql = format!("UPDATE {table} SET {}", set_list_refs(&non_key_values, database));
            sql.push_str(" WHERE ");
            sql.push_str(&key_predicate(&key_values, database, None));
            return Ok(vec![Sql::new(sql).affecting(DatabaseObject::table(
                statement.schema.as_deref(),
                &statement.table,
            ))]);
        }

        let sql = match dialect {
            Dialect::Postgres => {
                let mut sql = format!(
                    "INSERT INTO {table} ({}) VALUES ({}) ON CONFLICT ({})",
                    column_list(&statement.values, database),
                    value_list(&statement.values, database),
                    database.escape_column_list(
                        &keys.iter().map(|k| (*k).to_string()).collect::<Vec<_>>()
                    ),
                );
                if non_key_values.is_empty() {
                    sql.push_str(" DO NOTHING");
                } else {
                    let updates = non_key_values
                        .iter()
                        .map(|v| {
                            let column = database.escape_column_name(&v.column);
                            format!("{column} = EXCLUDED.{column}")
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    sql.push_str(&format!(" DO UPDATE SET {updates}"));
                }
                sql
            }
            Dialect::MySql | Dialect::MariaDb => {
                if non_key_values.is_empty() {
                    format!(
                        "INSERT IGNORE INTO {table} ({}) VALUES ({})",
                        column_list(&statement.values, database),
                        value_list(&statement.values, database),
                    )
                } else {
                    let updates = non_key_values
                        .iter()
                        .map(|v| {
                            let column = database.escape_column_name(&v.column);
                            format!("{column} = VALUES({column})")
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!(
                        "INSERT INTO {table} ({}) VALUES ({}) ON DUPLICATE KEY UPDATE {updates}",
                        column_list(&statement.values, database),
                        value_list(&statement.values, database),
                    )
                }
            }
            Dialect::Mssql | Dialect::Oracle | Dialect::Db2Luw | Dialect::Db2z => {
                let source = match dialect {
                    Dialect::Oracle => "dual",
                    Dialect::Db2Luw | Dialect::Db2z => "SYSIBM.SYSDUMMY1",
                    _ => "(SELECT 1 AS one) src",
                };
                let mut sql = format!(
                    "MERGE INTO {table} USING {source} ON ({})",
                    key_predicate(&key_values, database, Some(&table)),
                );
                if !non_key_values.is_empty() {
                    sql.push_str(&format!(
                        " WHEN MATCHED THEN UPDATE SET {}",
                        set_list_refs(&non_key_values, database)
                    ));
                }
                sql.push_str(&format!(
                    " WHEN NOT MATCHED THEN INSERT ({}) VALUES ({})",
                    column_list(&statement.values, database),
                    value_list(&statement.values, database),
                ));
                sql
            }
            _ => {
                return Err(GenerateError::not_supported(
                    &SqlStatement::InsertOrUpdate(statement.clone()),
                    database,
                    "no upsert form is known for this dialect",
                ))
            }
        };

        Ok(vec![Sql::new(sql).affecting(DatabaseObject::table(
            statement.schema.as_deref(),
            &statement.table,
        ))])
    }
}

pub struct RawSqlGenerator;

impl SqlGenerator for RawSqlGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::RawSql(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::RawSql(statement) = statement {
            errors.check_required_field("sql", !statement.sql.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::RawSql(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "raw sql generator invoked for a different statement".to_string(),
            ));
        };
        Ok(vec![
            Sql::new(statement.sql.clone()).with_delimiter(statement.end_delimiter.clone())
        ])
    }
}

pub struct TableRowCountGenerator;

impl SqlGenerator for TableRowCountGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::TableRowCount(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::TableRowCount(statement) = statement {
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
        let SqlStatement::TableRowCount(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "table row count generator invoked for a different statement".to_string(),
            ));
        };
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);
        Ok(vec![Sql::new(format!("SELECT COUNT(*) FROM {table}"))])
    }
}

pub struct TableIsEmptyGenerator;

impl SqlGenerator for TableIsEmptyGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::TableIsEmpty(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::TableIsEmpty(statement) = statement {
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
        let SqlStatement::TableIsEmpty(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "table is empty generator invoked for a different statement".to_string(),
            ));
        };
        let table = database.escape_table_name(statement.schema.as_deref(), &statement.table);

        // Probe at most one row; full counts can be expensive.
        let sql = match database.dialect() {
            Dialect::Mssql | Dialect::Sybase | Dialect::SybaseAnywhere => {
                format!("SELECT COUNT(*) FROM (SELECT TOP 1 1 AS one FROM {table}) x")
            }
            Dialect::Oracle => format!("SELECT COUNT(*) FROM {table} WHERE ROWNUM = 1"),
            Dialect::Informix => {
                format!("SELECT COUNT(*) FROM (SELECT FIRST 1 1 AS one FROM {table}) x")
            }
            Dialect::Db2Luw | Dialect::Db2z | Dialect::Derby | Dialect::Firebird => format!(
                "SELECT COUNT(*) FROM (SELECT 1 AS one FROM {table} FETCH FIRST 1 ROWS ONLY) x"
            ),
            _ => format!("SELECT COUNT(*) FROM (SELECT 1 AS one FROM {table} LIMIT 1) x"),
        };
        Ok(vec![Sql::new(sql)])
    }
}

fn column_list(values: &[ColumnValue], database: &Database) -> String {
    values
        .iter()
        .map(|v| database.escape_column_name(&v.column))
        .collect::<Vec<_>>()
        .join(", ")
}

fn value_list(values: &[ColumnValue], database: &Database) -> String {
    values
        .iter()
        .map(|v| v.value.to_sql(database.dialect()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn set_list(values: &[ColumnValue], database: &Database) -> String {
    values
        .iter()
        .map(|v| {
            format!(
                "{} = {}",
                database.escape_column_name(&v.column),
                v.value.to_sql(database.dialect())
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn set_list_refs(values: &[&ColumnValue], database: &Database) -> String {
    values
        .iter()
        .map(|v| {
            format!(
                "{} = {}",
                database.escape_column_name(&v.column),
                v.value.to_sql(database.dialect())
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_predicate(
    key_values: &[&ColumnValue],
    database: &Database,
    qualifier: Option<&str>,
) -> String {
    key_values
        .iter()
        .map(|v| {
            let column = database.escape_column_name(&v.column);
            let column = match qualifier {
                Some(q) => format!("{q}.{column}"),
                None => column,
            };
            format!("{column} = {}", v.value.to_sql(database.dialect()))
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Replaces each `?` in a WHERE clause with the matching parameter
/// rendered as a dialect literal. A parameter-count mismatch is a
/// programming error, not a dialect condition.
fn substitute_placeholders(
    clause: &str,
    parameters: &[strata_core::LiteralValue],
    database: &Database,
) -> Result<String> {
    let mut out = String::with_capacity(clause.len());
    let mut params = parameters.iter();
    for c in clause.chars() {
        if c == '?' {
            let value = params.next().ok_or_else(|| {
                GenerateError::Unexpected(format!(
                    "where clause '{clause}' has more placeholders than parameters"
                ))
            })?;
            out.push_str(&value.to_sql(database.dialect()));
        } else {
            out.push(c);
        }
    }
    if params.next().is_some() {
        return Err(GenerateError::Unexpected(format!(
            "where clause '{clause}' has fewer placeholders than parameters"
        )));
    }
    Ok(out)
}
