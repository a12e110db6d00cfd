//! ALTER TABLE ... ADD column generation.

use std::sync::LazyLock;

use regex::Regex;

use strata_core::statement::{
    AddColumnStatement, AddForeignKeyConstraintStatement, AddUniqueConstraintStatement,
    ForeignKeyAction, ForeignKeyReference,
};
use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

// A `table(column)` reference, optionally schema-qualified.
static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w\._]+)\s*\(\s*([\w_]+)\s*\)$").unwrap());

pub struct AddColumnGenerator;

impl SqlGenerator for AddColumnGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::AddColumn(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let SqlStatement::AddColumn(statement) = statement else {
            return ValidationErrors::new();
        };

        if statement.is_multiple() {
            let mut errors = ValidationErrors::new();
            let first_table = statement.columns.first().map(|c| c.table.clone());
            for column in &statement.columns {
                errors.add_all(validate_single_column(column, database));
                if first_table.as_deref().is_some_and(|t| t != column.table) {
                    errors.add_error("All columns must be targeted at the same table");
                }
                if column.is_multiple() {
                    errors.add_error("Nested multiple add column statements are not supported");
                }
            }
            errors
        } else {
            validate_single_column(statement, database)
        }
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::AddColumn(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "add column generator invoked for a different statement".to_string(),
            ));
        };

        if statement.is_multiple() {
            generate_multiple_columns(&statement.columns, database, chain)
        } else {
            generate_single_column(statement, database, chain)
        }
    }
}

fn validate_single_column(statement: &AddColumnStatement, database: &Database) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let dialect = database.dialect();

    errors.check_required_field("columnName", !statement.column.is_empty());
    if !statement.computed {
        errors.check_required_field("columnType", statement.column_type.is_some());
    }
    errors.check_required_field("tableName", !statement.table.is_empty());

    let h2_pre_2 = dialect == Dialect::H2 && database.version_at_least(2, 0) == Some(false);
    if statement.primary_key
        && (dialect.is_db2_family()
            || dialect == Dialect::Derby
            || dialect == Dialect::Sqlite
            || h2_pre_2)
    {
        errors.add_error("Cannot add a primary key column");
    }

    if dialect.is_mysql_family() && statement.auto_increment && !statement.primary_key {
        errors.add_error("Cannot add a non-primary key identity column");
    }

    if !(dialect.is_mysql_family() || dialect == Dialect::H2) {
        errors.check_disallowed_field(
            "addAfterColumn",
            statement.add_after_column.is_some(),
            database,
            &[dialect],
        );
    }
    if !matches!(dialect, Dialect::H2 | Dialect::Hsqldb) {
        errors.check_disallowed_field(
            "addBeforeColumn",
            statement.add_before_column.is_some(),
            database,
            &[dialect],
        );
    }
    // No supported dialect can add a column at an arbitrary position.
    errors.check_disallowed_field(
        "addAtPosition",
        statement.add_at_position.is_some(),
        database,
        &[dialect],
    );

    errors
}

fn generate_multiple_columns(
    columns: &[AddColumnStatement],
    database: &Database,
    chain: &mut SqlGeneratorChain<'_>,
) -> Result<Vec<Sql>> {
    let mut result = Vec::new();

    if database.dialect().is_mysql_family() {
        let Some(first) = columns.first() else {
            return Ok(result);
        };
        let mut alter_table = base_sql(first, database);
        for (i, column) in columns.iter().enumerate() {
            alter_table.push_str(&column_clause(column, database));
            if i < columns.len() - 1 {
                alter_table.push(',');
            }
        }
        result.push(
            Sql::new(alter_table)
                .affecting_all(columns.iter().map(affected_column)),
        );

        for column in columns {
            append_unique_constraint(column, database, chain, &mut result)?;
            append_foreign_key(column, database, chain, &mut result)?;
        }
    } else {
        for column in columns {
            result.extend(generate_single_column(column, database, chain)?);
        }
    }

    Ok(result)
}

fn generate_single_column(
    statement: &AddColumnStatement,
    database: &Database,
    chain: &mut SqlGeneratorChain<'_>,
) -> Result<Vec<Sql>> {
    let mut alter_table = base_sql(statement, database);
    alter_table.push_str(&column_clause(statement, database));

    let mut result = vec![Sql::new(alter_table).affecting(affected_column(statement))];

    append_unique_constraint(statement, database, chain, &mut result)?;
    append_foreign_key(statement, database, chain, &mut result)?;

    Ok(result)
}

fn base_sql(statement: &AddColumnStatement, database: &Database) -> String {
    format!(
        "ALTER TABLE {}",
        database.escape_table_name(statement.schema.as_deref(), &statement.table)
    )
}

fn column_clause(statement: &AddColumnStatement, database: &Database) -> String {
    let dialect = database.dialect();
    let column_type = statement
        .column_type
        .as_ref()
        .map(|t| t.to_database_type(dialect));

    let mut clause = format!(" ADD {}", database.escape_column_name(&statement.column));

    if let Some(column_type) = &column_type {
        clause.push(' ');
        clause.push_str(column_type);
    }

    if statement.auto_increment && dialect.supports_auto_increment() {
        let identity = dialect.auto_increment_clause(statement.start_with, statement.increment_by);
        if !identity.is_empty() {
            clause.push(' ');
            clause.push_str(&identity);
        }
    }

    clause.push_str(&default_clause(statement, database));

    if statement.nullable {
        let mssql_timestamp = dialect == Dialect::Mssql
            && column_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("timestamp"));
        if matches!(dialect, Dialect::Sybase | Dialect::SybaseAnywhere)
            || dialect.is_mysql_family()
            || mssql_timestamp
        {
            clause.push_str(" NULL");
        }
    } else {
        if let Some(name) = &statement.not_null_constraint_name {
            clause.push_str(" CONSTRAINT ");
            clause.push_str(&database.escape_constraint_name(name));
        }
        clause.push_str(" NOT NULL");
        if dialect == Dialect::Oracle && !statement.validate_nullable {
            clause.push_str(" ENABLE NOVALIDATE");
        }
    }

    if statement.primary_key {
        clause.push_str(" PRIMARY KEY");
        if dialect == Dialect::Oracle && !statement.validate_primary_key {
            clause.push_str(" ENABLE NOVALIDATE");
        }
    }

    if dialect.is_mysql_family() {
        if let Some(remarks) = &statement.remarks {
            clause.push_str(" COMMENT '");
            clause.push_str(&database.escape_string_literal(remarks.trim()));
            clause.push('\'');
        }
    }

    if let Some(before) = &statement.add_before_column {
        clause.push_str(" BEFORE ");
        clause.push_str(&database.escape_column_name(before));
    }
    if let Some(after) = &statement.add_after_column {
        clause.push_str(" AFTER ");
        clause.push_str(&database.escape_column_name(after));
    }

    clause
}

fn default_clause(statement: &AddColumnStatement, database: &Database) -> String {
    let dialect = database.dialect();
    let Some(default_value) = &statement.default_value else {
        return String::new();
    };

    let rendered = default_value.to_sql(dialect);
    // Oracle identity expressions replace the whole DEFAULT clause.
    if dialect == Dialect::Oracle && rendered.starts_with("GENERATED ALWAYS ") {
        return format!(" {rendered}");
    }

    let mut clause = String::new();
    if dialect == Dialect::Mssql {
        let constraint_name = statement.default_value_constraint_name.clone().unwrap_or_else(
            || database.generate_default_constraint_name(&statement.table, &statement.column),
        );
        clause.push_str(" CONSTRAINT ");
        clause.push_str(&constraint_name);
    }
    clause.push_str(" DEFAULT ");
    clause.push_str(&rendered);
    clause
}

fn affected_column(statement: &AddColumnStatement) -> DatabaseObject {
    DatabaseObject::column(statement.schema.as_deref(), &statement.table, &statement.column)
}

fn append_unique_constraint(
    statement: &AddColumnStatement,
    database: &Database,
    chain: &mut SqlGeneratorChain<'_>,
    result: &mut Vec<Sql>,
) -> Result<()> {
    if !statement.unique {
        return Ok(());
    }
    let mut constraint =
        AddUniqueConstraintStatement::new(statement.table.clone(), vec![statement.column.clone()]);
    if let Some(schema) = &statement.schema {
        constraint = constraint.with_schema(schema.clone());
    }
    if let Some(name) = &statement.unique_constraint_name {
        constraint = constraint.with_constraint_name(name.clone());
    }
    result.extend(
        chain
            .registry()
            .generate_sql(&constraint.into(), database)?,
    );
    Ok(())
}

fn append_foreign_key(
    statement: &AddColumnStatement,
    database: &Database,
    chain: &mut SqlGeneratorChain<'_>,
    result: &mut Vec<Sql>,
) -> Result<()> {
    let Some(foreign_key) = &statement.foreign_key else {
        return Ok(());
    };

    let (mut referenced_table, referenced_column) = match &foreign_key.reference {
        ForeignKeyReference::Expression(reference) => {
            let captures = REFERENCE_PATTERN.captures(reference).ok_or_else(|| {
                GenerateError::Unexpected(format!(
                    "don't know how to find table and column names from {reference}"
                ))
            })?;
            (captures[1].to_string(), captures[2].to_string())
        }
        ForeignKeyReference::Named { table, column } => (table.clone(), column.clone()),
    };

    let mut referenced_schema = None;
    if let Some((schema, table)) = referenced_table.split_once('.') {
        referenced_schema = Some(schema.to_string());
        referenced_table = table.to_string();
    }

    let mut fk = AddForeignKeyConstraintStatement::new(
        foreign_key.name.clone(),
        statement.table.clone(),
        vec![statement.column.clone()],
        referenced_table,
        vec![referenced_column],
    );
    if let Some(schema) = &statement.schema {
        fk = fk.with_base_schema(schema.clone());
    }
    if let Some(schema) = referenced_schema {
        fk = fk.with_referenced_schema(schema);
    }
    if foreign_key.delete_cascade {
        fk = fk.on_delete(ForeignKeyAction::Cascade);
    }
    if !foreign_key.validate {
        fk = fk.skip_validation();
    }
    result.extend(chain.registry().generate_sql(&fk.into(), database)?);
    Ok(())
}
