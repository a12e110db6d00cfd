//! Column default management across dialects.

use strata_core::statement::{AddDefaultValueStatement, DropDefaultValueStatement};
use strata_core::{Database, Dialect, LiteralValue, SqlStatement};
use strata_sqlgen::GeneratorRegistry;

#[test]
fn integer_default_forms() {
    let registry = GeneratorRegistry::with_builtins();
    let statement: SqlStatement =
        AddDefaultValueStatement::new("person", "age", LiteralValue::Integer(42)).into();

    let cases = [
        (
            Dialect::Postgres,
            "ALTER TABLE person ALTER COLUMN age SET DEFAULT 42",
        ),
        (
            Dialect::MySql,
            "ALTER TABLE person ALTER age SET DEFAULT 42",
        ),
        (
            Dialect::Oracle,
            "ALTER TABLE person MODIFY age DEFAULT 42",
        ),
        (
            Dialect::Derby,
            "ALTER TABLE person ALTER COLUMN age WITH DEFAULT 42",
        ),
        (
            Dialect::Db2Luw,
            "ALTER TABLE person ALTER COLUMN age SET WITH DEFAULT 42",
        ),
        (
            Dialect::Sybase,
            "ALTER TABLE person REPLACE age DEFAULT 42",
        ),
    ];
    for (dialect, expected) in cases {
        let database = Database::new(dialect);
        let sql = registry.generate_sql(&statement, &database).unwrap();
        assert_eq!(sql[0].to_sql(), expected, "{}", dialect.name());
    }
}

#[test]
fn string_default_is_quoted_and_escaped() {
    let registry = GeneratorRegistry::with_builtins();
    let statement: SqlStatement = AddDefaultValueStatement::new(
        "person",
        "nickname",
        LiteralValue::String("O'Brien".to_string()),
    )
    .into();
    let database = Database::new(Dialect::Postgres);

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person ALTER COLUMN nickname SET DEFAULT 'O''Brien'"
    );
}

#[test]
fn boolean_default_renders_numeric_where_needed() {
    let registry = GeneratorRegistry::with_builtins();
    let statement: SqlStatement =
        AddDefaultValueStatement::new("person", "active", LiteralValue::Boolean(false)).into();

    let database = Database::new(Dialect::Postgres);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert!(sql[0].to_sql().ends_with("DEFAULT FALSE"));

    let database = Database::new(Dialect::Oracle);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert!(sql[0].to_sql().ends_with("DEFAULT 0"));
}

#[test]
fn mssql_drop_uses_generated_constraint_name() {
    let registry = GeneratorRegistry::with_builtins();
    let statement: SqlStatement = DropDefaultValueStatement::new("person", "age").into();
    let database = Database::new(Dialect::Mssql);

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person DROP CONSTRAINT DF_person_age"
    );
}

#[test]
fn generic_drop_default() {
    let registry = GeneratorRegistry::with_builtins();
    let statement: SqlStatement = DropDefaultValueStatement::new("person", "age").into();
    let database = Database::new(Dialect::Postgres);

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person ALTER COLUMN age DROP DEFAULT"
    );
}
