//! Sequence DDL across dialects.

use strata_core::statement::{
    AlterSequenceStatement, CreateSequenceStatement, DropSequenceStatement,
};
use strata_core::{Database, Dialect, SqlStatement};
use strata_sqlgen::{GenerateError, GeneratorRegistry};

fn registry() -> GeneratorRegistry {
    GeneratorRegistry::with_builtins()
}

#[test]
fn firebird_accumulates_all_disallowed_fields() {
    let registry = registry();
    let statement: SqlStatement = CreateSequenceStatement::new("seq_person")
        .min_value(1)
        .max_value(1000)
        .into();
    let database = Database::new(Dialect::Firebird);

    let Err(GenerateError::Validation(errors)) = registry.generate_sql(&statement, &database)
    else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.error_messages().len(), 2);
    assert!(errors
        .error_messages()
        .iter()
        .any(|m| m.contains("minValue")));
    assert!(errors
        .error_messages()
        .iter()
        .any(|m| m.contains("maxValue")));
}

#[test]
fn postgres_if_not_exists_needs_known_version() {
    let registry = registry();
    let statement: SqlStatement = CreateSequenceStatement::new("seq_person").into();

    let database = Database::new(Dialect::Postgres).with_version(9, 6);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql[0].to_sql(), "CREATE SEQUENCE IF NOT EXISTS seq_person");

    // Unknown server version: leave the guard clause out.
    let database = Database::new(Dialect::Postgres);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql[0].to_sql(), "CREATE SEQUENCE seq_person");
}

#[test]
fn create_sequence_clause_order() {
    let registry = registry();
    let statement: SqlStatement = CreateSequenceStatement::new("seq_person")
        .start_value(10)
        .increment_by(5)
        .min_value(1)
        .max_value(100_000)
        .cycle(true)
        .into();
    let database = Database::new(Dialect::Oracle);

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "CREATE SEQUENCE seq_person START WITH 10 INCREMENT BY 5 MINVALUE 1 MAXVALUE 100000 CYCLE"
    );
}

#[test]
fn zero_cache_renders_per_dialect() {
    let registry = registry();
    let statement: SqlStatement = CreateSequenceStatement::new("seq_person")
        .cache_size(0)
        .into();

    let database = Database::new(Dialect::Oracle);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql[0].to_sql(), "CREATE SEQUENCE seq_person NOCACHE");

    let database = Database::new(Dialect::Db2Luw);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql[0].to_sql(), "CREATE SEQUENCE seq_person NO CACHE");

    let database = Database::new(Dialect::Postgres);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql[0].to_sql(), "CREATE SEQUENCE seq_person CACHE 1");
}

#[test]
fn alter_sequence_no_cycle() {
    let registry = registry();
    let statement: SqlStatement = AlterSequenceStatement::new("seq_person").cycle(false).into();
    let database = Database::new(Dialect::Postgres);

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql[0].to_sql(), "ALTER SEQUENCE seq_person NO CYCLE");
}

#[test]
fn derby_drop_appends_restrict() {
    let registry = registry();
    let statement: SqlStatement = DropSequenceStatement::new("seq_person").into();

    let database = Database::new(Dialect::Derby);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql[0].to_sql(), "DROP SEQUENCE seq_person RESTRICT");

    let database = Database::new(Dialect::Postgres);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql[0].to_sql(), "DROP SEQUENCE seq_person");
}
