//! Column addition across dialects.

use strata_core::statement::{
    AddColumnStatement, ColumnForeignKey, ForeignKeyReference,
};
use strata_core::{Database, DataType, Dialect, LiteralValue, SqlStatement};
use strata_sqlgen::{GenerateError, GeneratorRegistry};

fn registry() -> GeneratorRegistry {
    GeneratorRegistry::with_builtins()
}

#[test]
fn primary_key_column_rejected_where_unsupported() {
    let registry = registry();
    let statement: SqlStatement = AddColumnStatement::new("person", "id", DataType::Integer)
        .primary_key()
        .into();

    for database in [
        Database::new(Dialect::Derby),
        Database::new(Dialect::Db2Luw),
        Database::new(Dialect::Sqlite),
        Database::new(Dialect::H2).with_version(1, 4),
    ] {
        let result = registry.generate_sql(&statement, &database);
        let Err(GenerateError::Validation(errors)) = result else {
            panic!("expected validation failure on {}", database.dialect().name());
        };
        assert!(errors
            .error_messages()
            .iter()
            .any(|m| m.contains("Cannot add a primary key column")));
    }
}

#[test]
fn primary_key_column_allowed_on_modern_h2() {
    let registry = registry();
    let statement: SqlStatement = AddColumnStatement::new("person", "id", DataType::Integer)
        .primary_key()
        .into();
    let database = Database::new(Dialect::H2).with_version(2, 1);
    assert!(registry.generate_sql(&statement, &database).is_ok());
}

#[test]
fn mysql_merges_multiple_columns_into_one_alter() {
    let registry = registry();
    let statement: SqlStatement = AddColumnStatement::multiple(vec![
        AddColumnStatement::new("person", "name", DataType::Varchar(Some(50))),
        AddColumnStatement::new("person", "age", DataType::Integer),
        AddColumnStatement::new("person", "active", DataType::Boolean),
    ])
    .into();

    let database = Database::new(Dialect::MySql);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql.len(), 1);
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person ADD name VARCHAR(50) NULL, ADD age INTEGER NULL, ADD active BOOLEAN NULL"
    );
    assert_eq!(sql[0].affected_objects().len(), 3);

    let database = Database::new(Dialect::Postgres);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql.len(), 3);
    assert_eq!(sql[0].to_sql(), "ALTER TABLE person ADD name VARCHAR(50)");
    assert_eq!(sql[1].to_sql(), "ALTER TABLE person ADD age INTEGER");
    assert_eq!(sql[2].to_sql(), "ALTER TABLE person ADD active BOOLEAN");
}

#[test]
fn mssql_default_gets_named_constraint() {
    let registry = registry();
    let statement: SqlStatement = AddColumnStatement::new("person", "active", DataType::Boolean)
        .with_default_value(LiteralValue::Boolean(true))
        .into();
    let database = Database::new(Dialect::Mssql);

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person ADD active BIT CONSTRAINT DF_person_active DEFAULT 1"
    );
}

#[test]
fn inline_foreign_key_becomes_trailing_statement() {
    let registry = registry();
    let statement: SqlStatement =
        AddColumnStatement::new("person", "address_id", DataType::Integer)
            .with_foreign_key(ColumnForeignKey {
                name: "fk_person_address".to_string(),
                reference: ForeignKeyReference::Expression("address(id)".to_string()),
                delete_cascade: false,
                validate: true,
            })
            .into();
    let database = Database::new(Dialect::Postgres);

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql.len(), 2);
    assert_eq!(sql[0].to_sql(), "ALTER TABLE person ADD address_id INTEGER");
    assert_eq!(
        sql[1].to_sql(),
        "ALTER TABLE person ADD CONSTRAINT fk_person_address FOREIGN KEY (address_id) REFERENCES address (id)"
    );
}

#[test]
fn unparseable_foreign_key_reference_fails() {
    let registry = registry();
    let statement: SqlStatement =
        AddColumnStatement::new("person", "address_id", DataType::Integer)
            .with_foreign_key(ColumnForeignKey {
                name: "fk_person_address".to_string(),
                reference: ForeignKeyReference::Expression("not a reference".to_string()),
                delete_cascade: false,
                validate: true,
            })
            .into();
    let database = Database::new(Dialect::Postgres);

    assert!(matches!(
        registry.generate_sql(&statement, &database),
        Err(GenerateError::Unexpected(_))
    ));
}

#[test]
fn after_column_rejected_outside_mysql_and_h2() {
    let registry = registry();
    let statement: SqlStatement = AddColumnStatement::new("person", "age", DataType::Integer)
        .after_column("name")
        .into();

    let database = Database::new(Dialect::Postgres);
    assert!(matches!(
        registry.generate_sql(&statement, &database),
        Err(GenerateError::Validation(_))
    ));

    let database = Database::new(Dialect::MySql);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person ADD age INTEGER NULL AFTER name"
    );
}
