//! Column renaming across dialects and server versions.

use strata_core::statement::RenameColumnStatement;
use strata_core::{Database, DataType, Dialect, SqlStatement};
use strata_sqlgen::{GenerateError, GeneratorRegistry};

fn rename() -> RenameColumnStatement {
    RenameColumnStatement::new("person", "old_name", "new_name")
        .with_column_data_type(DataType::Varchar(Some(50)))
}

#[test]
fn mssql_uses_sp_rename() {
    let registry = GeneratorRegistry::with_builtins();
    let database = Database::new(Dialect::Mssql);
    let sql = registry
        .generate_sql(&rename().into(), &database)
        .unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "exec sp_rename 'person.old_name', 'new_name', 'COLUMN'"
    );
}

#[test]
fn ansi_rename_on_postgres_and_oracle() {
    let registry = GeneratorRegistry::with_builtins();
    for dialect in [Dialect::Postgres, Dialect::Oracle, Dialect::Db2Luw] {
        let database = Database::new(dialect);
        let sql = registry
            .generate_sql(&rename().into(), &database)
            .unwrap();
        assert_eq!(
            sql[0].to_sql(),
            "ALTER TABLE person RENAME COLUMN old_name TO new_name",
            "{}",
            dialect.name()
        );
    }
}

#[test]
fn mysql_quotes_awkward_new_name() {
    let registry = GeneratorRegistry::with_builtins();
    let database = Database::new(Dialect::MySql).with_version(8, 0);
    let statement: SqlStatement = RenameColumnStatement::new("person", "old_name", "new name")
        .with_column_data_type(DataType::Varchar(Some(50)))
        .into();

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person RENAME COLUMN old_name TO `new name`"
    );
}

#[test]
fn mysql_picks_form_by_server_version() {
    let registry = GeneratorRegistry::with_builtins();

    let database = Database::new(Dialect::MySql).with_version(8, 0);
    let sql = registry
        .generate_sql(&rename().into(), &database)
        .unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person RENAME COLUMN old_name TO new_name"
    );

    // Pre-8 and unknown versions restate the type with CHANGE.
    for database in [
        Database::new(Dialect::MySql).with_version(5, 7),
        Database::new(Dialect::MySql),
    ] {
        let sql = registry
            .generate_sql(&rename().into(), &database)
            .unwrap();
        assert_eq!(
            sql[0].to_sql(),
            "ALTER TABLE person CHANGE old_name new_name VARCHAR(50)"
        );
    }
}

#[test]
fn mariadb_rename_keyword_gate() {
    let registry = GeneratorRegistry::with_builtins();

    let database = Database::new(Dialect::MariaDb).with_version(10, 6);
    let sql = registry
        .generate_sql(&rename().into(), &database)
        .unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person RENAME COLUMN old_name TO new_name"
    );

    let database = Database::new(Dialect::MariaDb).with_version(10, 3);
    let sql = registry
        .generate_sql(&rename().into(), &database)
        .unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person CHANGE old_name new_name VARCHAR(50)"
    );
}

#[test]
fn mysql_requires_column_data_type() {
    let registry = GeneratorRegistry::with_builtins();
    let database = Database::new(Dialect::MySql);
    let statement: SqlStatement =
        RenameColumnStatement::new("person", "old_name", "new_name").into();
    assert!(matches!(
        registry.generate_sql(&statement, &database),
        Err(GenerateError::Validation(_))
    ));
}

#[test]
fn sqlite_rename_needs_modern_version() {
    let registry = GeneratorRegistry::with_builtins();
    let statement: SqlStatement =
        RenameColumnStatement::new("person", "old_name", "new_name").into();

    for database in [
        Database::new(Dialect::Sqlite).with_version(3, 20),
        Database::new(Dialect::Sqlite),
    ] {
        assert!(matches!(
            registry.generate_sql(&statement, &database),
            Err(GenerateError::NotSupported { .. })
        ));
    }

    let database = Database::new(Dialect::Sqlite).with_version(3, 30);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "ALTER TABLE person RENAME COLUMN old_name TO new_name"
    );
}
