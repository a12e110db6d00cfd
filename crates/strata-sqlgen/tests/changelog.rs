//! History table bookkeeping: row writes, tagging, quoting restoration.

use strata_core::changeset::{ChangeSet, ExecType};
use strata_core::statement::{MarkChangeSetRanStatement, TagDatabaseStatement};
use strata_core::{Database, Dialect, ObjectQuotingStrategy, SqlStatement};
use strata_sqlgen::generators::MarkChangeSetRanGenerator;
use strata_sqlgen::{GenerateError, GeneratorRegistry};

fn change_set() -> ChangeSet {
    ChangeSet::new("1", "alice", "db/changelog.xml")
        .with_description("addColumn tableName=person")
        .with_comments("adds the age column")
        .with_checksum("8:d41d8cd98f00b204e9800998ecf8427e")
        .with_contexts(vec!["prod".to_string()])
        .with_labels(vec!["v1".to_string()])
}

fn mark_ran(exec_type: ExecType) -> SqlStatement {
    MarkChangeSetRanStatement::new(change_set(), exec_type, 1, "9181818463").into()
}

#[test]
fn insert_contains_identifying_columns() {
    let registry = GeneratorRegistry::with_builtins();
    let database = Database::new(Dialect::Postgres);

    let sql = registry
        .generate_sql(&mark_ran(ExecType::Executed), &database)
        .unwrap();
    assert_eq!(sql.len(), 1);
    let text = sql[0].to_sql();
    assert!(text.starts_with("INSERT INTO DATABASECHANGELOG"));
    assert!(text.contains("'1'"));
    assert!(text.contains("'alice'"));
    assert!(text.contains("'db/changelog.xml'"));
    assert!(text.contains("NOW()"));
    assert!(text.contains("'EXECUTED'"));
    assert!(text.contains("'9181818463'"));
}

#[test]
fn rerun_updates_by_identifying_triple() {
    let registry = GeneratorRegistry::with_builtins();
    let database = Database::new(Dialect::Postgres);

    let sql = registry
        .generate_sql(&mark_ran(ExecType::Reran), &database)
        .unwrap();
    let text = sql[0].to_sql();
    assert!(text.starts_with("UPDATE DATABASECHANGELOG SET"));
    assert!(
        text.contains("WHERE ID = '1' AND AUTHOR = 'alice' AND FILENAME = 'db/changelog.xml'")
    );
}

#[test]
fn multibyte_comments_are_truncated_not_split() {
    let registry = GeneratorRegistry::with_builtins();
    let database = Database::new(Dialect::Postgres);

    let change_set = ChangeSet::new("1", "alice", "db/changelog.xml")
        .with_comments("é".repeat(300));
    let statement: SqlStatement =
        MarkChangeSetRanStatement::new(change_set, ExecType::Executed, 1, "9181818463").into();

    let sql = registry.generate_sql(&statement, &database).unwrap();
    let text = sql[0].to_sql();
    assert!(text.contains(&format!("'{}...'", "é".repeat(247))));
}

#[test]
fn failed_and_skipped_write_nothing() {
    let registry = GeneratorRegistry::with_builtins();
    let database = Database::new(Dialect::Postgres);

    for exec_type in [ExecType::Failed, ExecType::Skipped] {
        let sql = registry.generate_sql(&mark_ran(exec_type), &database).unwrap();
        assert!(sql.is_empty());
    }
}

#[test]
fn quoting_strategy_restored_after_generation() {
    let registry = GeneratorRegistry::with_builtins();
    let database = Database::new(Dialect::Postgres);
    database.set_quoting_strategy(ObjectQuotingStrategy::QuoteAllObjects);

    let sql = registry
        .generate_sql(&mark_ran(ExecType::Executed), &database)
        .unwrap();
    // The history table has fixed identifiers; the forced legacy strategy
    // leaves them unquoted even though the caller quotes everything.
    assert!(sql[0].to_sql().starts_with("INSERT INTO DATABASECHANGELOG"));
    assert_eq!(
        database.quoting_strategy(),
        ObjectQuotingStrategy::QuoteAllObjects
    );
}

#[test]
fn quoting_strategy_restored_on_error() {
    // A registry without row generators makes the inner dispatch fail
    // after the quoting strategy was already switched.
    let mut registry = GeneratorRegistry::new();
    registry.register(Box::new(MarkChangeSetRanGenerator));
    let database = Database::new(Dialect::Postgres);
    database.set_quoting_strategy(ObjectQuotingStrategy::QuoteAllObjects);

    let result = registry.generate_sql(&mark_ran(ExecType::Executed), &database);
    assert!(matches!(result, Err(GenerateError::NotSupported { .. })));
    assert_eq!(
        database.quoting_strategy(),
        ObjectQuotingStrategy::QuoteAllObjects
    );
}

#[test]
fn tag_updates_newest_row() {
    let registry = GeneratorRegistry::with_builtins();
    let statement: SqlStatement = TagDatabaseStatement::new("v1.2").into();

    let database = Database::new(Dialect::Postgres);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(
        sql[0].to_sql(),
        "UPDATE DATABASECHANGELOG SET TAG = 'v1.2' WHERE DATEEXECUTED = \
         (SELECT MAX(DATEEXECUTED) FROM DATABASECHANGELOG)"
    );

    // MySQL needs the derived-table wrap around the self-referencing
    // subselect.
    let database = Database::new(Dialect::MySql);
    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert!(sql[0].to_sql().contains("FROM (SELECT DATEEXECUTED FROM DATABASECHANGELOG) AS X"));
}

#[test]
fn unique_tag_clears_previous_rows_first() {
    let registry = GeneratorRegistry::with_builtins();
    let statement: SqlStatement = TagDatabaseStatement::new("v1.2").keep_unique().into();
    let database = Database::new(Dialect::Postgres);

    let sql = registry.generate_sql(&statement, &database).unwrap();
    assert_eq!(sql.len(), 2);
    assert_eq!(
        sql[0].to_sql(),
        "UPDATE DATABASECHANGELOG SET TAG = NULL WHERE TAG = 'v1.2'"
    );
    assert!(sql[1].to_sql().starts_with("UPDATE DATABASECHANGELOG SET TAG = 'v1.2'"));
}
