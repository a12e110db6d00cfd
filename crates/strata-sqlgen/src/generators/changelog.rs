//! Generators maintaining the migration history table.

use strata_core::changeset::{limit_size, ExecType};
use strata_core::statement::{InsertStatement, UpdateStatement};
use strata_core::{
    Database, LiteralValue, ObjectQuotingStrategy, Sql, SqlStatement, ValidationErrors,
};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::{SqlGenerator, PRIORITY_DIALECT};

const MAX_DESCRIPTION_LENGTH: usize = 250;
const MAX_COMMENTS_LENGTH: usize = 250;

/// Writes a history row for an executed change set. Existing rows
/// (reruns) are updated in place instead of duplicated.
pub struct MarkChangeSetRanGenerator;

impl SqlGenerator for MarkChangeSetRanGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::MarkChangeSetRan(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::MarkChangeSetRan(statement) = statement {
            errors.check_required_field("changeSet.id", !statement.change_set.id.is_empty());
            errors.check_required_field(
                "changeSet.author",
                !statement.change_set.author.is_empty(),
            );
            errors.check_required_field(
                "changeSet.filePath",
                !statement.change_set.file_path.is_empty(),
            );
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::MarkChangeSetRan(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "mark change set ran generator invoked for a different statement".to_string(),
            ));
        };
        // The history table was created with legacy quoting; generate the
        // row statement under that strategy no matter what the caller set.
        let _guard = database.push_quoting_strategy(ObjectQuotingStrategy::Legacy);

        if matches!(statement.exec_type, ExecType::Failed | ExecType::Skipped) {
            // FAILED and SKIPPED runs leave no history row.
            return Ok(Vec::new());
        }

        let change_set = &statement.change_set;
        let checksum = change_set
            .checksum
            .clone()
            .map_or(LiteralValue::Null, LiteralValue::String);
        let executed_at =
            LiteralValue::Function(database.dialect().current_datetime_function().to_string());

        let row: SqlStatement = if statement.exec_type.ran_before() {
            let mut update = UpdateStatement::new(database.changelog_table_name())
                .set("DATEEXECUTED", executed_at)
                .set(
                    "ORDEREXECUTED",
                    LiteralValue::Integer(i64::from(statement.ordered_executed)),
                )
                .set("MD5SUM", checksum)
                .set(
                    "EXECTYPE",
                    LiteralValue::String(statement.exec_type.value().to_string()),
                )
                .set(
                    "DEPLOYMENT_ID",
                    LiteralValue::String(statement.deployment_id.clone()),
                )
                .set(
                    "COMMENTS",
                    LiteralValue::String(limit_size(&change_set.comments, MAX_COMMENTS_LENGTH)),
                )
                .set(
                    "CONTEXTS",
                    change_set
                        .contexts_column()
                        .map_or(LiteralValue::Null, LiteralValue::String),
                )
                .set(
                    "LABELS",
                    change_set
                        .labels_column()
                        .map_or(LiteralValue::Null, LiteralValue::String),
                )
                .where_clause("ID = ? AND AUTHOR = ? AND FILENAME = ?")
                .where_parameter(LiteralValue::String(change_set.id.clone()))
                .where_parameter(LiteralValue::String(change_set.author.clone()))
                .where_parameter(LiteralValue::String(change_set.file_path.clone()));
            if let Some(tag) = &change_set.tag {
                update = update.set("TAG", LiteralValue::String(tag.clone()));
            }
            if let Some(schema) = database.changelog_schema_name() {
                update = update.with_schema(schema);
            }
            update.into()
        } else {
            let mut insert = InsertStatement::new(database.changelog_table_name())
                .value("ID", LiteralValue::String(change_set.id.clone()))
                .value("AUTHOR", LiteralValue::String(change_set.author.clone()))
                .value(
                    "FILENAME",
                    LiteralValue::String(change_set.file_path.clone()),
                )
                .value("DATEEXECUTED", executed_at)
                .value(
                    "ORDEREXECUTED",
                    LiteralValue::Integer(i64::from(statement.ordered_executed)),
                )
                .value("MD5SUM", checksum)
                .value(
                    "DESCRIPTION",
                    LiteralValue::String(limit_size(
                        &change_set.description,
                        MAX_DESCRIPTION_LENGTH,
                    )),
                )
                .value(
                    "COMMENTS",
                    LiteralValue::String(limit_size(&change_set.comments, MAX_COMMENTS_LENGTH)),
                )
                .value(
                    "EXECTYPE",
                    LiteralValue::String(statement.exec_type.value().to_string()),
                )
                .value(
                    "CONTEXTS",
                    change_set
                        .contexts_column()
                        .map_or(LiteralValue::Null, LiteralValue::String),
                )
                .value(
                    "LABELS",
                    change_set
                        .labels_column()
                        .map_or(LiteralValue::Null, LiteralValue::String),
                )
                .value(
                    "DEPLOYMENT_ID",
                    LiteralValue::String(statement.deployment_id.clone()),
                );
            if let Some(tag) = &change_set.tag {
                insert = insert.value("TAG", LiteralValue::String(tag.clone()));
            }
            if let Some(schema) = database.changelog_schema_name() {
                insert = insert.with_schema(schema);
            }
            insert.into()
        };

        chain.registry().generate_sql(&row, database)
    }
}

/// Tags the newest history row with a release label.
pub struct TagDatabaseGenerator;

impl SqlGenerator for TagDatabaseGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::TagDatabase(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::TagDatabase(statement) = statement {
            errors.check_required_field("tag", !statement.tag.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::TagDatabase(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "tag database generator invoked for a different statement".to_string(),
            ));
        };
        let table = database.escaped_changelog_table();
        let tag = format!("'{}'", database.escape_string_literal(&statement.tag));

        // MySQL refuses a subselect on the table being updated; wrapping it
        // in a derived table forces a materialized copy.
        let newest = if database.dialect().is_mysql_family() {
            format!("(SELECT DATEEXECUTED FROM (SELECT DATEEXECUTED FROM {table}) AS X ORDER BY DATEEXECUTED DESC LIMIT 1)")
        } else {
            format!("(SELECT MAX(DATEEXECUTED) FROM {table})")
        };
        let sql = format!("UPDATE {table} SET TAG = {tag} WHERE DATEEXECUTED = {newest}");
        Ok(vec![Sql::new(sql)])
    }
}

/// Clears earlier occurrences of a tag before it is re-applied, then
/// hands generation back to [`TagDatabaseGenerator`].
pub struct TagCleanupGenerator;

impl SqlGenerator for TagCleanupGenerator {
    fn priority(&self) -> i32 {
        PRIORITY_DIALECT
    }

    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::TagDatabase(s) if s.keep_tag_unique)
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::TagDatabase(tag_statement) = statement else {
            return Err(GenerateError::Unexpected(
                "tag cleanup generator invoked for a different statement".to_string(),
            ));
        };
        let table = database.escaped_changelog_table();
        let tag = format!("'{}'", database.escape_string_literal(&tag_statement.tag));
        let cleanup = Sql::new(format!("UPDATE {table} SET TAG = NULL WHERE TAG = {tag}"));

        let mut out = vec![cleanup];
        out.extend(chain.generate(statement, database)?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::GeneratorRegistry;
    use strata_core::changeset::ChangeSet;
    use strata_core::statement::MarkChangeSetRanStatement;
    use strata_core::Dialect;

    fn mark_ran(exec_type: ExecType) -> SqlStatement {
        MarkChangeSetRanStatement::new(
            ChangeSet::new("1", "alice", "db/changelog.xml")
                .with_checksum("8:d41d8cd98f00b204e9800998ecf8427e"),
            exec_type,
            3,
            "9181818463",
        )
        .into()
    }

    #[test]
    fn test_failed_run_writes_nothing() {
        let registry = GeneratorRegistry::with_builtins();
        let database = Database::new(Dialect::Postgres);
        let sql = registry
            .generate_sql(&mark_ran(ExecType::Failed), &database)
            .unwrap();
        assert!(sql.is_empty());
    }

    #[test]
    fn test_first_run_inserts() {
        let registry = GeneratorRegistry::with_builtins();
        let database = Database::new(Dialect::Postgres);
        let sql = registry
            .generate_sql(&mark_ran(ExecType::Executed), &database)
            .unwrap();
        assert_eq!(sql.len(), 1);
        assert!(sql[0].to_sql().starts_with("INSERT INTO DATABASECHANGELOG"));
        assert!(sql[0].to_sql().contains("NOW()"));
    }

    #[test]
    fn test_rerun_updates_existing_row() {
        let registry = GeneratorRegistry::with_builtins();
        let database = Database::new(Dialect::Postgres);
        let sql = registry
            .generate_sql(&mark_ran(ExecType::Reran), &database)
            .unwrap();
        assert_eq!(sql.len(), 1);
        let text = sql[0].to_sql();
        assert!(text.starts_with("UPDATE DATABASECHANGELOG SET"));
        assert!(text.contains("WHERE ID = '1' AND AUTHOR = 'alice' AND FILENAME = 'db/changelog.xml'"));
    }

    #[test]
    fn test_tag_cleanup_prepends_null_update() {
        let registry = GeneratorRegistry::with_builtins();
        let database = Database::new(Dialect::Postgres);
        let statement: SqlStatement =
            strata_core::statement::TagDatabaseStatement::new("v1.2").keep_unique().into();
        let sql = registry.generate_sql(&statement, &database).unwrap();
        assert_eq!(sql.len(), 2);
        assert_eq!(
            sql[0].to_sql(),
            "UPDATE DATABASECHANGELOG SET TAG = NULL WHERE TAG = 'v1.2'"
        );
        assert!(sql[1].to_sql().starts_with("UPDATE DATABASECHANGELOG SET TAG = 'v1.2'"));
    }
}
