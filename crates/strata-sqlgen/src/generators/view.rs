//! View creation, dropping, renaming and comments.

use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

/// Dialects where CREATE OR REPLACE VIEW is not available and the view
/// has to be dropped first.
fn needs_drop_before_replace(dialect: Dialect) -> bool {
    matches!(
        dialect,
        Dialect::Derby | Dialect::Sqlite | Dialect::Sybase | Dialect::Firebird | Dialect::Hsqldb
    )
}

pub struct CreateViewGenerator;

impl SqlGenerator for CreateViewGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::CreateView(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::CreateView(statement) = statement {
            errors.check_required_field("viewName", !statement.view_name.is_empty());
            errors.check_required_field("selectQuery", !statement.select_query.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::CreateView(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "create view generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let view = database.escape_view_name(schema, &statement.view_name);
        let affected = DatabaseObject::view(schema, &statement.view_name);

        if statement.full_definition {
            // User supplied the whole CREATE VIEW statement; pass it through.
            return Ok(vec![
                Sql::new(statement.select_query.clone()).affecting(affected)
            ]);
        }

        let dialect = database.dialect();
        let mut out = Vec::new();
        let create = if !statement.replace_if_exists {
            format!("CREATE VIEW {view} AS {}", statement.select_query)
        } else if dialect == Dialect::Mssql {
            format!("CREATE OR ALTER VIEW {view} AS {}", statement.select_query)
        } else if needs_drop_before_replace(dialect) {
            out.push(Sql::new(format!("DROP VIEW {view}")));
            format!("CREATE VIEW {view} AS {}", statement.select_query)
        } else {
            format!("CREATE OR REPLACE VIEW {view} AS {}", statement.select_query)
        };
        out.push(Sql::new(create).affecting(affected));
        Ok(out)
    }
}

pub struct DropViewGenerator;

impl SqlGenerator for DropViewGenerator {
    fn supports(&self, statement: &SqlStatement, _database: &Database) -> bool {
        matches!(statement, SqlStatement::DropView(_))
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::DropView(statement) = statement {
            errors.check_required_field("viewName", !statement.view_name.is_empty());
            if statement.if_exists && !supports_if_exists(database.dialect()) {
                errors.add_error(format!(
                    "ifExists is not allowed on {}",
                    database.dialect().name()
                ));
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
        let SqlStatement::DropView(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "drop view generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let view = database.escape_view_name(schema, &statement.view_name);
        let sql = if statement.if_exists {
            format!("DROP VIEW IF EXISTS {view}")
        } else {
            format!("DROP VIEW {view}")
        };
        Ok(vec![
            Sql::new(sql).affecting(DatabaseObject::view(schema, &statement.view_name))
        ])
    }
}

fn supports_if_exists(dialect: Dialect) -> bool {
    matches!(
        dialect,
        Dialect::Postgres
            | Dialect::MySql
            | Dialect::MariaDb
            | Dialect::H2
            | Dialect::Hsqldb
            | Dialect::Sqlite
            | Dialect::Mssql
            | Dialect::Informix
    )
}

pub struct RenameViewGenerator;

impl SqlGenerator for RenameViewGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::RenameView(_))
            && matches!(
                database.dialect(),
                Dialect::Postgres
                    | Dialect::MySql
                    | Dialect::MariaDb
                    | Dialect::Oracle
                    | Dialect::Mssql
                    | Dialect::Sybase
            )
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::RenameView(statement) = statement {
            errors.check_required_field("oldViewName", !statement.old_view.is_empty());
            errors.check_required_field("newViewName", !statement.new_view.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::RenameView(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "rename view generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let old = database.escape_view_name(schema, &statement.old_view);
        let new = database.escape_object_name(&statement.new_view);

        let sql = match database.dialect() {
            Dialect::Mssql | Dialect::Sybase => {
                format!("exec sp_rename '{old}', '{}'", statement.new_view)
            }
            // MySQL renames views through the table namespace.
            d if d.is_mysql_family() => format!("RENAME TABLE {old} TO {new}"),
            Dialect::Oracle => format!("RENAME {old} TO {new}"),
            _ => format!("ALTER VIEW {old} RENAME TO {new}"),
        };
        Ok(vec![Sql::new(sql)
            .affecting(DatabaseObject::view(schema, &statement.old_view))
            .affecting(DatabaseObject::view(schema, &statement.new_view))])
    }
}

pub struct SetViewRemarksGenerator;

impl SqlGenerator for SetViewRemarksGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::SetViewRemarks(_))
            && matches!(
                database.dialect(),
                Dialect::Postgres | Dialect::Oracle | Dialect::Mssql
            )
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::SetViewRemarks(statement) = statement {
            errors.check_required_field("viewName", !statement.view_name.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::SetViewRemarks(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "set view remarks generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let view = database.escape_view_name(schema, &statement.view_name);
        let remarks = database.escape_string_literal(&statement.remarks);

        let sql = match database.dialect() {
            // Oracle has no COMMENT ON VIEW; views take table comments.
            Dialect::Oracle => format!("COMMENT ON TABLE {view} IS '{remarks}'"),
            Dialect::Mssql => super::table::extended_property_sql(
                database,
                statement.schema.as_deref(),
                &statement.view_name,
                None,
                &statement.remarks,
            ),
            _ => format!("COMMENT ON VIEW {view} IS '{remarks}'"),
        };
        Ok(vec![
            Sql::new(sql).affecting(DatabaseObject::view(schema, &statement.view_name))
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::GeneratorRegistry;
    use strata_core::statement::{CreateViewStatement, DropViewStatement, RenameViewStatement};

    #[test]
    fn test_create_or_replace_forms() {
        let registry = GeneratorRegistry::with_builtins();
        let statement: SqlStatement =
            CreateViewStatement::new("v_person", "SELECT id FROM person")
                .replace_if_exists()
                .into();

        let database = Database::new(Dialect::Postgres);
        let sql = registry.generate_sql(&statement, &database).unwrap();
        assert_eq!(
            sql[0].to_sql(),
            "CREATE OR REPLACE VIEW v_person AS SELECT id FROM person"
        );

        let database = Database::new(Dialect::Mssql);
        let sql = registry.generate_sql(&statement, &database).unwrap();
        assert_eq!(
            sql[0].to_sql(),
            "CREATE OR ALTER VIEW v_person AS SELECT id FROM person"
        );

        let database = Database::new(Dialect::Derby);
        let sql = registry.generate_sql(&statement, &database).unwrap();
        assert_eq!(sql.len(), 2);
        assert_eq!(sql[0].to_sql(), "DROP VIEW v_person");
        assert_eq!(sql[1].to_sql(), "CREATE VIEW v_person AS SELECT id FROM person");
    }

    #[test]
    fn test_drop_view_if_exists_rejected_on_oracle() {
        let registry = GeneratorRegistry::with_builtins();
        let statement: SqlStatement = DropViewStatement::new("v_person").if_exists().into();
        let database = Database::new(Dialect::Oracle);
        let result = registry.generate_sql(&statement, &database);
        assert!(matches!(result, Err(GenerateError::Validation(_))));
    }

    #[test]
    fn test_rename_view_unsupported_on_derby() {
        let registry = GeneratorRegistry::with_builtins();
        let statement: SqlStatement = RenameViewStatement::new("v_old", "v_new").into();
        let database = Database::new(Dialect::Derby);
        assert!(matches!(
            registry.generate_sql(&statement, &database),
            Err(GenerateError::NotSupported { .. })
        ));
    }
}
