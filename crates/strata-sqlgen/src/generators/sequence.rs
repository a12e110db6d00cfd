//! Sequence DDL generation.
//!
//! The disallowed-field lists below are transcribed per dialect rather
//! than derived from capability flags; they encode which clauses each
//! server rejects, which does not follow any clean matrix.

use strata_core::statement::{AlterSequenceStatement, CreateSequenceStatement};
use strata_core::{Database, DatabaseObject, Dialect, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;

pub struct CreateSequenceGenerator;

impl SqlGenerator for CreateSequenceGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::CreateSequence(_))
            && database.dialect().supports_sequences()
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let SqlStatement::CreateSequence(statement) = statement else {
            return errors;
        };
        errors.check_required_field("sequenceName", !statement.sequence_name.is_empty());

        errors.check_disallowed_field(
            "incrementBy",
            statement.increment_by.is_some(),
            database,
            &[Dialect::Firebird],
        );
        errors.check_disallowed_field(
            "startValue",
            statement.start_value.is_some(),
            database,
            &[Dialect::Firebird],
        );
        errors.check_disallowed_field(
            "minValue",
            statement.min_value.is_some(),
            database,
            &[Dialect::Firebird],
        );
        errors.check_disallowed_field(
            "maxValue",
            statement.max_value.is_some(),
            database,
            &[Dialect::Firebird],
        );
        errors.check_disallowed_field(
            "ordered",
            statement.ordered.is_some(),
            database,
            &[Dialect::Mssql, Dialect::Postgres, Dialect::Firebird],
        );

        if statement.data_type.is_some() && !data_type_allowed(database) {
            errors.add_error(format!(
                "dataType is not allowed on {}",
                database.dialect()
            ));
        }
        let h2_pre_2 = database.dialect() == Dialect::H2
            && database.version_at_least(2, 0) == Some(false);
        if statement.cache_size.is_some() && (database.dialect() == Dialect::Firebird || h2_pre_2)
        {
            errors.add_error(format!(
                "cacheSize is not allowed on {}",
                database.dialect()
            ));
        }

        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::CreateSequence(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "create sequence generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let schema = statement.schema.as_deref();

        let mut sql = String::from("CREATE SEQUENCE ");
        if dialect == Dialect::Postgres && database.version_at_least(9, 5) == Some(true) {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&database.escape_sequence_name(schema, &statement.sequence_name));

        if let Some(data_type) = &statement.data_type {
            sql.push_str(" AS ");
            sql.push_str(&data_type.to_database_type(dialect));
        }
        if let Some(start) = statement.start_value {
            sql.push_str(&format!(" START WITH {start}"));
        }
        if let Some(increment) = statement.increment_by {
            sql.push_str(&format!(" INCREMENT BY {increment}"));
        }
        if let Some(min) = statement.min_value {
            sql.push_str(&format!(" MINVALUE {min}"));
        }
        if let Some(max) = statement.max_value {
            sql.push_str(&format!(" MAXVALUE {max}"));
        }
        if let Some(cache) = statement.cache_size {
            sql.push_str(&cache_clause(cache, dialect));
        }
        if statement.ordered == Some(true)
            && matches!(dialect, Dialect::Oracle | Dialect::Db2Luw | Dialect::Db2z)
        {
            sql.push_str(" ORDER");
        }
        if statement.cycle == Some(true) {
            sql.push_str(" CYCLE");
        }

        Ok(vec![Sql::new(sql)
            .affecting(DatabaseObject::sequence(schema, &statement.sequence_name))])
    }
}

pub struct AlterSequenceGenerator;

impl SqlGenerator for AlterSequenceGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::AlterSequence(_))
            && database.dialect().supports_sequences()
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let SqlStatement::AlterSequence(statement) = statement else {
            return errors;
        };
        errors.check_required_field("sequenceName", !statement.sequence_name.is_empty());

        errors.check_disallowed_field(
            "incrementBy",
            statement.increment_by.is_some(),
            database,
            &[Dialect::Firebird, Dialect::Hsqldb],
        );
        errors.check_disallowed_field(
            "minValue",
            statement.min_value.is_some(),
            database,
            &[Dialect::Firebird, Dialect::H2, Dialect::SybaseAnywhere],
        );
        errors.check_disallowed_field(
            "maxValue",
            statement.max_value.is_some(),
            database,
            &[
                Dialect::Firebird,
                Dialect::Hsqldb,
                Dialect::H2,
                Dialect::SybaseAnywhere,
            ],
        );
        errors.check_disallowed_field(
            "ordered",
            statement.ordered.is_some(),
            database,
            &[
                Dialect::Firebird,
                Dialect::Hsqldb,
                Dialect::Postgres,
                Dialect::Mssql,
            ],
        );
        if statement.data_type.is_some() && !data_type_allowed(database) {
            errors.add_error(format!(
                "dataType is not allowed on {}",
                database.dialect()
            ));
        }

        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::AlterSequence(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "alter sequence generator invoked for a different statement".to_string(),
            ));
        };
        let dialect = database.dialect();
        let schema = statement.schema.as_deref();

        let mut sql = format!(
            "ALTER SEQUENCE {}",
            database.escape_sequence_name(schema, &statement.sequence_name)
        );
        if let Some(data_type) = &statement.data_type {
            sql.push_str(" AS ");
            sql.push_str(&data_type.to_database_type(dialect));
        }
        if let Some(increment) = statement.increment_by {
            sql.push_str(&format!(" INCREMENT BY {increment}"));
        }
        if let Some(min) = statement.min_value {
            sql.push_str(&format!(" MINVALUE {min}"));
        }
        if let Some(max) = statement.max_value {
            sql.push_str(&format!(" MAXVALUE {max}"));
        }
        if let Some(cache) = statement.cache_size {
            sql.push_str(&cache_clause(cache, dialect));
        }
        if statement.ordered == Some(true)
            && matches!(dialect, Dialect::Oracle | Dialect::Db2Luw | Dialect::Db2z)
        {
            sql.push_str(" ORDER");
        }
        match statement.cycle {
            Some(true) => sql.push_str(" CYCLE"),
            Some(false) => sql.push_str(" NO CYCLE"),
            None => {}
        }

        Ok(vec![Sql::new(sql)
            .affecting(DatabaseObject::sequence(schema, &statement.sequence_name))])
    }
}

pub struct DropSequenceGenerator;

impl SqlGenerator for DropSequenceGenerator {
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        matches!(statement, SqlStatement::DropSequence(_))
            && database.dialect().supports_sequences()
    }

    fn validate(
        &self,
        statement: &SqlStatement,
        _database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let SqlStatement::DropSequence(statement) = statement {
            errors.check_required_field("sequenceName", !statement.sequence_name.is_empty());
        }
        errors
    }

    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        _chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let SqlStatement::DropSequence(statement) = statement else {
            return Err(GenerateError::Unexpected(
                "drop sequence generator invoked for a different statement".to_string(),
            ));
        };
        let schema = statement.schema.as_deref();
        let mut sql = format!(
            "DROP SEQUENCE {}",
            database.escape_sequence_name(schema, &statement.sequence_name)
        );
        // Derby refuses the bare form.
        if database.dialect() == Dialect::Derby {
            sql.push_str(" RESTRICT");
        }
        Ok(vec![Sql::new(sql)
            .affecting(DatabaseObject::sequence(schema, &statement.sequence_name))])
    }
}

/// Whether `AS <type>` is accepted in sequence DDL on this target.
/// Unknown versions keep the clause; the server gives the authoritative
/// answer either way.
fn data_type_allowed(database: &Database) -> bool {
    match database.dialect() {
        Dialect::Postgres => database.version_at_least(10, 0) != Some(false),
        Dialect::H2 => database.version_at_least(2, 0) != Some(false),
        Dialect::Oracle | Dialect::Firebird | Dialect::SybaseAnywhere => false,
        _ => true,
    }
}

fn cache_clause(cache: i64, dialect: Dialect) -> String {
    if cache == 0 {
        // "no caching" has a per-dialect spelling.
        return match dialect {
            Dialect::Oracle => " NOCACHE".to_string(),
            Dialect::SybaseAnywhere | Dialect::Db2Luw | Dialect::Db2z => " NO CACHE".to_string(),
            _ => " CACHE 1".to_string(),
        };
    }
    format!(" CACHE {cache}")
}
