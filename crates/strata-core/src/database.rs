//! Target-database capability model.
//!
//! A [`Database`] describes one resolved migration target: its dialect,
//! its (possibly unknown) version, its quoting policy and the handful of
//! runtime hooks generators are allowed to use. Generators never inspect
//! connections directly; everything dialect-specific funnels through here
//! so there is exactly one quoting and capability policy per target.

use std::cell::Cell;
use std::fmt;

/// A live read-only query hook, used by the rare generator that must ask
/// the target database a question mid-generation (e.g. the Postgres
/// `SHOW SEARCH_PATH` lookup). Implemented by the embedding executor.
pub trait LiveQuery {
    /// Runs a query expected to return a single string value.
    fn query_string(&self, sql: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Identifier quoting policy.
///
/// `Legacy` quotes only identifiers that need it and is forced while
/// touching the changelog bookkeeping table, whose identifiers are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectQuotingStrategy {
    /// Quote only when the identifier would otherwise be invalid.
    #[default]
    Legacy,
    /// Quote every object name.
    QuoteAllObjects,
    /// Quote reserved words and invalid identifiers.
    QuoteOnlyReservedWords,
}

/// Supported database dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Postgres,
    MySql,
    MariaDb,
    Mssql,
    Oracle,
    Db2Luw,
    Db2z,
    Derby,
    Firebird,
    H2,
    Hsqldb,
    Informix,
    Sqlite,
    Sybase,
    SybaseAnywhere,
}

impl Dialect {
    /// Short name, as it appears in error and validation messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgresql",
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Mssql => "mssql",
            Self::Oracle => "oracle",
            Self::Db2Luw => "db2",
            Self::Db2z => "db2z",
            Self::Derby => "derby",
            Self::Firebird => "firebird",
            Self::H2 => "h2",
            Self::Hsqldb => "hsqldb",
            Self::Informix => "informix",
            Self::Sqlite => "sqlite",
            Self::Sybase => "sybase",
            Self::SybaseAnywhere => "asany",
        }
    }

    /// Whether this dialect is a DB2 variant (LUW or z/OS).
    #[must_use]
    pub const fn is_db2_family(self) -> bool {
        matches!(self, Self::Db2Luw | Self::Db2z)
    }

    /// Whether this dialect speaks the MySQL wire syntax (MySQL, MariaDB).
    #[must_use]
    pub const fn is_mysql_family(self) -> bool {
        matches!(self, Self::MySql | Self::MariaDb)
    }

    /// Whether sequences exist as first-class objects.
    #[must_use]
    pub const fn supports_sequences(self) -> bool {
        !matches!(self, Self::MySql | Self::MariaDb | Self::Sqlite | Self::Sybase)
    }

    /// Whether schemas exist as namespaces for user objects.
    #[must_use]
    pub const fn supports_schemas(self) -> bool {
        !matches!(self, Self::MySql | Self::MariaDb | Self::Sqlite)
    }

    /// Whether identity/auto-increment columns are supported at all.
    #[must_use]
    pub const fn supports_auto_increment(self) -> bool {
        !matches!(self, Self::Oracle | Self::Firebird)
    }

    /// Whether foreign keys may be declared DEFERRABLE.
    #[must_use]
    pub const fn supports_deferrable_constraints(self) -> bool {
        matches!(self, Self::Postgres | Self::Oracle)
    }

    /// Function returning the current timestamp in this dialect.
    #[must_use]
    pub const fn current_datetime_function(self) -> &'static str {
        match self {
            Self::Postgres | Self::MySql | Self::MariaDb | Self::H2 | Self::Hsqldb => "NOW()",
            Self::Mssql => "GETDATE()",
            Self::Sybase => "getdate()",
            Self::Oracle => "SYSTIMESTAMP",
            Self::Db2Luw | Self::Db2z | Self::Derby | Self::SybaseAnywhere => "CURRENT TIMESTAMP",
            Self::Firebird | Self::Sqlite => "CURRENT_TIMESTAMP",
            Self::Informix => "CURRENT",
        }
    }

    /// Opening and closing identifier quote characters.
    #[must_use]
    pub const fn quote_chars(self) -> (char, char) {
        match self {
            Self::MySql | Self::MariaDb => ('`', '`'),
            Self::Mssql | Self::Sybase => ('[', ']'),
            _ => ('"', '"'),
        }
    }

    /// The column clause that makes a column auto-incrementing.
    ///
    /// Empty for dialects that express identity through the data type
    /// (Informix SERIAL) or do not support it.
    #[must_use]
    pub fn auto_increment_clause(self, start_with: Option<i64>, increment_by: Option<i64>) -> String {
        match self {
            Self::MySql | Self::MariaDb => "AUTO_INCREMENT".to_string(),
            Self::Sqlite => "AUTOINCREMENT".to_string(),
            Self::Mssql | Self::Sybase | Self::SybaseAnywhere => format!(
                "IDENTITY ({}, {})",
                start_with.unwrap_or(1),
                increment_by.unwrap_or(1)
            ),
            Self::Postgres => "GENERATED BY DEFAULT AS IDENTITY".to_string(),
            Self::H2 | Self::Hsqldb | Self::Derby | Self::Db2Luw | Self::Db2z => {
                match (start_with, increment_by) {
                    (None, None) => "GENERATED BY DEFAULT AS IDENTITY".to_string(),
                    (s, i) => format!(
                        "GENERATED BY DEFAULT AS IDENTITY (START WITH {}, INCREMENT BY {})",
                        s.unwrap_or(1),
                        i.unwrap_or(1)
                    ),
                }
            }
            Self::Oracle | Self::Firebird | Self::Informix => String::new(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A small set of reserved words that must be quoted under
/// `QuoteOnlyReservedWords`. Deliberately conservative; embedders with
/// stricter needs use `QuoteAllObjects`.
const RESERVED_WORDS: &[&str] = &[
    "ALL", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN", "CONSTRAINT",
    "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXISTS",
    "FOREIGN", "FROM", "FULL", "GROUP", "HAVING", "IN", "INDEX", "INNER", "INSERT", "INTO", "IS",
    "JOIN", "KEY", "LEFT", "LIKE", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER", "PRIMARY",
    "REFERENCES", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "UNION", "UNIQUE", "UPDATE", "USER",
    "VALUES", "VIEW", "WHEN", "WHERE",
];

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One resolved migration target.
///
/// The quoting strategy is the only mutable piece of state; generators
/// that need a different strategy take a scoped [`QuotingGuard`] so the
/// previous strategy is restored on every exit path.
pub struct Database {
    dialect: Dialect,
    version: Option<(u32, u32)>,
    default_schema_name: Option<String>,
    changelog_table_name: String,
    changelog_schema_name: Option<String>,
    quoting: Cell<ObjectQuotingStrategy>,
    live_query: Option<Box<dyn LiveQuery>>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("dialect", &self.dialect)
            .field("version", &self.version)
            .field("default_schema_name", &self.default_schema_name)
            .field("quoting", &self.quoting.get())
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Creates a target for the given dialect with no known version.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            version: None,
            default_schema_name: None,
            changelog_table_name: "DATABASECHANGELOG".to_string(),
            changelog_schema_name: None,
            quoting: Cell::new(ObjectQuotingStrategy::default()),
            live_query: None,
        }
    }

    /// Sets the resolved server version.
    #[must_use]
    pub fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.version = Some((major, minor));
        self
    }

    /// Sets the default schema used when a statement leaves it unset.
    #[must_use]
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema_name = Some(schema.into());
        self
    }

    /// Overrides the changelog bookkeeping table name.
    #[must_use]
    pub fn with_changelog_table(mut self, name: impl Into<String>) -> Self {
        self.changelog_table_name = name.into();
        self
    }

    /// Sets the schema holding the changelog bookkeeping table.
    #[must_use]
    pub fn with_changelog_schema(mut self, schema: impl Into<String>) -> Self {
        self.changelog_schema_name = Some(schema.into());
        self
    }

    /// Attaches a live-query hook for mid-generation introspection.
    #[must_use]
    pub fn with_live_query(mut self, executor: Box<dyn LiveQuery>) -> Self {
        self.live_query = Some(executor);
        self
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Server version, if it could be determined at connect time.
    #[must_use]
    pub const fn version(&self) -> Option<(u32, u32)> {
        self.version
    }

    /// Version gate helper. Returns `None` when the version is unknown;
    /// callers treat that as "feature unavailable", never as an error.
    #[must_use]
    pub fn version_at_least(&self, major: u32, minor: u32) -> Option<bool> {
        self.version
            .map(|(maj, min)| (maj, min) >= (major, minor))
    }

    #[must_use]
    pub fn default_schema_name(&self) -> Option<&str> {
        self.default_schema_name.as_deref()
    }

    #[must_use]
    pub fn changelog_table_name(&self) -> &str {
        &self.changelog_table_name
    }

    #[must_use]
    pub fn changelog_schema_name(&self) -> Option<&str> {
        self.changelog_schema_name.as_deref()
    }

    #[must_use]
    pub fn live_query(&self) -> Option<&dyn LiveQuery> {
        self.live_query.as_deref()
    }

    #[must_use]
    pub fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        self.quoting.get()
    }

    pub fn set_quoting_strategy(&self, strategy: ObjectQuotingStrategy) {
        self.quoting.set(strategy);
    }

    /// Applies a quoting strategy for the lifetime of the returned guard.
    /// The previous strategy is restored when the guard drops, including
    /// on error and panic unwinds.
    #[must_use]
    pub fn push_quoting_strategy(&self, strategy: ObjectQuotingStrategy) -> QuotingGuard<'_> {
        let previous = self.quoting.replace(strategy);
        QuotingGuard { database: self, previous }
    }

    /// Escapes a single object name per the active quoting strategy.
    #[must_use]
    pub fn escape_object_name(&self, name: &str) -> String {
        let must_quote = match self.quoting.get() {
            ObjectQuotingStrategy::QuoteAllObjects => true,
            ObjectQuotingStrategy::Legacy => !is_plain_identifier(name),
            ObjectQuotingStrategy::QuoteOnlyReservedWords => {
                !is_plain_identifier(name)
                    || RESERVED_WORDS.contains(&name.to_ascii_uppercase().as_str())
            }
        };
        if must_quote {
            let (open, close) = self.dialect.quote_chars();
            format!("{open}{name}{close}")
        } else {
            name.to_string()
        }
    }

    /// Escapes a possibly schema-qualified table name.
    #[must_use]
    pub fn escape_table_name(&self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(s) if self.dialect.supports_schemas() => {
                format!("{}.{}", self.escape_object_name(s), self.escape_object_name(table))
            }
            _ => self.escape_object_name(table),
        }
    }

    #[must_use]
    pub fn escape_column_name(&self, column: &str) -> String {
        self.escape_object_name(column)
    }

    /// Escapes a comma-joined column list.
    #[must_use]
    pub fn escape_column_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.escape_column_name(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn escape_sequence_name(&self, schema: Option<&str>, sequence: &str) -> String {
        self.escape_table_name(schema, sequence)
    }

    #[must_use]
    pub fn escape_view_name(&self, schema: Option<&str>, view: &str) -> String {
        self.escape_table_name(schema, view)
    }

    #[must_use]
    pub fn escape_constraint_name(&self, constraint: &str) -> String {
        self.escape_object_name(constraint)
    }

    /// Escapes a string literal body (doubling single quotes).
    #[must_use]
    pub fn escape_string_literal(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Fully escaped name of the changelog bookkeeping table.
    #[must_use]
    pub fn escaped_changelog_table(&self) -> String {
        self.escape_table_name(self.changelog_schema_name(), &self.changelog_table_name)
    }

    /// Name MSSQL gives an unnamed DEFAULT constraint on this column.
    #[must_use]
    pub fn generate_default_constraint_name(&self, table: &str, column: &str) -> String {
        format!("DF_{table}_{column}")
    }
}

/// Restores the previous quoting strategy on drop.
pub struct QuotingGuard<'a> {
    database: &'a Database,
    previous: ObjectQuotingStrategy,
}

impl Drop for QuotingGuard<'_> {
    fn drop(&mut self) {
        self.database.quoting.set(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names() {
        assert_eq!(Dialect::Postgres.name(), "postgresql");
        assert_eq!(Dialect::SybaseAnywhere.name(), "asany");
        assert_eq!(Dialect::Db2Luw.name(), "db2");
    }

    #[test]
    fn test_families() {
        assert!(Dialect::Db2z.is_db2_family());
        assert!(Dialect::MariaDb.is_mysql_family());
        assert!(!Dialect::Postgres.is_mysql_family());
    }

    #[test]
    fn test_sequence_support() {
        assert!(Dialect::Postgres.supports_sequences());
        assert!(Dialect::Oracle.supports_sequences());
        assert!(!Dialect::MySql.supports_sequences());
        assert!(!Dialect::Sqlite.supports_sequences());
    }

    #[test]
    fn test_legacy_quoting_only_quotes_when_needed() {
        let db = Database::new(Dialect::Postgres);
        assert_eq!(db.escape_object_name("users"), "users");
        assert_eq!(db.escape_object_name("user name"), "\"user name\"");
        assert_eq!(db.escape_object_name("1users"), "\"1users\"");
    }

    #[test]
    fn test_quote_all_objects() {
        let db = Database::new(Dialect::MySql);
        db.set_quoting_strategy(ObjectQuotingStrategy::QuoteAllObjects);
        assert_eq!(db.escape_object_name("users"), "`users`");

        let db = Database::new(Dialect::Mssql);
        db.set_quoting_strategy(ObjectQuotingStrategy::QuoteAllObjects);
        assert_eq!(db.escape_object_name("users"), "[users]");
    }

    #[test]
    fn test_reserved_word_quoting() {
        let db = Database::new(Dialect::Postgres);
        db.set_quoting_strategy(ObjectQuotingStrategy::QuoteOnlyReservedWords);
        assert_eq!(db.escape_object_name("order"), "\"order\"");
        assert_eq!(db.escape_object_name("users"), "users");
    }

    #[test]
    fn test_schema_qualified_table() {
        let db = Database::new(Dialect::Postgres);
        assert_eq!(db.escape_table_name(Some("app"), "users"), "app.users");

        // SQLite has no schemas; the qualifier is dropped.
        let db = Database::new(Dialect::Sqlite);
        assert_eq!(db.escape_table_name(Some("app"), "users"), "users");
    }

    #[test]
    fn test_quoting_guard_restores() {
        let db = Database::new(Dialect::Postgres);
        db.set_quoting_strategy(ObjectQuotingStrategy::QuoteAllObjects);
        {
            let _guard = db.push_quoting_strategy(ObjectQuotingStrategy::Legacy);
            assert_eq!(db.quoting_strategy(), ObjectQuotingStrategy::Legacy);
        }
        assert_eq!(db.quoting_strategy(), ObjectQuotingStrategy::QuoteAllObjects);
    }

    #[test]
    fn test_quoting_guard_restores_on_early_return() {
        fn failing(db: &Database) -> Result<(), ()> {
            let _guard = db.push_quoting_strategy(ObjectQuotingStrategy::Legacy);
            Err(())
        }
        let db = Database::new(Dialect::Oracle);
        db.set_quoting_strategy(ObjectQuotingStrategy::QuoteAllObjects);
        assert!(failing(&db).is_err());
        assert_eq!(db.quoting_strategy(), ObjectQuotingStrategy::QuoteAllObjects);
    }

    #[test]
    fn test_version_gate() {
        let db = Database::new(Dialect::Postgres).with_version(9, 5);
        assert_eq!(db.version_at_least(9, 5), Some(true));
        assert_eq!(db.version_at_least(10, 0), Some(false));

        let unknown = Database::new(Dialect::Postgres);
        assert_eq!(unknown.version_at_least(9, 5), None);
    }

    #[test]
    fn test_auto_increment_clauses() {
        assert_eq!(
            Dialect::MySql.auto_increment_clause(None, None),
            "AUTO_INCREMENT"
        );
        assert_eq!(
            Dialect::Mssql.auto_increment_clause(Some(5), Some(2)),
            "IDENTITY (5, 2)"
        );
        assert_eq!(
            Dialect::H2.auto_increment_clause(Some(10), None),
            "GENERATED BY DEFAULT AS IDENTITY (START WITH 10, INCREMENT BY 1)"
        );
        assert_eq!(Dialect::Oracle.auto_increment_clause(None, None), "");
    }
}
