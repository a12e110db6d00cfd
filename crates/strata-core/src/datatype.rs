//! Data-type descriptors and literal formatting.
//!
//! Statements carry abstract [`DataType`]s and [`LiteralValue`]s; the
//! translation to a dialect's physical type name or literal syntax happens
//! in one place so generators never concatenate raw values ad hoc.

use std::fmt;

use crate::database::Dialect;

/// Abstract column data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Smallint,
    Integer,
    Bigint,
    Real,
    Double,
    Decimal {
        precision: Option<u16>,
        scale: Option<u16>,
    },
    Char(Option<u32>),
    Varchar(Option<u32>),
    Text,
    Blob,
    Date,
    Time,
    Timestamp,
    Datetime,
    Boolean,
    /// A type passed through verbatim.
    Custom(String),
}

impl DataType {
    /// Parses a textual type description like `varchar(255)` or
    /// `decimal(10,2)`. Unrecognized descriptions become [`Self::Custom`]
    /// and are passed through untouched.
    #[must_use]
    pub fn parse(description: &str) -> Self {
        let trimmed = description.trim();
        let (base, args) = match trimmed.find('(') {
            Some(open) => {
                let close = trimmed.rfind(')').unwrap_or(trimmed.len());
                (
                    trimmed[..open].trim(),
                    Some(trimmed[open + 1..close].trim()),
                )
            }
            None => (trimmed, None),
        };
        let first_arg = args.and_then(|a| a.split(',').next()).map(str::trim);
        let second_arg = args.and_then(|a| a.split(',').nth(1)).map(str::trim);

        match base.to_ascii_lowercase().as_str() {
            "smallint" | "int2" => Self::Smallint,
            "int" | "integer" | "int4" => Self::Integer,
            "bigint" | "int8" => Self::Bigint,
            "real" | "float4" => Self::Real,
            "double" | "double precision" | "float8" | "float" => Self::Double,
            "decimal" | "numeric" | "number" => Self::Decimal {
                precision: first_arg.and_then(|a| a.parse().ok()),
                scale: second_arg.and_then(|a| a.parse().ok()),
            },
            "char" | "character" | "nchar" => Self::Char(first_arg.and_then(|a| a.parse().ok())),
            "varchar" | "varchar2" | "character varying" | "nvarchar" => {
                Self::Varchar(first_arg.and_then(|a| a.parse().ok()))
            }
            "text" | "clob" | "longtext" => Self::Text,
            "blob" | "bytea" | "longblob" | "varbinary" => Self::Blob,
            "date" => Self::Date,
            "time" => Self::Time,
            "timestamp" => Self::Timestamp,
            "datetime" => Self::Datetime,
            "boolean" | "bool" | "bit" => Self::Boolean,
            _ => Self::Custom(trimmed.to_string()),
        }
    }

    /// Physical type name for the given dialect.
    #[must_use]
    pub fn to_database_type(&self, dialect: Dialect) -> String {
        match self {
            Self::Smallint => "SMALLINT".to_string(),
            Self::Integer => match dialect {
                Dialect::Oracle => "NUMBER(10)".to_string(),
                _ => "INTEGER".to_string(),
            },
            Self::Bigint => match dialect {
                Dialect::Oracle => "NUMBER(19)".to_string(),
                _ => "BIGINT".to_string(),
            },
            Self::Real => "REAL".to_string(),
            Self::Double => match dialect {
                Dialect::Postgres | Dialect::Oracle => "DOUBLE PRECISION".to_string(),
                Dialect::Mssql | Dialect::Sybase => "FLOAT".to_string(),
                _ => "DOUBLE".to_string(),
            },
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => "DECIMAL".to_string(),
            },
            Self::Char(len) => len.map_or_else(|| "CHAR".to_string(), |n| format!("CHAR({n})")),
            Self::Varchar(len) => {
                len.map_or_else(|| "VARCHAR".to_string(), |n| format!("VARCHAR({n})"))
            }
            Self::Text => match dialect {
                Dialect::Oracle | Dialect::Db2Luw | Dialect::Db2z => "CLOB".to_string(),
                Dialect::Mssql => "VARCHAR(MAX)".to_string(),
                Dialect::MySql | Dialect::MariaDb => "LONGTEXT".to_string(),
                _ => "TEXT".to_string(),
            },
            Self::Blob => match dialect {
                Dialect::Postgres => "BYTEA".to_string(),
                Dialect::Mssql => "VARBINARY(MAX)".to_string(),
                Dialect::MySql | Dialect::MariaDb => "LONGBLOB".to_string(),
                _ => "BLOB".to_string(),
            },
            Self::Date => "DATE".to_string(),
            Self::Time => "TIME".to_string(),
            Self::Timestamp => match dialect {
                Dialect::Mssql | Dialect::Sybase => "DATETIME".to_string(),
                _ => "TIMESTAMP".to_string(),
            },
            Self::Datetime => match dialect {
                Dialect::MySql | Dialect::MariaDb | Dialect::Mssql | Dialect::Sybase => {
                    "DATETIME".to_string()
                }
                _ => "TIMESTAMP".to_string(),
            },
            Self::Boolean => match dialect {
                Dialect::Mssql | Dialect::Sybase | Dialect::SybaseAnywhere => "BIT".to_string(),
                Dialect::Oracle => "NUMBER(1)".to_string(),
                Dialect::Db2Luw | Dialect::Db2z | Dialect::Derby => "SMALLINT".to_string(),
                _ => "BOOLEAN".to_string(),
            },
            Self::Custom(name) => name.clone(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(name) => f.write_str(name),
            other => {
                // Generic rendering; dialect-specific output goes through
                // `to_database_type`.
                let generic = match other {
                    Self::Smallint => "SMALLINT".to_string(),
                    Self::Integer => "INTEGER".to_string(),
                    Self::Bigint => "BIGINT".to_string(),
                    Self::Real => "REAL".to_string(),
                    Self::Double => "DOUBLE".to_string(),
                    Self::Decimal { precision, scale } => match (precision, scale) {
                        (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                        (Some(p), None) => format!("DECIMAL({p})"),
                        _ => "DECIMAL".to_string(),
                    },
                    Self::Char(len) => {
                        len.map_or_else(|| "CHAR".to_string(), |n| format!("CHAR({n})"))
                    }
                    Self::Varchar(len) => {
                        len.map_or_else(|| "VARCHAR".to_string(), |n| format!("VARCHAR({n})"))
                    }
                    Self::Text => "TEXT".to_string(),
                    Self::Blob => "BLOB".to_string(),
                    Self::Date => "DATE".to_string(),
                    Self::Time => "TIME".to_string(),
                    Self::Timestamp => "TIMESTAMP".to_string(),
                    Self::Datetime => "DATETIME".to_string(),
                    Self::Boolean => "BOOLEAN".to_string(),
                    Self::Custom(_) => unreachable!(),
                };
                f.write_str(&generic)
            }
        }
    }
}

/// A literal value carried by a statement (a default value, a row value).
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A database function rendered verbatim (e.g. `NOW()`).
    Function(String),
    /// A raw SQL expression rendered verbatim.
    Expression(String),
}

impl LiteralValue {
    /// Renders the dialect-correct literal.
    #[must_use]
    pub fn to_sql(&self, dialect: Dialect) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Boolean(value) => {
                // Dialects without a boolean type store 1/0.
                let numeric = matches!(
                    dialect,
                    Dialect::Mssql
                        | Dialect::Sybase
                        | Dialect::SybaseAnywhere
                        | Dialect::Oracle
                        | Dialect::Db2Luw
                        | Dialect::Db2z
                        | Dialect::Derby
                );
                match (numeric, value) {
                    (true, true) => "1".to_string(),
                    (true, false) => "0".to_string(),
                    (false, true) => "TRUE".to_string(),
                    (false, false) => "FALSE".to_string(),
                }
            }
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(value) => format!("'{}'", value.replace('\'', "''")),
            Self::Function(name) | Self::Expression(name) => name.clone(),
        }
    }

    /// Whether this literal is a function or expression (never quoted).
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Function(_) | Self::Expression(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_types() {
        assert_eq!(DataType::parse("int"), DataType::Integer);
        assert_eq!(DataType::parse("BIGINT"), DataType::Bigint);
        assert_eq!(DataType::parse("varchar(255)"), DataType::Varchar(Some(255)));
        assert_eq!(
            DataType::parse("decimal(10, 2)"),
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
        );
        assert_eq!(DataType::parse("boolean"), DataType::Boolean);
    }

    #[test]
    fn test_parse_unknown_passes_through() {
        assert_eq!(
            DataType::parse("geography(POINT)"),
            DataType::Custom("geography(POINT)".to_string())
        );
    }

    #[test]
    fn test_database_type_mapping() {
        assert_eq!(DataType::Blob.to_database_type(Dialect::Postgres), "BYTEA");
        assert_eq!(
            DataType::Blob.to_database_type(Dialect::Mssql),
            "VARBINARY(MAX)"
        );
        assert_eq!(DataType::Boolean.to_database_type(Dialect::Oracle), "NUMBER(1)");
        assert_eq!(DataType::Boolean.to_database_type(Dialect::Postgres), "BOOLEAN");
        assert_eq!(DataType::Text.to_database_type(Dialect::MySql), "LONGTEXT");
        assert_eq!(
            DataType::Datetime.to_database_type(Dialect::Postgres),
            "TIMESTAMP"
        );
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(LiteralValue::Integer(42).to_sql(Dialect::Postgres), "42");
        assert_eq!(
            LiteralValue::String("it's".to_string()).to_sql(Dialect::Postgres),
            "'it''s'"
        );
        assert_eq!(LiteralValue::Boolean(true).to_sql(Dialect::Postgres), "TRUE");
        assert_eq!(LiteralValue::Boolean(true).to_sql(Dialect::Mssql), "1");
        assert_eq!(LiteralValue::Boolean(false).to_sql(Dialect::Oracle), "0");
        assert_eq!(
            LiteralValue::Function("NOW()".to_string()).to_sql(Dialect::Postgres),
            "NOW()"
        );
        assert_eq!(LiteralValue::Null.to_sql(Dialect::MySql), "NULL");
    }
}
