//! Sequence statements.

use crate::datatype::DataType;

/// Creates a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSequenceStatement {
    pub schema: Option<String>,
    pub sequence_name: String,
    pub start_value: Option<i64>,
    pub increment_by: Option<i64>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub cache_size: Option<i64>,
    pub cycle: Option<bool>,
    pub ordered: Option<bool>,
    pub data_type: Option<DataType>,
}

impl CreateSequenceStatement {
    #[must_use]
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self {
            schema: None,
            sequence_name: sequence_name.into(),
            start_value: None,
            increment_by: None,
            min_value: None,
            max_value: None,
            cache_size: None,
            cycle: None,
            ordered: None,
            data_type: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub const fn start_value(mut self, value: i64) -> Self {
        self.start_value = Some(value);
        self
    }

    #[must_use]
    pub const fn increment_by(mut self, value: i64) -> Self {
        self.increment_by = Some(value);
        self
    }

    #[must_use]
    pub const fn min_value(mut self, value: i64) -> Self {
        self.min_value = Some(value);
        self
    }

    #[must_use]
    pub const fn max_value(mut self, value: i64) -> Self {
        self.max_value = Some(value);
        self
    }

    #[must_use]
    pub const fn cache_size(mut self, value: i64) -> Self {
        self.cache_size = Some(value);
        self
    }

    #[must_use]
    pub const fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = Some(cycle);
        self
    }

    #[must_use]
    pub const fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = Some(ordered);
        self
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }
}

/// Alters an existing sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterSequenceStatement {
    pub schema: Option<String>,
    pub sequence_name: String,
    pub increment_by: Option<i64>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub cache_size: Option<i64>,
    pub cycle: Option<bool>,
    pub ordered: Option<bool>,
    pub data_type: Option<DataType>,
}

impl AlterSequenceStatement {
    #[must_use]
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self {
            schema: None,
            sequence_name: sequence_name.into(),
            increment_by: None,
            min_value: None,
            max_value: None,
            cache_size: None,
            cycle: None,
            ordered: None,
            data_type: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub const fn increment_by(mut self, value: i64) -> Self {
        self.increment_by = Some(value);
        self
    }

    #[must_use]
    pub const fn min_value(mut self, value: i64) -> Self {
        self.min_value = Some(value);
        self
    }

    #[must_use]
    pub const fn max_value(mut self, value: i64) -> Self {
        self.max_value = Some(value);
        self
    }

    #[must_use]
    pub const fn cache_size(mut self, value: i64) -> Self {
        self.cache_size = Some(value);
        self
    }

    #[must_use]
    pub const fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = Some(cycle);
        self
    }

    #[must_use]
    pub const fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = Some(ordered);
        self
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Whether the statement carries anything to alter at all.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.increment_by.is_some()
            || self.min_value.is_some()
            || self.max_value.is_some()
            || self.cache_size.is_some()
            || self.cycle.is_some()
            || self.ordered.is_some()
            || self.data_type.is_some()
    }
}

/// Drops a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropSequenceStatement {
    pub schema: Option<String>,
    pub sequence_name: String,
}

impl DropSequenceStatement {
    #[must_use]
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self {
            schema: None,
            sequence_name: sequence_name.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alter_sequence_has_changes() {
        let statement = AlterSequenceStatement::new("seq_users");
        assert!(!statement.has_changes());
        assert!(statement.cache_size(0).has_changes());
    }
}
