//! Statements that maintain the migration history table.

use crate::changeset::{ChangeSet, ExecType};

/// Records (or updates) a change set row in the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkChangeSetRanStatement {
    pub change_set: ChangeSet,
    pub exec_type: ExecType,
    /// Position of this change set in the current run, starting at 1.
    pub ordered_executed: i32,
    /// Identifier shared by every change set applied in one deployment.
    pub deployment_id: String,
}

impl MarkChangeSetRanStatement {
    #[must_use]
    pub fn new(
        change_set: ChangeSet,
        exec_type: ExecType,
        ordered_executed: i32,
        deployment_id: impl Into<String>,
    ) -> Self {
        Self {
            change_set,
            exec_type,
            ordered_executed,
            deployment_id: deployment_id.into(),
        }
    }
}

/// Tags the most recently executed change set with a release label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDatabaseStatement {
    pub tag: String,
    /// Remove earlier rows carrying the same tag before applying it.
    pub keep_tag_unique: bool,
}

impl TagDatabaseStatement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            keep_tag_unique: false,
        }
    }

    #[must_use]
    pub const fn keep_unique(mut self) -> Self {
        self.keep_tag_unique = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_ran_carries_exec_type() {
        let statement = MarkChangeSetRanStatement::new(
            ChangeSet::new("1", "alice", "changelog.xml"),
            ExecType::Executed,
            1,
            "9181818463",
        );
        assert_eq!(statement.exec_type.value(), "EXECUTED");
        assert!(!statement.exec_type.ran_before());
    }
}
