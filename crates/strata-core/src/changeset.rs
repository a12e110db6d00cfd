//! Changeset value objects consumed by bookkeeping statements.
//!
//! The changelog parsing and history services live outside this core;
//! these are the minimal value objects the bookkeeping generators need.

use serde::{Deserialize, Serialize};

/// How a changeset execution ended (or was classified).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecType {
    Executed,
    Reran,
    Failed,
    Skipped,
    MarkRan,
}

impl ExecType {
    /// Wire value stored in the changelog table.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Executed => "EXECUTED",
            Self::Reran => "RERAN",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
            Self::MarkRan => "MARK_RAN",
        }
    }

    /// Whether this execution type means the changeset already has a row
    /// in the changelog table (update instead of insert).
    #[must_use]
    pub const fn ran_before(self) -> bool {
        matches!(self, Self::Reran)
    }
}

/// One versioned change unit, as identified in the changelog table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub id: String,
    pub author: String,
    pub file_path: String,
    pub description: String,
    pub comments: String,
    pub contexts: Vec<String>,
    pub labels: Vec<String>,
    /// Tag applied by a tag-database change inside this changeset.
    pub tag: Option<String>,
    /// Checksum as computed by the (external) checksum service.
    pub checksum: Option<String>,
}

impl ChangeSet {
    /// Creates a changeset with the identifying triple; remaining fields
    /// start empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            file_path: file_path.into(),
            description: String::new(),
            comments: String::new(),
            contexts: Vec::new(),
            labels: Vec::new(),
            tag: None,
            checksum: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    #[must_use]
    pub fn with_contexts(mut self, contexts: Vec<String>) -> Self {
        self.contexts = contexts;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Context expression as stored in the changelog row, wrapping complex
    /// expressions in parentheses and joining with AND.
    #[must_use]
    pub fn contexts_column(&self) -> Option<String> {
        if self.contexts.is_empty() {
            return None;
        }
        let joined = self
            .contexts
            .iter()
            .map(|context| {
                if context.contains(',') || context.contains(' ') {
                    format!("({context})")
                } else {
                    context.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" AND ");
        Some(joined)
    }

    /// Labels column value, if any labels are set.
    #[must_use]
    pub fn labels_column(&self) -> Option<String> {
        if self.labels.is_empty() {
            None
        } else {
            Some(self.labels.join(","))
        }
    }
}

/// Truncates free-text columns to the changelog table's limit.
///
/// Counts characters rather than bytes so multi-byte text is never
/// split mid-character.
#[must_use]
pub fn limit_size(text: &str, max_length: usize) -> String {
    if text.chars().count() > max_length {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_type_values() {
        assert_eq!(ExecType::Executed.value(), "EXECUTED");
        assert_eq!(ExecType::MarkRan.value(), "MARK_RAN");
        assert!(ExecType::Reran.ran_before());
        assert!(!ExecType::Executed.ran_before());
        assert!(!ExecType::MarkRan.ran_before());
    }

    #[test]
    fn test_contexts_column() {
        let changeset = ChangeSet::new("1", "alice", "changelog.xml")
            .with_contexts(vec!["prod".to_string(), "eu, us".to_string()]);
        assert_eq!(changeset.contexts_column().as_deref(), Some("prod AND (eu, us)"));

        let empty = ChangeSet::new("1", "alice", "changelog.xml");
        assert_eq!(empty.contexts_column(), None);
    }

    #[test]
    fn test_limit_size() {
        assert_eq!(limit_size("short", 250), "short");
        let long = "x".repeat(300);
        let limited = limit_size(&long, 250);
        assert_eq!(limited.len(), 250);
        assert!(limited.ends_with("..."));
    }

    #[test]
    fn test_limit_size_multibyte() {
        let long = "é".repeat(300);
        let limited = limit_size(&long, 250);
        assert_eq!(limited.chars().count(), 250);
        assert!(limited.ends_with("..."));
        assert_eq!(limit_size("héllo", 5), "héllo");
    }

    #[test]
    fn test_limit_size_tiny_limit() {
        assert_eq!(limit_size("abcde", 2), "...");
    }
}
