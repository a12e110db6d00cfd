//! Whitespace-preserving clause scanner for procedure bodies.
//!
//! Stored procedure text is user-authored SQL in the target dialect; we
//! never fully parse it. This scanner splits it into word and whitespace
//! runs so a single clause (the procedure name, the leading CREATE
//! keyword) can be rewritten without disturbing the rest of the text.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Word(String),
    Space(String),
}

/// A procedure body split into word and whitespace runs.
#[derive(Debug, Clone)]
pub struct Clauses {
    parts: Vec<Part>,
}

impl Clauses {
    /// Splits the text. Quoted identifiers and bracketed names count as
    /// single words; string literal internals are not interpreted.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut parts = Vec::new();
        let mut current = String::new();
        let mut current_is_space: Option<bool> = None;

        for c in text.chars() {
            let is_space = c.is_whitespace();
            if current_is_space != Some(is_space) {
                if let Some(was_space) = current_is_space {
                    let run = std::mem::take(&mut current);
                    parts.push(if was_space { Part::Space(run) } else { Part::Word(run) });
                }
                current_is_space = Some(is_space);
            }
            current.push(c);
        }
        if let Some(was_space) = current_is_space {
            parts.push(if was_space { Part::Space(current) } else { Part::Word(current) });
        }
        Self { parts }
    }

    /// Replaces the first word matching any of `candidates` (case
    /// insensitive) with `replacement`. Returns whether a word matched.
    pub fn replace_first_keyword(&mut self, candidates: &[&str], replacement: &str) -> bool {
        for part in &mut self.parts {
            if let Part::Word(word) = part {
                if candidates.iter().any(|c| word.eq_ignore_ascii_case(c)) {
                    *word = replacement.to_string();
                    return true;
                }
            }
        }
        false
    }

    /// Rewrites the word immediately after the first occurrence of
    /// `keyword` using `rewrite`. Scanning stops without rewriting when a
    /// word in `stop_words` appears before the keyword (used to leave
    /// procedure declarations inside a PACKAGE body alone). Returns
    /// whether a rewrite happened.
    pub fn rewrite_after_keyword(
        &mut self,
        keyword: &str,
        stop_words: &[&str],
        rewrite: impl FnOnce(&str) -> String,
    ) -> bool {
        let mut keyword_seen = false;
        for part in &mut self.parts {
            let Part::Word(word) = part else { continue };
            if keyword_seen {
                *word = rewrite(word);
                return true;
            }
            if word.eq_ignore_ascii_case(keyword) {
                keyword_seen = true;
            } else if stop_words.iter().any(|s| word.eq_ignore_ascii_case(s)) {
                return false;
            }
        }
        false
    }

    /// Whether the text contains the word (case insensitive).
    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.parts.iter().any(|p| match p {
            Part::Word(w) => w.eq_ignore_ascii_case(word),
            Part::Space(_) => false,
        })
    }
}

impl fmt::Display for Clauses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                Part::Word(s) | Part::Space(s) => f.write_str(s)?,
            }
        }
        Ok(())
    }
}

/// Removes one trailing end delimiter (plus surrounding trailing
/// whitespace) from a procedure body, leaving the rest untouched.
#[must_use]
pub fn strip_trailing_delimiter(text: &str, delimiter: &str) -> String {
    let trimmed = text.trim_end();
    let delimiter = delimiter.trim_end();
    if !delimiter.is_empty() && trimmed.ends_with(delimiter) {
        trimmed[..trimmed.len() - delimiter.len()].trim_end().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_whitespace() {
        let text = "CREATE   PROCEDURE\n  my_proc AS BEGIN\tEND";
        assert_eq!(Clauses::parse(text).to_string(), text);
    }

    #[test]
    fn test_rewrite_after_keyword() {
        let mut clauses = Clauses::parse("CREATE PROCEDURE my_proc AS BEGIN END");
        let rewritten =
            clauses.rewrite_after_keyword("PROCEDURE", &["PACKAGE"], |name| format!("app.{name}"));
        assert!(rewritten);
        assert_eq!(clauses.to_string(), "CREATE PROCEDURE app.my_proc AS BEGIN END");
    }

    #[test]
    fn test_stop_word_blocks_rewrite() {
        let mut clauses = Clauses::parse("CREATE PACKAGE pkg AS PROCEDURE inner_proc; END;");
        let rewritten =
            clauses.rewrite_after_keyword("PROCEDURE", &["PACKAGE"], |name| format!("app.{name}"));
        assert!(!rewritten);
        assert_eq!(clauses.to_string(), "CREATE PACKAGE pkg AS PROCEDURE inner_proc; END;");
    }

    #[test]
    fn test_replace_first_keyword() {
        let mut clauses = Clauses::parse("create procedure p as select 1");
        assert!(clauses.replace_first_keyword(&["create", "alter"], "ALTER"));
        assert_eq!(clauses.to_string(), "ALTER procedure p as select 1");
    }

    #[test]
    fn test_strip_trailing_delimiter() {
        assert_eq!(strip_trailing_delimiter("SELECT 1;\n", ";"), "SELECT 1");
        assert_eq!(strip_trailing_delimiter("SELECT 1", ";"), "SELECT 1");
        assert_eq!(strip_trailing_delimiter("BEGIN END\nGO", "GO"), "BEGIN END");
    }
}
