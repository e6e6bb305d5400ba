//! Ordered clause assembly for rendered statements.
//!
//! Bulk-load and unload statements are long lists of optional clauses whose
//! relative order matters to the warehouse parser. [`ClauseList`] keeps that
//! order explicit: clauses are pushed in a fixed sequence and each push
//! decides for itself whether its backing option is configured. Absent options
//! contribute nothing, so the rendered statement stays sparse and warehouse
//! defaults apply.

use std::fmt;

/// Ordered list of statement clauses, rendered one per line.
#[derive(Debug, Default)]
pub struct ClauseList {
    clauses: Vec<String>,
}

impl ClauseList {
    pub fn new() -> Self {
        ClauseList::default()
    }

    /// Push a clause unconditionally.
    pub fn raw(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.push(clause.into());
        self
    }

    /// Push a bare keyword clause when its flag is set.
    pub fn keyword(&mut self, enabled: bool, keyword: &str) -> &mut Self {
        if enabled {
            self.clauses.push(keyword.to_string());
        }
        self
    }

    /// Push `keyword value` (unquoted) when the value is present.
    pub fn value<T: fmt::Display>(&mut self, keyword: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.clauses.push(format!("{} {}", keyword, v));
        }
        self
    }

    /// Push `keyword 'value'` (single-quoted) when the value is present.
    pub fn quoted<T: fmt::Display>(&mut self, keyword: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.clauses.push(format!("{} '{}'", keyword, v));
        }
        self
    }

    /// Render the clauses in insertion order, newline separated.
    pub fn render(&self) -> String {
        self.clauses.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clauses_render_in_insertion_order() {
        let mut clauses = ClauseList::new();
        clauses
            .raw("copy t")
            .keyword(true, "escape")
            .quoted("null as", Some("NA"))
            .value("ignoreheader", Some(1));
        assert_eq!(clauses.render(), "copy t\nescape\nnull as 'NA'\nignoreheader 1");
    }

    #[test]
    fn test_absent_options_render_nothing() {
        let mut clauses = ClauseList::new();
        clauses
            .keyword(false, "escape")
            .quoted::<&str>("null as", None)
            .value::<i64>("ignoreheader", None);
        assert_eq!(clauses.render(), "");
    }
}
