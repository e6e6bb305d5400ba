/*!
# Statement Synthesis

This module renders the warehouse statements the orchestrator executes:

- **DDL**: `create table` / `drop table if exists` from declarative
  [`TableDefinition`](crate::redstage::schema::TableDefinition)s
- **Bulk load**: `copy ... from 's3://...'` with format, parsing, error
  tolerance and authorization clauses
- **Bulk unload**: `unload ('query') to 's3://...'` with format, compression,
  partitioning and authorization clauses

Rendering is pure string synthesis: no I/O, no connection handles. Option
interactions are validated before any statement text is produced, so a
conflicting option bag can never reach the warehouse. Clause ordering is kept
explicit through [`clause::ClauseList`] because some dialects parse option
clauses positionally.
*/

pub mod auth;
pub mod clause;
pub mod copy;
pub mod ddl;
pub mod unload;

use regex::Regex;

pub use copy::{render_copy, LoadOptions};
pub use ddl::{render_column, render_column_definitions, render_create_table, render_drop_table};
pub use unload::{render_unload, UnloadFormat, UnloadOptions};

/// Collapse blank lines and leading indentation out of a rendered statement.
///
/// Sparse clause rendering leaves empty lines where options were absent; the
/// warehouse accepts them but logs and tests should not have to.
pub fn collapse_sql(sql: &str) -> String {
    sql.trim_start()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mask credential literals in a statement before it is logged.
pub fn mask_credentials(sql: &str) -> String {
    // Built on every call; statement logging is not a hot path.
    let patterns = [
        r"(access_key_id ')[^']*(')",
        r"(secret_access_key ')[^']*(')",
        r"(session_token ')[^']*(')",
        r"(iam_role ')[^']*(')",
    ];
    let mut masked = sql.to_string();
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            masked = re.replace_all(&masked, "${1}********${2}").to_string();
        }
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_sql_removes_blank_lines_and_indent() {
        let sql = "  copy t\n\n   from 'x'\n \nescape\n";
        assert_eq!(collapse_sql(sql), "copy t\nfrom 'x'\nescape");
    }

    #[test]
    fn test_mask_credentials_hides_all_literals() {
        let sql = "copy t\naccess_key_id 'AKIA'\nsecret_access_key 'abc'\nsession_token 'SEKRITTOKEN'\niam_role 'arn:x'";
        let masked = mask_credentials(sql);
        assert!(!masked.contains("AKIA"));
        assert!(!masked.contains("abc"));
        assert!(!masked.contains("SEKRITTOKEN"));
        assert!(!masked.contains("arn:x"));
        assert!(masked.contains("access_key_id '********'"));
        assert!(masked.contains("session_token '********'"));
        assert!(masked.contains("iam_role '********'"));
    }
}
