//! Bulk-load (`copy`) statement rendering.
//!
//! Turns a staged-file location plus a [`LoadOptions`] bag into a `copy`
//! statement. Boolean options render as bare keywords when set; value options
//! render as `keyword 'value'` when present; everything else is omitted so
//! warehouse defaults apply.

use serde::{Deserialize, Serialize};

use crate::redstage::config::AwsCredentials;
use crate::redstage::error::TransferResult;
use crate::redstage::sql::auth::push_auth_clauses;
use crate::redstage::sql::clause::ClauseList;
use crate::redstage::sql::collapse_sql;

/// Options governing a bulk-load statement.
///
/// A closed option bag: every supported clause is a named field, so a typo in
/// a caller is a compile error instead of a silently dropped option. Defaults
/// mirror the common delimited-text staging shape: comma delimiter, one
/// header line, auto date/time parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Field delimiter of the staged file
    pub delimiter: String,
    /// Number of header lines to skip
    pub ignore_header: u32,
    /// Quote character for csv mode; only rendered when the delimiter is a
    /// comma and escape mode is off, the two being alternative quoting
    /// strategies
    pub quote_character: char,
    pub dateformat: String,
    pub timeformat: String,
    /// Replacement character for invalid code points; `None` omits the clause
    pub accept_inv_chars: Option<String>,
    pub accept_any_date: bool,
    pub blanks_as_null: bool,
    pub empty_as_null: bool,
    pub escape: bool,
    /// The NULL AS string
    pub null_as: Option<String>,
    /// Source file encoding, e.g. `utf16`
    pub encoding: Option<String>,
    pub explicit_ids: bool,
    pub fill_record: bool,
    pub ignore_blank_lines: bool,
    pub remove_quotes: bool,
    pub round_ec: bool,
    pub trim_blanks: bool,
    pub truncate_columns: bool,
    /// Region of the staging bucket when it differs from the cluster's
    pub region: Option<String>,
    /// IAM role authorization; overrides the static key pair when present
    pub iam_role: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: ",".to_string(),
            ignore_header: 1,
            quote_character: '"',
            dateformat: "auto".to_string(),
            timeformat: "auto".to_string(),
            accept_inv_chars: Some("?".to_string()),
            accept_any_date: false,
            blanks_as_null: false,
            empty_as_null: false,
            escape: false,
            null_as: None,
            encoding: None,
            explicit_ids: false,
            fill_record: false,
            ignore_blank_lines: false,
            remove_quotes: false,
            round_ec: false,
            trim_blanks: false,
            truncate_columns: false,
            region: None,
            iam_role: None,
        }
    }
}

/// Render a `copy` statement loading a staged object into a table.
///
/// `column_list` restricts the load to the named columns when present.
/// Fails before producing any text when no usable authorization is
/// configured.
pub fn render_copy(
    table_name: &str,
    column_list: Option<&[String]>,
    bucket: &str,
    key: &str,
    options: &LoadOptions,
    credentials: &AwsCredentials,
) -> TransferResult<String> {
    let source = format!("s3://{}/{}", bucket, key);
    let columns = match column_list {
        Some(cols) if !cols.is_empty() => format!(" ({})", cols.join(",")),
        _ => String::new(),
    };

    let mut clauses = ClauseList::new();
    clauses.raw(format!("copy {}{}", table_name, columns));
    clauses.raw(format!("from '{}'", source));
    clauses.quoted("delimiter", Some(&options.delimiter));
    // csv quoting and escape mode are mutually exclusive quoting strategies
    if options.delimiter == "," && !options.escape {
        clauses.raw(format!("csv quote as '{}'", options.quote_character));
    }
    clauses.keyword(options.escape, "escape");
    clauses.quoted("acceptinvchars as", options.accept_inv_chars.as_deref());
    clauses.keyword(options.accept_any_date, "acceptanydate");
    clauses.keyword(options.blanks_as_null, "blanksasnull");
    clauses.keyword(options.empty_as_null, "emptyasnull");
    clauses.quoted("null as", options.null_as.as_deref());
    clauses.value("encoding as", options.encoding.as_deref());
    clauses.keyword(options.explicit_ids, "explicit_ids");
    clauses.keyword(options.fill_record, "fillrecord");
    clauses.keyword(options.remove_quotes, "removequotes");
    clauses.keyword(options.round_ec, "roundec");
    clauses.keyword(options.trim_blanks, "trimblanks");
    clauses.keyword(options.truncate_columns, "truncatecolumns");
    clauses.keyword(options.ignore_blank_lines, "ignoreblanklines");
    clauses.value("ignoreheader", Some(options.ignore_header));
    clauses.quoted("dateformat", Some(&options.dateformat));
    clauses.quoted("timeformat", Some(&options.timeformat));
    push_auth_clauses(&mut clauses, credentials, options.iam_role.as_deref())?;
    clauses.quoted("region", options.region.as_deref());

    Ok(collapse_sql(&clauses.render()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redstage::error::TransferError;

    fn creds() -> AwsCredentials {
        AwsCredentials {
            access_key_id: Some("AKIA123".to_string()),
            secret_access_key: Some("sekrit".to_string()),
            session_token: None,
        }
    }

    fn render(options: &LoadOptions) -> String {
        render_copy("schema.t", None, "bkt", "staged.csv", options, &creds()).unwrap()
    }

    #[test]
    fn test_copy_shell_and_source_uri() {
        let sql = render(&LoadOptions::default());
        assert!(sql.starts_with("copy schema.t\nfrom 's3://bkt/staged.csv'"));
        assert!(sql.contains("delimiter ','"));
        assert!(sql.contains("ignoreheader 1"));
        assert!(sql.contains("dateformat 'auto'"));
        assert!(sql.contains("timeformat 'auto'"));
    }

    #[test]
    fn test_column_list_restricts_load() {
        let sql = render_copy(
            "t",
            Some(&["a".to_string(), "b".to_string()]),
            "bkt",
            "k",
            &LoadOptions::default(),
            &creds(),
        )
        .unwrap();
        assert!(sql.starts_with("copy t (a,b)"));
    }

    #[test]
    fn test_csv_quote_emitted_for_comma_without_escape() {
        let sql = render(&LoadOptions::default());
        assert!(sql.contains("csv quote as '\"'"));
        assert!(!sql.contains("\nescape"));
    }

    #[test]
    fn test_escape_suppresses_csv_quote() {
        let options = LoadOptions {
            escape: true,
            ..Default::default()
        };
        let sql = render(&options);
        assert!(!sql.contains("csv quote as"));
        assert!(sql.contains("escape"));
    }

    #[test]
    fn test_non_comma_delimiter_suppresses_csv_quote() {
        let options = LoadOptions {
            delimiter: "|".to_string(),
            ..Default::default()
        };
        let sql = render(&options);
        assert!(sql.contains("delimiter '|'"));
        assert!(!sql.contains("csv quote as"));
    }

    #[test]
    fn test_boolean_clauses_rendered_exactly_once_when_set() {
        let options = LoadOptions {
            accept_any_date: true,
            blanks_as_null: true,
            empty_as_null: true,
            fill_record: true,
            trim_blanks: true,
            truncate_columns: true,
            ..Default::default()
        };
        let sql = render(&options);
        for keyword in [
            "acceptanydate",
            "blanksasnull",
            "emptyasnull",
            "fillrecord",
            "trimblanks",
            "truncatecolumns",
        ] {
            assert_eq!(
                sql.matches(keyword).count(),
                1,
                "expected exactly one '{}'",
                keyword
            );
        }
    }

    #[test]
    fn test_unset_boolean_clauses_are_omitted() {
        let sql = render(&LoadOptions::default());
        for keyword in [
            "acceptanydate",
            "blanksasnull",
            "emptyasnull",
            "explicit_ids",
            "fillrecord",
            "removequotes",
            "roundec",
            "trimblanks",
            "truncatecolumns",
            "ignoreblanklines",
        ] {
            assert!(!sql.contains(keyword), "unexpected clause: {}", keyword);
        }
    }

    #[test]
    fn test_value_clauses_render_when_present() {
        let options = LoadOptions {
            null_as: Some("NA".to_string()),
            encoding: Some("utf16".to_string()),
            region: Some("us-west-2".to_string()),
            ..Default::default()
        };
        let sql = render(&options);
        assert!(sql.contains("null as 'NA'"));
        assert!(sql.contains("encoding as utf16"));
        assert!(sql.ends_with("region 'us-west-2'"));
    }

    #[test]
    fn test_iam_role_replaces_key_pair() {
        let options = LoadOptions {
            iam_role: Some("arn:aws:iam::1:role/loader".to_string()),
            ..Default::default()
        };
        let sql = render(&options);
        assert!(sql.contains("iam_role 'arn:aws:iam::1:role/loader'"));
        assert!(!sql.contains("access_key_id"));
    }

    #[test]
    fn test_missing_credentials_fail_before_rendering() {
        let err = render_copy(
            "t",
            None,
            "bkt",
            "k",
            &LoadOptions::default(),
            &AwsCredentials::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TransferError::Configuration { .. }));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let options = LoadOptions {
            escape: true,
            null_as: Some("NA".to_string()),
            ..Default::default()
        };
        assert_eq!(render(&options), render(&options));
    }
}
