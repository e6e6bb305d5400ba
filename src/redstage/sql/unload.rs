//! Bulk-unload (`unload`) statement rendering.
//!
//! Turns a query plus destination and an [`UnloadOptions`] bag into an
//! `unload` statement. Format-specific exclusivity rules are enforced before
//! any statement text exists: at most one compression codec, and columnar
//! output rejects every row-oriented text option.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::redstage::config::AwsCredentials;
use crate::redstage::error::{TransferError, TransferResult};
use crate::redstage::sql::auth::push_auth_clauses;
use crate::redstage::sql::clause::ClauseList;
use crate::redstage::sql::collapse_sql;

/// Output file format of an unload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnloadFormat {
    /// Row-oriented delimited text (or fixed width)
    #[default]
    Text,
    /// Columnar output; incompatible with all row-text options
    Parquet,
}

impl fmt::Display for UnloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnloadFormat::Text => write!(f, "text"),
            UnloadFormat::Parquet => write!(f, "parquet"),
        }
    }
}

/// Options governing a bulk-unload statement.
///
/// Neutral by default: only `parallel ON` is rendered from a default bag, so
/// the same defaults are valid for both text and columnar output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnloadOptions {
    pub format: UnloadFormat,
    /// Write a manifest file alongside the output
    pub manifest: bool,
    /// Field delimiter; `None` renders the warehouse default `|` in text mode
    pub delimiter: Option<String>,
    /// Fixed-width column spec, the alternative row layout to a delimiter
    pub fixed_width: Option<String>,
    pub encrypted: bool,
    pub bzip2: bool,
    pub gzip: bool,
    pub zstd: bool,
    pub add_quotes: bool,
    /// The NULL AS string
    pub null_as: Option<String>,
    pub escape: bool,
    /// Include a header line in each output file
    pub header: bool,
    pub allow_overwrite: bool,
    /// `ON` or `OFF`; `None` omits the clause
    pub parallel: Option<String>,
    /// MAXFILESIZE argument, e.g. `100 mb`
    pub max_file_size: Option<String>,
    /// Columns to partition the output by
    pub partition_by: Option<Vec<String>>,
    /// Retain partition columns in the output files
    pub partition_include: bool,
    /// Destination bucket region when it differs from the cluster's
    pub region: Option<String>,
    /// IAM role authorization; overrides the static key pair when present
    pub iam_role: Option<String>,
}

impl Default for UnloadOptions {
    fn default() -> Self {
        UnloadOptions {
            format: UnloadFormat::Text,
            manifest: false,
            delimiter: None,
            fixed_width: None,
            encrypted: false,
            bzip2: false,
            gzip: false,
            zstd: false,
            add_quotes: false,
            null_as: None,
            escape: false,
            header: false,
            allow_overwrite: false,
            parallel: Some("ON".to_string()),
            max_file_size: None,
            partition_by: None,
            partition_include: false,
            region: None,
            iam_role: None,
        }
    }
}

impl UnloadOptions {
    fn compression_count(&self) -> usize {
        [self.bzip2, self.gzip, self.zstd]
            .iter()
            .filter(|&&c| c)
            .count()
    }

    /// Validate option interactions; every violation is a configuration
    /// error raised before rendering.
    fn validate(&self) -> TransferResult<()> {
        if self.compression_count() > 1 {
            return Err(TransferError::configuration(
                "only one of [bzip2, gzip, zstd] may be set",
            ));
        }
        match self.format {
            UnloadFormat::Parquet => {
                let row_text_options = [
                    (self.delimiter.is_some(), "delimiter"),
                    (self.fixed_width.is_some(), "fixedwidth"),
                    (self.add_quotes, "addquotes"),
                    (self.escape, "escape"),
                    (self.null_as.is_some(), "null"),
                    (self.header, "header"),
                    (self.compression_count() > 0, "compression"),
                ];
                for (set, name) in row_text_options {
                    if set {
                        return Err(TransferError::configuration(format!(
                            "{} is not supported with parquet output",
                            name
                        )));
                    }
                }
            }
            UnloadFormat::Text => {
                if self.delimiter.is_some() && self.fixed_width.is_some() {
                    return Err(TransferError::configuration(
                        "delimiter and fixedwidth are alternative row layouts; set at most one",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Render an `unload` statement exporting a query result to object storage.
///
/// The query is embedded as a single-quoted literal; embedded newlines are
/// replaced with spaces because not every dialect parser accepts them inside
/// a quoted literal. Single quotes inside the query must already be doubled
/// by the caller.
pub fn render_unload(
    query: &str,
    destination_uri: &str,
    options: &UnloadOptions,
    credentials: &AwsCredentials,
) -> TransferResult<String> {
    options.validate()?;

    let flattened = query.replace('\n', " ");

    let mut clauses = ClauseList::new();
    clauses.raw(format!("unload ('{}')", flattened));
    clauses.raw(format!("to '{}'", destination_uri));
    if options.format == UnloadFormat::Parquet {
        clauses.raw("format as parquet");
    }
    if let Some(partition_by) = &options.partition_by {
        let include = if options.partition_include {
            " include"
        } else {
            ""
        };
        clauses.raw(format!(
            "partition by ({}){}",
            partition_by.join(", "),
            include
        ));
    }
    clauses.keyword(options.manifest, "manifest");
    clauses.keyword(options.header, "header");
    if options.format == UnloadFormat::Text {
        if let Some(fixed_width) = &options.fixed_width {
            clauses.quoted("fixedwidth", Some(fixed_width));
        } else {
            let delimiter = options.delimiter.as_deref().unwrap_or("|");
            clauses.quoted("delimiter", Some(delimiter));
        }
    }
    clauses.keyword(options.encrypted, "encrypted");
    clauses.keyword(options.bzip2, "bzip2");
    clauses.keyword(options.gzip, "gzip");
    clauses.keyword(options.zstd, "zstd");
    clauses.keyword(options.add_quotes, "addquotes");
    clauses.quoted("null as", options.null_as.as_deref());
    clauses.keyword(options.escape, "escape");
    clauses.keyword(options.allow_overwrite, "allowoverwrite");
    clauses.value("parallel", options.parallel.as_deref());
    clauses.quoted("maxfilesize", options.max_file_size.as_deref());
    push_auth_clauses(&mut clauses, credentials, options.iam_role.as_deref())?;
    clauses.quoted("region", options.region.as_deref());

    Ok(collapse_sql(&clauses.render()))
}
