//! Schema inference and column-name validation.
//!
//! Maps native dtype tags to warehouse column types and gates column names
//! against the reserved-word list before any DDL is rendered.

use crate::redstage::error::{TransferError, TransferResult};
use crate::redstage::schema::reserved::RESERVED_WORDS;
use crate::redstage::schema::types::{ColumnDefinition, TableDefinition};

/// Pairing of a column name with its native runtime type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTypeHint {
    pub name: String,
    pub dtype_tag: String,
}

impl ColumnTypeHint {
    pub fn new(name: impl Into<String>, dtype_tag: impl Into<String>) -> Self {
        ColumnTypeHint {
            name: name.into(),
            dtype_tag: dtype_tag.into(),
        }
    }
}

/// Map a native dtype tag to a warehouse data type.
///
/// Tags absent from the lookup fall back to the bounded-length string type.
fn map_dtype(tag: &str) -> &'static str {
    match tag {
        "int64" => "bigint",
        "int32" => "integer",
        "float64" => "double precision",
        "float32" => "real",
        "bool" => "boolean",
        "datetime64[ns]" => "timestamp",
        _ => "varchar(256)",
    }
}

/// Infer ordered column definitions from native type hints.
///
/// Pure lookup, never fails; unknown tags map to `varchar(256)`.
pub fn infer_column_definitions(hints: &[ColumnTypeHint]) -> Vec<(String, ColumnDefinition)> {
    hints
        .iter()
        .map(|hint| {
            (
                hint.name.clone(),
                ColumnDefinition::with_type(map_dtype(&hint.dtype_tag)),
            )
        })
        .collect()
}

/// Infer a full table definition (all table-level options default).
pub fn infer_table_definition(hints: &[ColumnTypeHint]) -> TableDefinition {
    TableDefinition::from_columns(infer_column_definitions(hints))
}

/// Check column names against the warehouse reserved words.
///
/// The match is case-sensitive, mirroring how the warehouse treats quoting:
/// an upper-cased reserved word is a legal identifier.
pub fn validate_column_names<S: AsRef<str>>(names: &[S]) -> TransferResult<()> {
    let invalid: Vec<String> = names
        .iter()
        .map(|n| n.as_ref())
        .filter(|n| RESERVED_WORDS.contains(n))
        .map(|n| n.to_string())
        .collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(TransferError::reserved_word(invalid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_map_to_warehouse_types() {
        let hints = vec![
            ColumnTypeHint::new("a", "int64"),
            ColumnTypeHint::new("b", "float64"),
            ColumnTypeHint::new("c", "bool"),
            ColumnTypeHint::new("d", "object"),
            ColumnTypeHint::new("e", "datetime64[ns]"),
        ];
        let defs = infer_column_definitions(&hints);
        let types: Vec<&str> = defs
            .iter()
            .map(|(_, d)| d.data_type.as_deref().unwrap())
            .collect();
        assert_eq!(
            types,
            vec![
                "bigint",
                "double precision",
                "boolean",
                "varchar(256)",
                "timestamp"
            ]
        );
    }

    #[test]
    fn test_unknown_tag_defaults_to_bounded_string() {
        let defs = infer_column_definitions(&[ColumnTypeHint::new("c", "category")]);
        assert_eq!(defs[0].1.data_type.as_deref(), Some("varchar(256)"));
    }

    #[test]
    fn test_inference_preserves_column_order() {
        let hints = vec![
            ColumnTypeHint::new("z", "int64"),
            ColumnTypeHint::new("a", "int64"),
        ];
        let defs = infer_column_definitions(&hints);
        assert_eq!(defs[0].0, "z");
        assert_eq!(defs[1].0, "a");
    }

    #[test]
    fn test_reserved_word_gate() {
        assert!(validate_column_names(&["valid_col"]).is_ok());

        let err = validate_column_names(&["select", "valid_col"]).unwrap_err();
        match err {
            TransferError::ReservedWord { columns } => {
                assert_eq!(columns, vec!["select".to_string()]);
            }
            other => panic!("Expected ReservedWord error, got {:?}", other),
        }
    }

    #[test]
    fn test_reserved_word_check_is_case_sensitive() {
        assert!(validate_column_names(&["SELECT"]).is_ok());
    }
}
