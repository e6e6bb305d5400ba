//! In-memory tabular representation.
//!
//! This module contains the column-oriented table type that transfers move in
//! and out of the warehouse:
//! - [`FieldValue`] - the value type system for table cells
//! - [`DType`] - per-column native type tags used by schema inference
//! - [`Column`] / [`Frame`] - named columns and the table holding them
//!
//! Frames are constructed fresh per transfer call and are never persisted by
//! this crate; the warehouse remains the source of truth for table data.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

use crate::redstage::error::{TransferError, TransferResult};
use crate::redstage::schema::ColumnTypeHint;

/// A value in a table cell.
///
/// This enum covers the types the delimited-text codec round-trips. Anything
/// richer is carried as `String` and mapped to the bounded-length string type
/// by schema inference.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Boolean value (true/false)
    Boolean(bool),
    /// Timestamp (YYYY-MM-DD HH:MM:SS[.nnn])
    Timestamp(NaiveDateTime),
    /// SQL NULL value
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            // Debug formatting keeps a trailing ".0" on whole floats, so a
            // float field never decodes back as an integer.
            FieldValue::Float(v) => write!(f, "{:?}", v),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Timestamp(t) => write!(f, "{}", t),
            FieldValue::Null => write!(f, ""),
        }
    }
}

impl FieldValue {
    /// Parse a delimited-text field back into a typed value.
    ///
    /// Tries integer, then float, then boolean, then timestamp; anything else
    /// stays a string. Empty fields decode as NULL.
    pub fn infer_from_str(raw: &str) -> FieldValue {
        if raw.is_empty() {
            return FieldValue::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return FieldValue::Integer(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return FieldValue::Float(f);
        }
        match raw {
            "true" | "True" => return FieldValue::Boolean(true),
            "false" | "False" => return FieldValue::Boolean(false),
            _ => {}
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return FieldValue::Timestamp(ts);
        }
        FieldValue::String(raw.to_string())
    }

    /// The dtype a value of this variant naturally belongs to.
    pub fn dtype(&self) -> Option<DType> {
        match self {
            FieldValue::Integer(_) => Some(DType::Int64),
            FieldValue::Float(_) => Some(DType::Float64),
            FieldValue::String(_) => Some(DType::Object),
            FieldValue::Boolean(_) => Some(DType::Bool),
            FieldValue::Timestamp(_) => Some(DType::Datetime),
            FieldValue::Null => None,
        }
    }
}

/// Native type tag of a column, mirroring the runtime dtypes of the in-memory
/// tables this crate exchanges data with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int64,
    Float64,
    Bool,
    /// Generic object/string column, the fallback for anything untyped
    Object,
    Datetime,
}

impl DType {
    /// The tag string consumed by schema inference.
    pub fn tag(&self) -> &'static str {
        match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Bool => "bool",
            DType::Object => "object",
            DType::Datetime => "datetime64[ns]",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for DType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int64" => Ok(DType::Int64),
            "float64" => Ok(DType::Float64),
            "bool" => Ok(DType::Bool),
            "object" => Ok(DType::Object),
            "datetime64[ns]" => Ok(DType::Datetime),
            _ => Err(format!("Unknown dtype tag: {}", s)),
        }
    }
}

/// A named, typed column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: DType,
    pub values: Vec<FieldValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: DType, values: Vec<FieldValue>) -> Self {
        Column {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// Convenience constructor for an integer column.
    pub fn from_i64(name: impl Into<String>, values: Vec<i64>) -> Self {
        Column::new(
            name,
            DType::Int64,
            values.into_iter().map(FieldValue::Integer).collect(),
        )
    }

    /// Convenience constructor for a string column.
    pub fn from_strings(name: impl Into<String>, values: Vec<&str>) -> Self {
        Column::new(
            name,
            DType::Object,
            values
                .into_iter()
                .map(|s| FieldValue::String(s.to_string()))
                .collect(),
        )
    }
}

/// A column-oriented in-memory table, with an optional row-label index.
///
/// The index is serialized as the leading column when the CSV options ask for
/// it, which in turn makes the loader prepend an inferred index column to the
/// target table definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
    index: Option<Column>,
}

impl Frame {
    /// Build a frame from columns, validating that lengths agree.
    pub fn new(columns: Vec<Column>) -> TransferResult<Self> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for col in &columns {
                if col.values.len() != expected {
                    return Err(TransferError::schema(format!(
                        "column '{}' has {} rows, expected {}",
                        col.name,
                        col.values.len(),
                        expected
                    )));
                }
            }
        }
        Ok(Frame {
            columns,
            index: None,
        })
    }

    /// Attach a row-label index column.
    pub fn with_index(mut self, index: Column) -> TransferResult<Self> {
        if index.values.len() != self.num_rows() {
            return Err(TransferError::schema(format!(
                "index has {} rows, expected {}",
                index.values.len(),
                self.num_rows()
            )));
        }
        self.index = Some(index);
        Ok(self)
    }

    /// Shape a fetched query result into a frame.
    ///
    /// Column dtypes are derived from the first non-null value in each
    /// column; an all-null column falls back to the object dtype.
    pub fn from_query(columns: Vec<String>, rows: Vec<Vec<FieldValue>>) -> TransferResult<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TransferError::schema(format!(
                    "row {} has {} fields, expected {}",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
        }
        let built = columns
            .into_iter()
            .enumerate()
            .map(|(c, name)| {
                let values: Vec<FieldValue> = rows.iter().map(|row| row[c].clone()).collect();
                let dtype = values
                    .iter()
                    .find_map(|v| v.dtype())
                    .unwrap_or(DType::Object);
                Column::new(name, dtype, values)
            })
            .collect();
        Frame::new(built)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn index(&self) -> Option<&Column> {
        self.index.as_ref()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Type hints for schema inference, one per column in order.
    pub fn type_hints(&self) -> Vec<ColumnTypeHint> {
        self.columns
            .iter()
            .map(|c| ColumnTypeHint::new(c.name.clone(), c.dtype.tag()))
            .collect()
    }

    /// Type hint for the index column, when one is attached.
    pub fn index_type_hint(&self) -> Option<ColumnTypeHint> {
        self.index
            .as_ref()
            .map(|c| ColumnTypeHint::new(c.name.clone(), c.dtype.tag()))
    }

    /// Materialized rows sorted by their rendered text, for row-order
    /// independent comparisons in tests and reconciliation checks.
    pub fn sorted_rows(&self) -> Vec<Vec<FieldValue>> {
        let mut rows: Vec<Vec<FieldValue>> = (0..self.num_rows())
            .map(|r| self.columns.iter().map(|c| c.values[r].clone()).collect())
            .collect();
        rows.sort_by_key(|row| {
            row.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("\u{1f}")
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rejects_uneven_columns() {
        let result = Frame::new(vec![
            Column::from_i64("a", vec![1, 2, 3]),
            Column::from_strings("b", vec!["x", "y"]),
        ]);
        assert!(matches!(result, Err(TransferError::Schema { .. })));
    }

    #[test]
    fn test_frame_index_must_match_row_count() {
        let frame = Frame::new(vec![Column::from_i64("a", vec![1, 2])]).unwrap();
        let result = frame.with_index(Column::from_i64("idx", vec![0]));
        assert!(matches!(result, Err(TransferError::Schema { .. })));
    }

    #[test]
    fn test_type_hints_follow_column_order() {
        let frame = Frame::new(vec![
            Column::from_i64("a", vec![1]),
            Column::from_strings("b", vec!["x"]),
        ])
        .unwrap();
        let hints = frame.type_hints();
        assert_eq!(hints.len(), 2);
        assert_eq!(hints[0].name, "a");
        assert_eq!(hints[0].dtype_tag, "int64");
        assert_eq!(hints[1].dtype_tag, "object");
    }

    #[test]
    fn test_from_query_infers_dtype_from_first_non_null() {
        let frame = Frame::from_query(
            vec!["n".to_string()],
            vec![
                vec![FieldValue::Null],
                vec![FieldValue::Integer(7)],
                vec![FieldValue::Null],
            ],
        )
        .unwrap();
        assert_eq!(frame.columns()[0].dtype, DType::Int64);
    }

    #[test]
    fn test_whole_floats_render_with_fraction() {
        assert_eq!(FieldValue::Float(2.0).to_string(), "2.0");
        assert_eq!(FieldValue::Float(1.5).to_string(), "1.5");
        assert_eq!(
            FieldValue::infer_from_str(&FieldValue::Float(2.0).to_string()),
            FieldValue::Float(2.0)
        );
    }

    #[test]
    fn test_infer_from_str_precedence() {
        assert_eq!(FieldValue::infer_from_str("42"), FieldValue::Integer(42));
        assert_eq!(FieldValue::infer_from_str("4.5"), FieldValue::Float(4.5));
        assert_eq!(
            FieldValue::infer_from_str("true"),
            FieldValue::Boolean(true)
        );
        assert_eq!(FieldValue::infer_from_str(""), FieldValue::Null);
        assert_eq!(
            FieldValue::infer_from_str("hello"),
            FieldValue::String("hello".to_string())
        );
    }
}
