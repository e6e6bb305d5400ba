//! Declarative column and table definitions.
//!
//! These types describe a warehouse table the way a `create table` statement
//! does: per-column data types, defaults and physical-layout flags, plus
//! table-level constraint and distribution options. The DDL renderer turns
//! them into statement text; nothing here touches the warehouse.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A column default literal.
///
/// Numeric defaults render unquoted; text defaults render single-quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Integer(i) => write!(f, "{}", i),
            DefaultValue::Float(v) => write!(f, "{}", v),
            DefaultValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// Table distribution style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistStyle {
    #[default]
    Even,
    Key,
    All,
}

impl fmt::Display for DistStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistStyle::Even => write!(f, "even"),
            DistStyle::Key => write!(f, "key"),
            DistStyle::All => write!(f, "all"),
        }
    }
}

impl FromStr for DistStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "even" => Ok(DistStyle::Even),
            "key" => Ok(DistStyle::Key),
            "all" => Ok(DistStyle::All),
            _ => Err(format!("Unknown distribution style: {}", s)),
        }
    }
}

/// Sort key style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortStyle {
    #[default]
    Compound,
    Interleaved,
}

impl fmt::Display for SortStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortStyle::Compound => write!(f, "compound"),
            SortStyle::Interleaved => write!(f, "interleaved"),
        }
    }
}

impl FromStr for SortStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compound" => Ok(SortStyle::Compound),
            "interleaved" => Ok(SortStyle::Interleaved),
            _ => Err(format!("Unknown sort style: {}", s)),
        }
    }
}

/// Declarative description of a single warehouse column.
///
/// Every field is optional in the statement sense: unset fields simply omit
/// their clause and the warehouse default applies. An unset `data_type`
/// renders as the bounded-length string type `varchar(256)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Warehouse data type; `None` falls back to `varchar(256)`
    pub data_type: Option<String>,
    /// Default literal for the column
    pub default: Option<DefaultValue>,
    /// Auto-increment `(seed, step)` pair
    pub identity: Option<(i64, i64)>,
    /// Compression encoding hint
    pub encode: Option<String>,
    pub distkey: bool,
    pub sortkey: bool,
    /// Defaults to true; false renders `not null`
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    /// Referenced table for a column-level foreign key
    pub references: Option<String>,
    /// Copy the structure of another table
    pub like: Option<String>,
}

impl Default for ColumnDefinition {
    fn default() -> Self {
        ColumnDefinition {
            data_type: None,
            default: None,
            identity: None,
            encode: None,
            distkey: false,
            sortkey: false,
            nullable: true,
            unique: false,
            primary_key: false,
            references: None,
            like: None,
        }
    }
}

impl ColumnDefinition {
    /// A column of the given warehouse data type, everything else default.
    pub fn with_type(data_type: impl Into<String>) -> Self {
        ColumnDefinition {
            data_type: Some(data_type.into()),
            ..Default::default()
        }
    }
}

/// Ordered column definitions plus table-level options.
///
/// Column order is preserved: it is the order columns appear in the rendered
/// `create table` statement and therefore the order the staged file must use.
///
/// The renderer is deliberately permissive: it does not check that
/// `foreign_key` and `references` have matching arity, nor that only one
/// column carries the distribution key. The warehouse remains the authority
/// on those constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableDefinition {
    /// Column name to definition, in table order
    pub columns: Vec<(String, ColumnDefinition)>,
    pub temp: bool,
    pub if_not_exists: bool,
    /// Renders `backup yes` / `backup no` when set
    pub backup: Option<bool>,
    /// Table-level unique constraint column list
    pub unique: Option<Vec<String>>,
    /// Table-level primary key column
    pub primary_key: Option<String>,
    /// Table-level foreign key column list; must match `references`
    pub foreign_key: Option<Vec<String>>,
    /// Referenced column list; must match `foreign_key`
    pub references: Option<Vec<String>>,
    pub diststyle: Option<DistStyle>,
    /// Distribution key column, rendered as `distkey(col)`
    pub distkey: Option<String>,
    pub sortstyle: SortStyle,
    pub sortkey: Option<Vec<String>>,
    /// Emit and execute `drop table if exists` before the create statement
    pub drop_first: bool,
}

impl TableDefinition {
    /// A table definition holding only columns, all table options default.
    pub fn from_columns(columns: Vec<(String, ColumnDefinition)>) -> Self {
        TableDefinition {
            columns,
            ..Default::default()
        }
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_value_quoting() {
        assert_eq!(DefaultValue::Integer(0).to_string(), "0");
        assert_eq!(DefaultValue::Float(1.5).to_string(), "1.5");
        assert_eq!(
            DefaultValue::Text("pending".to_string()).to_string(),
            "'pending'"
        );
    }

    #[test]
    fn test_style_display_and_parse() {
        assert_eq!(DistStyle::Key.to_string(), "key");
        assert_eq!("ALL".parse::<DistStyle>().unwrap(), DistStyle::All);
        assert_eq!(SortStyle::Interleaved.to_string(), "interleaved");
        assert!("zigzag".parse::<SortStyle>().is_err());
    }

    #[test]
    fn test_nullable_defaults_true() {
        let def = ColumnDefinition::default();
        assert!(def.nullable);
        assert!(def.data_type.is_none());
    }
}
