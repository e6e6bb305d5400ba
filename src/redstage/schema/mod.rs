//! Schema inference and declarative table definitions.
//!
//! The types here describe what a warehouse table should look like; the
//! `sql::ddl` module turns them into statement text. Inference maps native
//! dtype tags of in-memory tables to warehouse column types, and the
//! reserved-word gate rejects column names the warehouse would choke on.

pub mod inference;
pub mod reserved;
pub mod types;

pub use inference::{
    infer_column_definitions, infer_table_definition, validate_column_names, ColumnTypeHint,
};
pub use reserved::RESERVED_WORDS;
pub use types::{ColumnDefinition, DefaultValue, DistStyle, SortStyle, TableDefinition};
