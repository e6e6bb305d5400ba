//! `create table` / `drop table` rendering.
//!
//! Column clauses render in a fixed order: data type, default, identity,
//! encode, distkey, sortkey, nullability, unique, primary key, references,
//! like. The order reproduces a previously validated sequence; some dialects
//! parse column options positionally, so it is not cosmetic.

use crate::redstage::schema::{ColumnDefinition, TableDefinition};
use crate::redstage::sql::clause::ClauseList;
use crate::redstage::sql::collapse_sql;

/// Render the option clauses of a single column definition.
///
/// Pure function: identical input renders byte-identical output. Unset fields
/// contribute nothing; redundant whitespace is collapsed.
pub fn render_column(def: &ColumnDefinition) -> String {
    let mut parts: Vec<String> = Vec::new();
    parts.push(
        def.data_type
            .clone()
            .unwrap_or_else(|| "varchar(256)".to_string()),
    );
    if let Some(default) = &def.default {
        parts.push(format!("default {}", default));
    }
    if let Some((seed, step)) = def.identity {
        parts.push(format!("identity({}, {})", seed, step));
    }
    if let Some(encode) = &def.encode {
        parts.push(format!("encode {}", encode));
    }
    if def.distkey {
        parts.push("distkey".to_string());
    }
    if def.sortkey {
        parts.push("sortkey".to_string());
    }
    if !def.nullable {
        parts.push("not null".to_string());
    }
    if def.unique {
        parts.push("unique".to_string());
    }
    if def.primary_key {
        parts.push("primary key".to_string());
    }
    if let Some(references) = &def.references {
        parts.push(format!("references {}", references));
    }
    if let Some(like) = &def.like {
        parts.push(format!("like {}", like));
    }
    let rendered = parts.join(" ");
    rendered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render the full column list of a table, one column per line.
pub fn render_column_definitions(columns: &[(String, ColumnDefinition)]) -> String {
    columns
        .iter()
        .map(|(name, def)| format!("{} {}", name, render_column(def)))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Render a `drop table if exists` statement.
pub fn render_drop_table(table_name: &str) -> String {
    format!("drop table if exists {}", table_name)
}

/// Render a `create table` statement from a declarative definition.
///
/// Table-level clauses (backup, diststyle, constraints, distkey, sortkey)
/// render only when configured. The `drop_first` flag is the orchestrator's
/// concern; this function renders the create statement alone.
pub fn render_create_table(table_name: &str, def: &TableDefinition) -> String {
    let temp = if def.temp { " temp" } else { "" };
    let if_not_exists = if def.if_not_exists { " if not exists" } else { "" };

    let mut clauses = ClauseList::new();
    clauses.raw(format!(
        "create table{} {}{} (",
        temp, table_name, if_not_exists
    ));
    clauses.raw(render_column_definitions(&def.columns));
    clauses.raw(")");
    clauses.value(
        "backup",
        def.backup.map(|b| if b { "yes" } else { "no" }),
    );
    clauses.value("diststyle", def.diststyle);
    if let Some(unique) = &def.unique {
        clauses.raw(format!("unique ({})", unique.join(", ")));
    }
    if let Some(primary_key) = &def.primary_key {
        clauses.raw(format!("primary key ({})", primary_key));
    }
    if let Some(foreign_key) = &def.foreign_key {
        clauses.raw(format!("foreign key ({})", foreign_key.join(", ")));
    }
    if let Some(references) = &def.references {
        clauses.raw(format!("references ({})", references.join(", ")));
    }
    if let Some(distkey) = &def.distkey {
        clauses.raw(format!("distkey({})", distkey));
    }
    if let Some(sortkey) = &def.sortkey {
        clauses.raw(format!("{} sortkey({})", def.sortstyle, sortkey.join(", ")));
    }
    collapse_sql(&clauses.render())
}
