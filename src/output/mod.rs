//! Output formatting for command results.
//!
//! This module handles printing what a command returned:
//! - JSON (default), the resource exactly as the service returned it
//! - [`terminal`] - Table output, one quoted row per resource

mod terminal;

pub use terminal::{format_field, resource_group_of};

use crate::error::Result;
use clap::ValueEnum;
use colored::Colorize;
use itertools::Itertools;
use serde_json::Value;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Pretty printed JSON
    #[default]
    Json,
    /// One row per resource
    Table,
}

const COLUMNS: [(&str, usize); 4] = [
    ("Name", 24),
    ("ResourceGroup", 24),
    ("Location", 14),
    ("ProvisioningState", 19),
];

/// Write `value` to `out` in `format`.
pub fn write_value<W: Write>(value: &Value, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            writeln!(out, "{json}").map_err(io_error)?;
        }
        OutputFormat::Table => {
            let rows: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            };
            let header = COLUMNS
                .iter()
                .map(|(name, width)| format_field(name, *width))
                .join(",");
            writeln!(out, "{}", header.bold()).map_err(io_error)?;
            for row in rows {
                writeln!(out, "{}", table_row(row)).map_err(io_error)?;
            }
        }
    }
    Ok(())
}

fn table_row(item: &Value) -> String {
    let text = |v: Option<&Value>| v.and_then(Value::as_str).unwrap_or("").to_string();
    let resource_group = item
        .get("id")
        .and_then(Value::as_str)
        .and_then(resource_group_of)
        .unwrap_or("")
        .to_string();
    let cells = [
        text(item.get("name")),
        resource_group,
        text(item.get("location")),
        text(item.pointer("/properties/provisioningState")),
    ];
    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| format_field(cell, *width))
        .join(",")
}

fn io_error(e: std::io::Error) -> crate::error::VwanError {
    crate::error::VwanError::Remote(format!("Error writing output: {e}"))
}
