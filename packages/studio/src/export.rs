//! Export of extraction results as JSON, CSV or a plain-text outline.
//!
//! CSV holds exactly one data row: nested objects are flattened into dotted
//! column names and arrays are joined into a single `; `-separated cell.
//! Results with several records do not fit this shape.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StudioError};

/// Column used when the result is not an object.
pub const SCALAR_COLUMN: &str = "value";

const ARRAY_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "extracted-data.json",
            ExportFormat::Csv => "extracted-data.csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv;charset=utf-8",
        }
    }

    pub fn render(&self, value: &Value) -> Result<String> {
        match self {
            ExportFormat::Json => to_json(value),
            ExportFormat::Csv => to_csv(value),
        }
    }
}

/// Pretty-printed JSON.
pub fn to_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Nested containers inside an array cell stay compact JSON.
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(ARRAY_SEPARATOR),
        other => scalar_text(other),
    }
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Vec<(String, String)>) {
    let Value::Object(map) = value else {
        out.push((prefix.to_string(), cell_text(value)));
        return;
    };
    for (key, child) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match child {
            Value::Object(_) => flatten_into(child, &path, out),
            other => out.push((path, cell_text(other))),
        }
    }
}

/// Flatten a result into `(column, cell)` pairs in document order.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    match value {
        Value::Object(_) => flatten_into(value, "", &mut out),
        other => out.push((SCALAR_COLUMN.to_string(), cell_text(other))),
    }
    out
}

fn write_row(buf: Vec<u8>, style: csv::QuoteStyle, row: &[&str]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(style)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buf);
    writer
        .write_record(row)
        .map_err(|e| StudioError::Export(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| StudioError::Export(e.to_string()))
}

/// Header row plus one fully quoted data row. A result with no columns
/// exports as an empty document.
pub fn to_csv(value: &Value) -> Result<String> {
    let flat = flatten(value);
    if flat.is_empty() {
        return Ok(String::new());
    }

    let headers: Vec<&str> = flat.iter().map(|(k, _)| k.as_str()).collect();
    let cells: Vec<&str> = flat.iter().map(|(_, v)| v.as_str()).collect();

    let buf = write_row(Vec::new(), csv::QuoteStyle::Necessary, &headers)?;
    let buf = write_row(buf, csv::QuoteStyle::Always, &cells)?;
    String::from_utf8(buf).map_err(|e| StudioError::Export(e.to_string()))
}

fn outline_into(value: &Value, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if child.is_object() || child.is_array() {
                    let _ = writeln!(out, "{pad}{key}:");
                    outline_into(child, depth + 1, out);
                } else {
                    let _ = writeln!(out, "{pad}{key}: {}", scalar_text(child));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    let _ = writeln!(out, "{pad}-");
                    outline_into(item, depth + 1, out);
                } else {
                    let _ = writeln!(out, "{pad}- {}", scalar_text(item));
                }
            }
        }
        scalar => {
            let _ = writeln!(out, "{pad}{}", scalar_text(scalar));
        }
    }
}

/// Indented plain-text view of a result tree.
pub fn render_outline(value: &Value) -> String {
    let mut out = String::new();
    outline_into(value, 0, &mut out);
    out
}
