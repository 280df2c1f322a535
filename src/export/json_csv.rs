// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::Table;
use crate::store::write_table;
use crate::ui::messages::info;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Rows as JSON objects; absent values are `null`.
pub fn table_to_json(table: &Table) -> Value {
    let rows = table
        .rows
        .iter()
        .map(|r| {
            let obj: Map<String, Value> = table
                .columns
                .iter()
                .map(|c| {
                    let v = r
                        .get(c)
                        .map(|s| Value::String(s.to_string()))
                        .unwrap_or(Value::Null);
                    (c.clone(), v)
                })
                .collect();
            Value::Object(obj)
        })
        .collect();
    Value::Array(rows)
}

/// Export JSON pretty-printed.
pub(crate) fn export_json(table: &Table, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(&table_to_json(table))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV, same layout as the store file.
pub(crate) fn export_csv(table: &Table, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let file = File::create(path)?;
    write_table(table, BufWriter::new(file))?;

    notify_export_success("CSV", path);
    Ok(())
}
