use super::field_value::FieldValue;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

pub const ID_FIELD: &str = "id";
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Timestamp format of the `timestamp` column (ISO-8601, local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One row of a store.
///
/// Cells are kept as text exactly as they sit in the CSV file; typed
/// accessors parse on demand. An empty cell is never stored: it reads back
/// as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for callers assembling a row.
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Store `value` under `field`. `Null` and empty text remove the field.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) {
        let cell = value.into().to_cell();
        self.set_cell(field, cell);
    }

    pub(crate) fn set_cell(&mut self, field: &str, cell: String) {
        if cell.is_empty() {
            self.fields.remove(field);
        } else {
            self.fields.insert(field.to_string(), cell);
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.get(ID_FIELD)
    }

    pub fn timestamp_raw(&self) -> Option<&str> {
        self.get(TIMESTAMP_FIELD)
    }

    /// Parsed `timestamp`. Accepts the native format, with or without
    /// fractional seconds, and RFC 3339 with an offset.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp_raw()?.trim();
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.with_timezone(&Local).naive_local())
            })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(|v| v.trim().parse().ok())
    }

    /// Numeric value; integer cells are accepted too.
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        match self.get(field)?.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        }
    }

    pub fn get_date(&self, field: &str) -> Option<NaiveDate> {
        self.get(field)
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
    }

    /// Multi-select values. JSON arrays are decoded; older space-joined
    /// cells are split on whitespace.
    pub fn get_list(&self, field: &str) -> Vec<String> {
        match self.get(field) {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<String>>(raw)
                .unwrap_or_else(|_| raw.split_whitespace().map(str::to_string).collect()),
        }
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A whole store: column names plus rows in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Add `field` as a trailing column if it is not there yet.
    /// Columns only ever grow.
    pub fn ensure_column(&mut self, field: &str) {
        if !self.columns.iter().any(|c| c == field) {
            self.columns.push(field.to_string());
        }
    }

    /// Append a row, growing the column set with any new field names.
    pub fn push(&mut self, record: Record) {
        self.ensure_column(ID_FIELD);
        self.ensure_column(TIMESTAMP_FIELD);
        let new_fields: Vec<String> = record
            .field_names()
            .filter(|f| !self.columns.iter().any(|c| c == f))
            .map(str::to_string)
            .collect();
        for f in new_fields {
            self.columns.push(f);
        }
        self.rows.push(record);
    }

    /// Rows sorted newest first by timestamp (stable for equal timestamps,
    /// most recent insert first).
    pub fn newest_first(&self) -> Vec<&Record> {
        let mut view: Vec<&Record> = self.rows.iter().rev().collect();
        view.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        view
    }
}
