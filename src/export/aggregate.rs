//! Read-only queries and aggregates over the stores.

use crate::models::{Record, RecordKind};
use crate::store::RecordStore;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Records whose `timestamp` lies in `[start, end]`. Rows without a
/// readable timestamp never match.
pub fn in_time_window(records: &[Record], start: NaiveDateTime, end: NaiveDateTime) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.timestamp().is_some_and(|ts| ts >= start && ts <= end))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on any of `fields`.
/// A blank needle keeps every record.
pub fn with_keyword(records: &[Record], fields: &[&str], needle: &str) -> Vec<Record> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| {
            fields.iter().any(|f| {
                r.get(f)
                    .map(|v| v.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

/// Sum of `value_field` per `group_field`, largest first (ties by name).
/// Rows with a missing or non-numeric value are skipped; a missing group
/// counts under the empty string.
pub fn sum_by(records: &[Record], group_field: &str, value_field: &str) -> Vec<(String, f64)> {
    let mut totals: HashMap<String, f64> = HashMap::new();

    for r in records {
        let Some(v) = r.get_f64(value_field) else {
            continue;
        };
        let key = r.get(group_field).unwrap_or("").to_string();
        *totals.entry(key).or_insert(0.0) += v;
    }

    let mut out: Vec<(String, f64)> = totals.into_iter().collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Arithmetic mean of `value_field`; 0 when nothing is numeric.
pub fn mean_of(records: &[Record], value_field: &str) -> f64 {
    let values: Vec<f64> = records.iter().filter_map(|r| r.get_f64(value_field)).collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Query front-end bound to one store directory. Never writes.
pub struct ExportAggregator<'a> {
    store: &'a RecordStore,
}

impl<'a> ExportAggregator<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Full table of `kind`, insertion order.
    pub fn all(&self, kind: RecordKind) -> Vec<Record> {
        self.store.load(kind).rows
    }

    pub fn filter_by_time_window(
        &self,
        kind: RecordKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<Record> {
        in_time_window(&self.all(kind), start, end)
    }

    pub fn filter_by_keyword(&self, kind: RecordKind, fields: &[&str], needle: &str) -> Vec<Record> {
        with_keyword(&self.all(kind), fields, needle)
    }

    pub fn aggregate_sum(
        &self,
        kind: RecordKind,
        group_field: &str,
        value_field: &str,
    ) -> Vec<(String, f64)> {
        sum_by(&self.all(kind), group_field, value_field)
    }

    pub fn aggregate_mean(&self, kind: RecordKind, value_field: &str) -> f64 {
        mean_of(&self.all(kind), value_field)
    }
}
