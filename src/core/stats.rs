use crate::export::TimeWindow;
use crate::export::aggregate::{in_time_window, mean_of, sum_by};
use crate::models::{Record, RecordKind};
use crate::store::RecordStore;
use crate::utils::table::{Column, Table};

pub struct StatsLogic;

impl StatsLogic {
    fn rows(store: &RecordStore, kind: RecordKind, window: Option<TimeWindow>) -> Vec<Record> {
        let rows = store.load(kind).rows;
        match window {
            Some(w) => in_time_window(&rows, w.start, w.end),
            None => rows,
        }
    }

    pub fn sum(
        store: &RecordStore,
        kind: RecordKind,
        group_field: &str,
        value_field: &str,
        window: Option<TimeWindow>,
    ) -> Vec<(String, f64)> {
        sum_by(&Self::rows(store, kind, window), group_field, value_field)
    }

    /// Mean and the number of rows it was computed over.
    pub fn mean(
        store: &RecordStore,
        kind: RecordKind,
        value_field: &str,
        window: Option<TimeWindow>,
    ) -> (f64, usize) {
        let rows = Self::rows(store, kind, window);
        let counted = rows.iter().filter(|r| r.get_f64(value_field).is_some()).count();
        (mean_of(&rows, value_field), counted)
    }

    pub fn render_sum(group_field: &str, value_field: &str, totals: &[(String, f64)]) -> String {
        let mut table = Table::new(vec![
            Column::new(group_field),
            Column::right(&format!("sum({value_field})")),
        ]);
        for (group, total) in totals {
            let group = if group.is_empty() { "(none)" } else { group.as_str() };
            table.add_row(vec![group.to_string(), format_number(*total)]);
        }
        table.render()
    }
}

/// Whole numbers without decimals, the rest with two.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
