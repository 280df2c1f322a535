//! CSV/JSON export of the record stores and the read-only aggregation helpers.

pub mod aggregate;
pub(crate) mod fs_utils;
mod json_csv;
pub mod logic;
pub mod range;

pub use aggregate::ExportAggregator;
pub use json_csv::table_to_json;
pub use logic::ExportLogic;
pub use range::TimeWindow;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
