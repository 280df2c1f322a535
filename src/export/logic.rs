// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::aggregate::in_time_window;
use crate::export::fs_utils::{ensure_writable, require_absolute};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::range::TimeWindow;
use crate::models::{RecordKind, Table};
use crate::store::RecordStore;
use crate::store::log::ttlog_quiet;
use crate::ui::messages::warning;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one kind, or every kind, to CSV or JSON files.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one store to `file`.
    ///
    /// - `file`: absolute path of the output file
    /// - `window`: optional timestamp window (see `TimeWindow::from_flags`)
    ///
    /// Returns the written path, or `None` when nothing matched.
    pub fn export_kind(
        store: &RecordStore,
        kind: RecordKind,
        format: ExportFormat,
        file: &Path,
        window: Option<TimeWindow>,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        require_absolute(file)?;

        let table = select(store, kind, window);
        if table.is_empty() {
            warning(format!("No {} found for the selected range.", kind.label().to_lowercase()));
            return Ok(None);
        }

        ensure_writable(file, force)?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Csv => export_csv(&table, file)?,
            ExportFormat::Json => export_json(&table, file)?,
        }

        ttlog_quiet(
            store,
            "export",
            kind.storage_name(),
            &format!("{} rows to {}", table.len(), file.display()),
        );

        Ok(Some(file.to_path_buf()))
    }

    /// Export every journal store into `dir`, one `<storage_name>.<ext>`
    /// file per non-empty kind.
    pub fn export_all(
        store: &RecordStore,
        format: ExportFormat,
        dir: &Path,
        window: Option<TimeWindow>,
        force: bool,
    ) -> AppResult<Vec<PathBuf>> {
        require_absolute(dir)?;
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for kind in RecordKind::JOURNAL {
            let file = dir.join(format!("{}.{}", kind.storage_name(), format.as_str()));
            if let Some(p) = Self::export_kind(store, kind, format, &file, window, force)? {
                written.push(p);
            }
        }

        Ok(written)
    }
}

/// Store rows restricted to `window`, columns unchanged.
fn select(store: &RecordStore, kind: RecordKind, window: Option<TimeWindow>) -> Table {
    let mut table = store.load(kind);
    if let Some(w) = window {
        table.rows = in_time_window(&table.rows, w.start, w.end);
    }
    table
}
