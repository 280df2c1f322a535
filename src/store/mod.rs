//! Append-only CSV record store, one file per record kind.

mod csv_table;
pub mod log;

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::record::{ID_FIELD, TIMESTAMP_FIELD, TIMESTAMP_FORMAT};
use crate::models::{Record, RecordKind, Table};
use chrono::Local;
use csv_table::{Corruption, parse_table};
pub(crate) use csv_table::write_table;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Result of reading a store file from disk.
enum Loaded {
    Missing,
    Table(Table),
    Corrupt(Corruption),
    Unreadable(io::Error),
}

/// Handle over the data directory holding all store files.
///
/// The handle is cheap and stateless: every call reads or rewrites the
/// backing file, so nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.data_path())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Backing file for `kind`.
    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Append one record and return its id.
    ///
    /// `id` and `timestamp` are filled in when absent. The whole table is
    /// rewritten to a temporary file and renamed over the old store, so a
    /// failed write leaves the previous content untouched.
    pub fn append(&self, kind: RecordKind, mut fields: Record) -> AppResult<String> {
        let path = self.path_for(kind);

        let mut quarantined = None;
        let mut table = match read_store(&path) {
            Loaded::Missing => Table::default(),
            Loaded::Table(t) => t,
            Loaded::Corrupt(reason) => {
                let moved = quarantine(&path)?;
                tracing::warn!(
                    store = kind.storage_name(),
                    reason = %reason,
                    moved_to = %moved.display(),
                    "corrupt store moved aside before append"
                );
                quarantined = Some(moved);
                Table::default()
            }
            // never overwrite a file we could not even read
            Loaded::Unreadable(e) => return Err(e.into()),
        };

        if fields.id().is_none() {
            fields.set(ID_FIELD, uuid::Uuid::new_v4().simple().to_string());
        }
        if fields.timestamp_raw().is_none() {
            fields.set(TIMESTAMP_FIELD, now_timestamp());
        }
        let id = fields.id().unwrap_or_default().to_string();

        table.push(fields);
        write_atomic(&path, &table)?;

        if let Some(moved) = quarantined {
            log::ttlog_quiet(
                self,
                "quarantine",
                kind.storage_name(),
                &format!("moved to {}", moved.display()),
            );
        }

        tracing::debug!(store = kind.storage_name(), %id, rows = table.len(), "record appended");
        Ok(id)
    }

    /// All records of `kind`, oldest first.
    ///
    /// Never fails: a missing file is an empty table, and so is a file that
    /// cannot be parsed (a warning is emitted).
    pub fn load(&self, kind: RecordKind) -> Table {
        match read_store(&self.path_for(kind)) {
            Loaded::Missing => Table::default(),
            Loaded::Table(t) => t,
            Loaded::Corrupt(reason) => {
                tracing::warn!(
                    store = kind.storage_name(),
                    reason = %reason,
                    "store file corrupt, treating as empty"
                );
                Table::default()
            }
            Loaded::Unreadable(e) => {
                tracing::warn!(
                    store = kind.storage_name(),
                    error = %e,
                    "store file unreadable, treating as empty"
                );
                Table::default()
            }
        }
    }

    /// Delete the whole store. Wiping an absent store is a no-op.
    pub fn wipe(&self, kind: RecordKind) -> AppResult<()> {
        match fs::remove_file(self.path_for(kind)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The full table as CSV bytes, or `None` when there is nothing to
    /// export.
    pub fn export(&self, kind: RecordKind) -> AppResult<Option<Vec<u8>>> {
        let table = self.load(kind);
        if table.is_empty() {
            return Ok(None);
        }

        let mut out = Vec::new();
        write_table(&table, &mut out)?;
        Ok(Some(out))
    }

    /// True when the backing file exists on disk.
    pub fn exists(&self, kind: RecordKind) -> bool {
        self.path_for(kind).exists()
    }
}

pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn read_store(path: &Path) -> Loaded {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Loaded::Missing,
        Err(e) => return Loaded::Unreadable(e),
    };

    match parse_table(&bytes) {
        Ok(t) => Loaded::Table(t),
        Err(c) => Loaded::Corrupt(c),
    }
}

/// Move an unreadable store aside so the next append does not destroy it.
fn quarantine(path: &Path) -> AppResult<PathBuf> {
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "store.csv".to_string());
    let target = path.with_file_name(format!("{file_name}.corrupt-{stamp}"));

    fs::rename(path, &target)?;
    Ok(target)
}

/// Write `table` next to `path` and atomically replace `path` with it.
fn write_atomic(path: &Path, table: &Table) -> AppResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_table(table, tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
