#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rcalmlog::models::{Record, RecordKind};
use rcalmlog::store::RecordStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn rcl() -> Command {
    cargo_bin_cmd!("rcalmlog")
}

/// Isolated data directory, removed when dropped.
pub struct Journal {
    pub dir: TempDir,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }

    pub fn store(&self) -> RecordStore {
        RecordStore::new(self.dir.path())
    }

    /// CLI command bound to this journal, in test mode.
    pub fn cmd(&self) -> Command {
        let mut cmd = rcl();
        cmd.args(["--test", "--data-dir", &self.data_dir()]);
        cmd
    }

    pub fn file(&self, kind: RecordKind) -> PathBuf {
        self.store().path_for(kind)
    }
}

/// Temporary directory for export/backup outputs.
pub fn out_dir() -> TempDir {
    TempDir::new().expect("create output dir")
}

/// A study block with a fixed timestamp.
pub fn study(ts: &str, subject: &str, minutes: i64) -> Record {
    Record::new()
        .with("timestamp", ts)
        .with("subject", subject)
        .with("minutes", minutes)
}

/// Append a few study blocks spread over 2025.
pub fn seed_study(store: &RecordStore) {
    for r in [
        study("2025-01-10T08:00:00", "math", 30),
        study("2025-03-02T09:30:00", "history", 45),
        study("2025-03-15T18:00:00", "math", 20),
        study("2025-09-01T07:15:00", "Rust ownership", 60),
    ] {
        store.append(RecordKind::StudyBlock, r).expect("append");
    }
}
