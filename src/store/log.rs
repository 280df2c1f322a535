use super::RecordStore;
use crate::errors::AppResult;
use crate::models::{Record, RecordKind};

/// Write an internal log line into the `activity_log` store.
pub fn ttlog(store: &RecordStore, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let row = Record::new()
        .with("operation", operation)
        .with("target", target)
        .with("message", message);

    store.append(RecordKind::ActivityLog, row)?;
    Ok(())
}

/// Same as [`ttlog`] but never fails: logging problems only warn.
pub fn ttlog_quiet(store: &RecordStore, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(store, operation, target, message) {
        tracing::warn!(%operation, error = %e, "failed to write internal log");
    }
}
