use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::ui::prompt::confirm_stdin;
use std::path::Path;

/// Output files are never replaced silently: an existing target needs
/// `--force` or a "y" on stdin.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("{} already exists.", path.display()));

    if confirm_stdin("Replace it?")? {
        info("Replacing existing file.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".to_string(),
        ))
    }
}

/// Output paths must be absolute, as for backups.
pub(crate) fn require_absolute(path: &Path) -> AppResult<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "output path must be absolute: {}",
            path.display()
        )))
    }
}
