use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Effective configuration as YAML, after defaults and overrides.
    pub fn render(cfg: &Config) -> AppResult<String> {
        Ok(serde_yaml::to_string(cfg)?)
    }

    /// Default editor: $EDITOR, then $VISUAL, then a platform default.
    pub fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    /// Open `path` in `editor`, falling back to the default editor when the
    /// requested one fails. Returns the editor that succeeded.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<String> {
        let fallback = Self::default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        if matches!(Command::new(&requested).arg(path).status(), Ok(s) if s.success()) {
            return Ok(requested);
        }

        tracing::warn!(editor = %requested, fallback = %fallback, "editor failed, trying fallback");
        match Command::new(&fallback).arg(path).status() {
            Ok(s) if s.success() => Ok(fallback),
            Ok(s) => Err(AppError::Config(format!("editor '{fallback}' exited with {s}"))),
            Err(e) => Err(AppError::Config(format!("cannot run editor '{fallback}': {e}"))),
        }
    }
}
