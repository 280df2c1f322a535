use crate::cli::parser::{Commands, KindSelector};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, TimeWindow};
use crate::store::RecordStore;
use crate::ui::messages::warning;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        kind,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let store = RecordStore::from_config(cfg);
        let window = TimeWindow::from_flags(range.as_deref(), None)?;
        let path = Path::new(file);

        match kind {
            KindSelector::One(k) => {
                ExportLogic::export_kind(&store, *k, *format, path, window, *force)?;
            }
            KindSelector::All => {
                let written = ExportLogic::export_all(&store, *format, path, window, *force)?;
                if written.is_empty() {
                    warning("Nothing to export.");
                }
            }
        }
    }
    Ok(())
}
