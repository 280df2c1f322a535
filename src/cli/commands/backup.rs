use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::ui::messages::success;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let store = RecordStore::from_config(cfg);
        let written = BackupLogic::backup(&store, Path::new(file), *compress, *force)?;
        success(format!("Backup created: {}", written.display()));
    }

    Ok(())
}
