use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::wipe::WipeLogic;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm_stdin;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Wipe { kind, yes } = cmd {
        let kinds = kind.kinds();
        let names: Vec<&str> = kinds.iter().map(|k| k.storage_name()).collect();

        if !*yes {
            warning(format!("This deletes every entry of: {}", names.join(", ")));
            if !confirm_stdin("Continue?")? {
                info("Nothing deleted.");
                return Ok(());
            }
        }

        let store = RecordStore::from_config(cfg);
        let wiped = WipeLogic::wipe(&store, &kinds)?;
        if wiped.is_empty() {
            info("Nothing to delete.");
        } else {
            for k in wiped {
                success(format!("{} deleted.", k.label()));
            }
        }
    }
    Ok(())
}
