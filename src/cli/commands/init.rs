use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::store::log::ttlog_quiet;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the data directory holding the CSV stores
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rCalmlog…");

    let cfg = Config::init_all(cli.data_dir.clone(), cli.test)?;

    let store = RecordStore::from_config(&cfg);
    ttlog_quiet(&store, "init", &cfg.data_dir, "data directory ready");

    println!("🎉 rCalmlog initialization completed!");
    Ok(())
}
