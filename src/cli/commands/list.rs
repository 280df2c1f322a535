use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::{HistoryLogic, HistoryQuery};
use crate::errors::AppResult;
use crate::export::TimeWindow;
use crate::store::RecordStore;
use crate::ui::messages::{header, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        kind,
        search,
        range,
        days,
        limit,
    } = cmd
    {
        let store = RecordStore::from_config(cfg);
        let query = HistoryQuery {
            search: search.clone(),
            window: TimeWindow::from_flags(range.as_deref(), *days)?,
            limit: limit.unwrap_or(cfg.history_limit),
        };

        let rows = HistoryLogic::select(&store, *kind, &query);
        if rows.is_empty() {
            warning(format!("No {} found.", kind.label().to_lowercase()));
            return Ok(());
        }

        header(format!("{} ({})", kind.label(), rows.len()));

        let width = crossterm::terminal::size()
            .map(|(w, _)| usize::from(w))
            .unwrap_or(80);
        for line in HistoryLogic::render(*kind, &rows, width, &cfg.separator_char) {
            println!("{line}");
        }
    }
    Ok(())
}
