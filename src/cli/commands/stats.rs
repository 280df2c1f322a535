use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::{StatsLogic, format_number};
use crate::errors::{AppError, AppResult};
use crate::export::TimeWindow;
use crate::store::RecordStore;
use crate::ui::messages::{header, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        kind,
        sum_by,
        value,
        mean,
        range,
        days,
    } = cmd
    {
        let store = RecordStore::from_config(cfg);
        let window = TimeWindow::from_flags(range.as_deref(), *days)?;

        match (sum_by, value, mean) {
            (Some(group), Some(value), None) => {
                let totals = StatsLogic::sum(&store, *kind, group, value, window);
                if totals.is_empty() {
                    warning(format!("No numeric '{value}' values in {}.", kind.label().to_lowercase()));
                    return Ok(());
                }
                header(kind.label());
                print!("{}", StatsLogic::render_sum(group, value, &totals));
            }
            (None, _, Some(field)) => {
                let (mean, counted) = StatsLogic::mean(&store, *kind, field, window);
                header(kind.label());
                println!("mean({field}) = {} over {counted} entries", format_number(mean));
            }
            _ => {
                return Err(AppError::Other(
                    "choose either --sum-by GROUP --value FIELD or --mean FIELD".to_string(),
                ));
            }
        }
    }
    Ok(())
}
