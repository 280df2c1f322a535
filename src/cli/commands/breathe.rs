use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::breathe::{BreathPlan, BreatheLogic, SleepClock, TerminalClock};
use crate::errors::{AppError, AppResult};
use crate::session::{FormId, SessionState};
use crate::store::RecordStore;
use crate::timer::{BreathPattern, GuidedTimer, TickReport, TimerState};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_line;
use std::io::{self, IsTerminal, Write};

const BAR_WIDTH: usize = 20;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Breathe {
        seconds,
        pattern,
        mood_before,
        mood_after,
        no_save,
    } = cmd
    {
        let form = FormId::Breath;
        let mut state = SessionState::from_config(cfg);

        if let Some(s) = seconds {
            state.set(form, "total_seconds", *s)?;
        }
        if let Some(p) = pattern {
            // reject a bad pattern before anything starts
            p.parse::<BreathPattern>()?;
            state.set(form, "pattern", p.as_str())?;
        }
        if let Some(m) = mood_before {
            state.set(form, "mood_before", *m)?;
        }
        let mood_after = mood_after.map(|m| check_mood("mood_after", i64::from(m))).transpose()?;

        let plan = BreatheLogic::plan(&mut state)?;
        let mut timer = GuidedTimer::new();
        announce(&plan);

        let interactive = io::stdin().is_terminal();
        let summary = if interactive {
            let mut clock = TerminalClock::new()?;
            BreatheLogic::run(&mut timer, &plan, &mut clock, draw)?
        } else {
            BreatheLogic::run(&mut timer, &plan, &mut SleepClock, draw)?
        };
        println!();

        match summary.outcome {
            TimerState::Completed => success(format!(
                "Session complete: {} cycles, {}s.",
                summary.cycles, summary.elapsed_seconds
            )),
            _ => info(format!("Stopped after {}s. That counts too.", summary.elapsed_seconds)),
        }

        let mood_after = match mood_after {
            Some(m) => Some(m),
            None if interactive && summary.outcome == TimerState::Completed => ask_mood_after()?,
            None => None,
        };

        if *no_save {
            info("Session not saved.");
            return Ok(());
        }

        let store = RecordStore::from_config(cfg);
        let id = BreatheLogic::record(&store, &summary, plan.mood_before, mood_after)?;
        success(format!("Breathing session saved (id {id})"));
    }

    Ok(())
}

fn check_mood(field: &str, m: i64) -> AppResult<i64> {
    if (0..=10).contains(&m) {
        Ok(m)
    } else {
        Err(AppError::invalid_field(field, format!("{m} is outside 0..=10")))
    }
}

fn announce(plan: &BreathPlan) {
    let cycles = GuidedTimer::cycles_for(plan.total_seconds, &plan.pattern);
    info(format!(
        "{} x {} ({}s). Press q or Esc to stop.",
        cycles,
        plan.pattern,
        cycles.saturating_mul(plan.pattern.cycle_seconds())
    ));
}

/// One status line, redrawn in place every tick.
fn draw(report: &TickReport) {
    let filled = (report.progress * BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled.min(BAR_WIDTH)),
        "░".repeat(BAR_WIDTH.saturating_sub(filled))
    );
    print!(
        "\r{bar} {:>3}%  cycle {:<3} {:<8} {:>2}s ",
        (report.progress * 100.0).round() as u32,
        report.cycle,
        report.phase,
        report.remaining_in_phase
    );
    let _ = io::stdout().flush();
}

fn ask_mood_after() -> AppResult<Option<i64>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        let Some(answer) = ask_line(&mut input, &mut out, "Mood after (0-10, blank to skip): ")? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<i64>() {
            Ok(m) if (0..=10).contains(&m) => return Ok(Some(m)),
            _ => warning("Please type a number from 0 to 10."),
        }
    }
}
