//! Guided breathing session: drives the timer once per second and records
//! the outcome.

use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::session::{FormId, SessionState};
use crate::store::RecordStore;
use crate::store::log::ttlog_quiet;
use crate::timer::{BreathPattern, GuidedTimer, StopSignal, TickOutcome, TickReport, TimerState};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::time::{Duration, Instant};

/// Source of one-second ticks.
pub trait TickClock {
    /// Block until the next tick is due. A stop request seen while waiting
    /// raises `stop`; the timer acts on it at its next tick.
    fn wait_tick(&mut self, stop: &StopSignal) -> AppResult<()>;
}

/// Real clock on an interactive terminal. Keys are read in raw mode:
/// `q`, `Esc` or `Ctrl-C` raise the stop signal.
pub struct TerminalClock {
    _raw_mode: (),
}

impl TerminalClock {
    pub fn new() -> AppResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _raw_mode: () })
    }
}

impl Drop for TerminalClock {
    fn drop(&mut self) {
        if terminal::disable_raw_mode().is_err() {
            tracing::warn!("could not restore terminal mode");
        }
    }
}

fn is_stop_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl TickClock for TerminalClock {
    fn wait_tick(&mut self, stop: &StopSignal) -> AppResult<()> {
        let deadline = Instant::now() + Duration::from_secs(1);

        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Ok(());
            }
            if event::poll(left)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && is_stop_key(key.code, key.modifiers)
            {
                stop.raise();
                return Ok(());
            }
        }
    }
}

/// Plain one-second sleep, for when stdin is not a terminal.
pub struct SleepClock;

impl TickClock for SleepClock {
    fn wait_tick(&mut self, _stop: &StopSignal) -> AppResult<()> {
        std::thread::sleep(Duration::from_secs(1));
        Ok(())
    }
}

/// What a session is about to run, read from the breath draft.
#[derive(Debug, Clone)]
pub struct BreathPlan {
    pub total_seconds: u32,
    pub pattern: BreathPattern,
    pub mood_before: Option<i64>,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub struct BreathSummary {
    pub pattern: String,
    pub planned_seconds: u32,
    pub cycles: u32,
    pub elapsed_seconds: u32,
    pub outcome: TimerState,
}

pub struct BreatheLogic;

impl BreatheLogic {
    /// Validate the breath draft and turn it into a plan.
    pub fn plan(state: &mut SessionState) -> AppResult<BreathPlan> {
        let form = FormId::Breath;
        state.ensure_defaults(form);

        let total_seconds = state
            .get(form, "total_seconds")
            .and_then(|v| v.as_i64())
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| AppError::MissingField("total_seconds".to_string()))?;
        let pattern: BreathPattern = state
            .get(form, "pattern")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::MissingField("pattern".to_string()))?
            .parse()?;
        let mood_before = state.get(form, "mood_before").and_then(|v| v.as_i64());

        Ok(BreathPlan {
            total_seconds,
            pattern,
            mood_before,
        })
    }

    /// Run `plan` to completion or cancellation, calling `on_tick` with
    /// every report.
    pub fn run<C, F>(
        timer: &mut GuidedTimer,
        plan: &BreathPlan,
        clock: &mut C,
        mut on_tick: F,
    ) -> AppResult<BreathSummary>
    where
        C: TickClock,
        F: FnMut(&TickReport),
    {
        timer.start(plan.total_seconds, plan.pattern.clone())?;
        let stop = timer.stop_signal();

        loop {
            if let Err(e) = clock.wait_tick(&stop) {
                timer.cancel()?;
                return Err(e);
            }
            match timer.tick()? {
                TickOutcome::Running(report) => on_tick(&report),
                TickOutcome::Completed(report) => {
                    on_tick(&report);
                    break;
                }
                TickOutcome::Cancelled => break,
            }
        }

        Ok(BreathSummary {
            pattern: plan.pattern.to_string(),
            planned_seconds: timer.planned_seconds(),
            cycles: timer.cycle_count(),
            elapsed_seconds: timer.elapsed(),
            outcome: timer.state(),
        })
    }

    /// Build the stored row. `mood_delta` only exists for a completed
    /// session with both scores.
    pub fn to_record(summary: &BreathSummary, mood_before: Option<i64>, mood_after: Option<i64>) -> Record {
        let delta = match (summary.outcome, mood_before, mood_after) {
            (TimerState::Completed, Some(b), Some(a)) => Some(a - b),
            _ => None,
        };

        Record::new()
            .with("pattern", summary.pattern.as_str())
            .with("planned_seconds", summary.planned_seconds)
            .with("cycles", summary.cycles)
            .with("elapsed_seconds", summary.elapsed_seconds)
            .with("outcome", summary.outcome.as_str())
            .with("mood_before", mood_before)
            .with("mood_after", mood_after)
            .with("mood_delta", delta)
    }

    pub fn record(
        store: &RecordStore,
        summary: &BreathSummary,
        mood_before: Option<i64>,
        mood_after: Option<i64>,
    ) -> AppResult<String> {
        let record = Self::to_record(summary, mood_before, mood_after);
        let kind = FormId::Breath.record_kind();
        let id = store.append(kind, record)?;

        ttlog_quiet(
            store,
            "breathe",
            kind.storage_name(),
            &format!("{} after {}s", summary.outcome.as_str(), summary.elapsed_seconds),
        );
        Ok(id)
    }
}
