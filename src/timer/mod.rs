//! Guided breathing timer.
//!
//! A cooperative step function: the host calls [`GuidedTimer::tick`] once
//! per second. Nothing runs in the background, so if the host stops
//! ticking the countdown simply stops.

pub mod pattern;

use crate::errors::{AppError, AppResult};
pub use pattern::{BreathPattern, Phase};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl TimerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Completed => "completed",
            TimerState::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TimerState::Completed | TimerState::Cancelled)
    }
}

/// Shared stop flag. Clone it into whatever watches for the user's
/// "stop" input; the timer polls it on every tick.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Where the session stands after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub phase: String,
    pub remaining_in_phase: u32,
    /// 1-based cycle the tick fell in.
    pub cycle: u32,
    pub elapsed: u32,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Running(TickReport),
    /// The last planned tick; the report has progress 1.0.
    Completed(TickReport),
    Cancelled,
}

#[derive(Debug)]
pub struct GuidedTimer {
    state: TimerState,
    pattern: Option<BreathPattern>,
    cycle_count: u32,
    planned: u32,
    elapsed: u32,
    phase_idx: usize,
    phase_elapsed: u32,
    cycle: u32,
    stop: StopSignal,
}

impl Default for GuidedTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidedTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            pattern: None,
            cycle_count: 0,
            planned: 0,
            elapsed: 0,
            phase_idx: 0,
            phase_elapsed: 0,
            cycle: 0,
            stop: StopSignal::default(),
        }
    }

    /// Cycles needed to fill `total_seconds`, never fewer than one.
    /// Halves round away from zero.
    pub fn cycles_for(total_seconds: u32, pattern: &BreathPattern) -> u32 {
        let cycle = f64::from(pattern.cycle_seconds());
        let cycles = (f64::from(total_seconds) / cycle).round() as u32;
        cycles.max(1)
    }

    /// Begin a new session. Allowed from any state except `Running`.
    pub fn start(&mut self, total_seconds: u32, pattern: BreathPattern) -> AppResult<()> {
        if self.state == TimerState::Running {
            return Err(AppError::TimerAlreadyRunning);
        }

        let cycle_count = Self::cycles_for(total_seconds, &pattern);
        self.planned = cycle_count
            .checked_mul(pattern.cycle_seconds())
            .ok_or_else(|| AppError::InvalidPattern(format!("{total_seconds}s is too long")))?;
        self.cycle_count = cycle_count;
        self.pattern = Some(pattern);
        self.elapsed = 0;
        self.phase_idx = 0;
        self.phase_elapsed = 0;
        self.cycle = 1;
        self.stop.clear();
        self.state = TimerState::Running;

        tracing::debug!(
            cycles = self.cycle_count,
            planned = self.planned,
            "breathing timer started"
        );
        Ok(())
    }

    /// Advance one second.
    ///
    /// The stop signal is checked first, so a cancel request is honored on
    /// the very next tick regardless of phase boundaries.
    pub fn tick(&mut self) -> AppResult<TickOutcome> {
        if self.state != TimerState::Running {
            return Err(AppError::TimerNotRunning);
        }

        if self.stop.is_raised() {
            self.state = TimerState::Cancelled;
            return Ok(TickOutcome::Cancelled);
        }

        let pattern = self.pattern.as_ref().ok_or(AppError::TimerNotRunning)?;
        let phases = pattern.phases();
        let phase = &phases[self.phase_idx];

        self.elapsed += 1;
        self.phase_elapsed += 1;

        let report = TickReport {
            phase: phase.name.clone(),
            remaining_in_phase: phase.seconds - self.phase_elapsed,
            cycle: self.cycle,
            elapsed: self.elapsed,
            progress: self.progress(),
        };

        if self.phase_elapsed >= phase.seconds {
            self.phase_elapsed = 0;
            self.phase_idx += 1;
            if self.phase_idx == phases.len() {
                self.phase_idx = 0;
                self.cycle += 1;
            }
        }

        if self.elapsed >= self.planned {
            self.state = TimerState::Completed;
            tracing::debug!(elapsed = self.elapsed, "breathing timer completed");
            return Ok(TickOutcome::Completed(report));
        }

        Ok(TickOutcome::Running(report))
    }

    /// Stop the running session. Later ticks are rejected.
    pub fn cancel(&mut self) -> AppResult<()> {
        if self.state != TimerState::Running {
            return Err(AppError::TimerNotRunning);
        }
        self.state = TimerState::Cancelled;
        tracing::debug!(elapsed = self.elapsed, "breathing timer cancelled");
        Ok(())
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn planned_seconds(&self) -> u32 {
        self.planned
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn pattern(&self) -> Option<&BreathPattern> {
        self.pattern.as_ref()
    }

    /// Elapsed over planned ticks, capped at 1.0.
    pub fn progress(&self) -> f64 {
        if self.planned == 0 {
            return 0.0;
        }
        (f64::from(self.elapsed) / f64::from(self.planned)).min(1.0)
    }

    /// Phase about to run and its full length, for the first frame of a
    /// display. `None` unless running.
    pub fn upcoming(&self) -> Option<(&str, u32)> {
        if self.state != TimerState::Running {
            return None;
        }
        let phase = self.pattern.as_ref()?.phases().get(self.phase_idx)?;
        Some((phase.name.as_str(), phase.seconds - self.phase_elapsed))
    }
}
