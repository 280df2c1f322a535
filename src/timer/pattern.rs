use crate::errors::{AppError, AppResult};
use std::fmt;
use std::str::FromStr;

/// One named segment of a breathing cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub name: String,
    pub seconds: u32,
}

impl Phase {
    pub fn new(name: impl Into<String>, seconds: u32) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }
}

/// Longest accepted cycle, in seconds.
pub const MAX_CYCLE_SECONDS: u32 = 3600;

/// Ordered, non-empty list of phases; every phase lasts at least a second
/// and one full cycle lasts at most [`MAX_CYCLE_SECONDS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreathPattern {
    phases: Vec<Phase>,
}

impl BreathPattern {
    pub fn new(phases: Vec<Phase>) -> AppResult<Self> {
        if phases.is_empty() {
            return Err(AppError::InvalidPattern("pattern has no phases".into()));
        }
        let mut cycle: u32 = 0;
        for p in &phases {
            if p.name.trim().is_empty() {
                return Err(AppError::InvalidPattern("phase name is empty".into()));
            }
            if p.seconds == 0 {
                return Err(AppError::InvalidPattern(format!(
                    "phase '{}' lasts 0 seconds",
                    p.name
                )));
            }
            cycle = cycle
                .checked_add(p.seconds)
                .filter(|c| *c <= MAX_CYCLE_SECONDS)
                .ok_or_else(|| {
                    AppError::InvalidPattern(format!(
                        "one cycle may last at most {MAX_CYCLE_SECONDS} seconds"
                    ))
                })?;
        }
        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Seconds in one full cycle. Bounded by construction.
    pub fn cycle_seconds(&self) -> u32 {
        self.phases.iter().map(|p| p.seconds).sum()
    }
}

impl FromStr for BreathPattern {
    type Err = AppError;

    /// Parse `inhale:4,hold:7,exhale:8`.
    fn from_str(s: &str) -> AppResult<Self> {
        let mut phases = Vec::new();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, secs) = part.split_once(':').ok_or_else(|| {
                AppError::InvalidPattern(format!("'{part}' is not name:seconds"))
            })?;
            let seconds: u32 = secs.trim().parse().map_err(|_| {
                AppError::InvalidPattern(format!("'{}' is not a number of seconds", secs.trim()))
            })?;
            phases.push(Phase::new(name.trim(), seconds));
        }

        Self::new(phases)
    }
}

impl fmt::Display for BreathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .phases
            .iter()
            .map(|p| format!("{}:{}", p.name, p.seconds))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
