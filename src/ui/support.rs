//! Companion message shown after a note or reflection is saved.

use super::messages::companion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Distress at or above the threshold.
    Gentle,
    /// Loneliness at or above the threshold.
    NotAlone,
    Encourage,
}

impl Support {
    /// Distress wins over loneliness when both are high.
    pub fn pick(distress: Option<i64>, lonely: Option<i64>, threshold: i64) -> Self {
        if distress.is_some_and(|d| d >= threshold) {
            Support::Gentle
        } else if lonely.is_some_and(|l| l >= threshold) {
            Support::NotAlone
        } else {
            Support::Encourage
        }
    }

    pub fn lines(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Support::Gentle => (
                "🫶",
                "You do not have to push yourself here.",
                "Going at your own pace is more than enough.",
            ),
            Support::NotAlone => (
                "🤝",
                "In this moment, you are not alone.",
                "Take one deep breath and go slowly.",
            ),
            Support::Encourage => (
                "🌟",
                "Writing this much is already enough.",
                "Blank fields are fine too.",
            ),
        }
    }

    pub fn show(&self) {
        let (icon, text, sub) = self.lines();
        companion(icon, text, Some(sub));
    }
}
