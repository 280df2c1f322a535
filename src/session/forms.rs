//! Per-form field schemas: names, prompts, types and default values.

use crate::config::Config;
use crate::models::{FieldValue, RecordKind};
use crate::utils::date::today;
use chrono::NaiveDate;
use clap::ValueEnum;

/// Emotion palette of the check-in forms: (stored value, typed alias).
pub const EMOTIONS: [(&str, &str); 8] = [
    ("😟", "worried"),
    ("😡", "angry"),
    ("😢", "sad"),
    ("😔", "down"),
    ("😤", "frustrated"),
    ("😴", "tired"),
    ("🙂", "calm"),
    ("🤷‍♀️", "unsure"),
];

/// Trigger chips of the reframing note: (stored value, typed alias).
pub const TRIGGERS: [(&str, &str); 5] = [
    ("time", "event"),
    ("thought_line", "thought"),
    ("relationship", "people"),
    ("body", "body_signal"),
    ("unknown", "unsure"),
];

/// Thinking-pattern checks of the reframing note, with their short tag.
pub const THINKING_CHECKS: [(&str, &str); 5] = [
    ("bw", "0/100"),
    ("catastrophe", "worst-case"),
    ("fortune", "fortune-telling"),
    ("emotion", "feelings-first"),
    ("decide", "labeling"),
];

/// Gentle phrase offered for each ticked thinking check, ready to be added
/// to the `alt` field.
pub const THINKING_TIPS: [(&str, &str); 5] = [
    ("bw", "🌷 Maybe part of it is OK, too."),
    ("catastrophe", "☁️ Other outcomes might be possible."),
    ("fortune", "🎈 If it turns out differently, that would be lucky."),
    ("emotion", "🫶 The feeling can stay as it is; the facts can sit gently to one side."),
    ("decide", "🌿 When I don't know, it's fine to leave it open for now."),
];

pub fn tip_for(check: &str) -> Option<&'static str> {
    THINKING_TIPS
        .iter()
        .find(|(name, _)| *name == check)
        .map(|(_, tip)| *tip)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum FormId {
    Reframing,
    Reflection,
    Breath,
    Study,
    Mood,
}

impl FormId {
    pub const ALL: [FormId; 5] = [
        FormId::Reframing,
        FormId::Reflection,
        FormId::Breath,
        FormId::Study,
        FormId::Mood,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormId::Reframing => "reframing",
            FormId::Reflection => "reflection",
            FormId::Breath => "breath",
            FormId::Study => "study",
            FormId::Mood => "mood",
        }
    }

    /// Store that a submitted draft lands in.
    pub fn record_kind(&self) -> RecordKind {
        match self {
            FormId::Reframing => RecordKind::ReframingNote,
            FormId::Reflection => RecordKind::DailyReflection,
            FormId::Breath => RecordKind::BreathSession,
            FormId::Study => RecordKind::StudyBlock,
            FormId::Mood => RecordKind::MoodCheckin,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            FormId::Reframing => REFRAMING,
            FormId::Reflection => REFLECTION,
            FormId::Breath => BREATH,
            FormId::Study => STUDY,
            FormId::Mood => MOOD,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}

/// Values that depend on the environment rather than the schema.
#[derive(Debug, Clone)]
pub struct FormContext {
    pub today: NaiveDate,
    pub breath_pattern: String,
    pub breath_seconds: u32,
}

impl FormContext {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            today: today(),
            breath_pattern: cfg.breath_pattern.clone(),
            breath_seconds: cfg.breath_seconds,
        }
    }
}

impl Default for FormContext {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    Text { required: bool },
    Int { min: i64, max: i64, optional: bool },
    Bool,
    Date,
    /// Multi-select; an empty choice list accepts any item.
    List { choices: &'static [(&'static str, &'static str)] },
}

pub struct FieldSpec {
    pub name: &'static str,
    pub prompt: &'static str,
    pub ty: FieldType,
    pub default: fn(&FormContext) -> FieldValue,
}

impl FieldSpec {
    pub fn default_value(&self, ctx: &FormContext) -> FieldValue {
        (self.default)(ctx)
    }

    pub fn is_required(&self) -> bool {
        matches!(self.ty, FieldType::Text { required: true })
    }

    /// Validate `value` for this field, coercing text input to the field's
    /// type. Returns the normalized value or the reason it was rejected.
    pub fn check(&self, value: &FieldValue) -> Result<FieldValue, String> {
        match (self.ty, value) {
            (FieldType::Text { .. }, FieldValue::Text(_)) => Ok(value.clone()),
            (FieldType::Text { .. }, FieldValue::Null) => Ok(FieldValue::Text(String::new())),
            (FieldType::Text { .. }, FieldValue::List(_)) => {
                Err("expected text, got a list".to_string())
            }
            (FieldType::Text { .. }, other) => Ok(FieldValue::Text(other.to_cell())),

            (FieldType::Int { optional: true, .. }, FieldValue::Null) => Ok(FieldValue::Null),
            (FieldType::Int { optional: true, .. }, FieldValue::Text(s)) if s.trim().is_empty() => {
                Ok(FieldValue::Null)
            }
            (FieldType::Int { min, max, .. }, v) => {
                let n = match v {
                    FieldValue::Int(i) => *i,
                    FieldValue::Float(f) if f.fract() == 0.0 && f.is_finite() => *f as i64,
                    FieldValue::Text(s) => s
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| format!("'{s}' is not a whole number"))?,
                    other => return Err(format!("expected a number, got '{other}'")),
                };
                if n < min || n > max {
                    return Err(format!("{n} is outside {min}..={max}"));
                }
                Ok(FieldValue::Int(n))
            }

            (FieldType::Bool, FieldValue::Bool(_)) => Ok(value.clone()),
            (FieldType::Bool, FieldValue::Text(s)) => {
                match s.trim().to_lowercase().as_str() {
                    "true" | "yes" | "y" | "1" | "on" => Ok(FieldValue::Bool(true)),
                    "false" | "no" | "n" | "0" | "off" | "" => Ok(FieldValue::Bool(false)),
                    _ => Err(format!("'{s}' is not yes/no")),
                }
            }
            (FieldType::Bool, other) => Err(format!("expected yes/no, got '{other}'")),

            (FieldType::Date, FieldValue::Date(_)) => Ok(value.clone()),
            (FieldType::Date, FieldValue::Text(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| format!("'{s}' is not a YYYY-MM-DD date")),
            (FieldType::Date, other) => Err(format!("expected a date, got '{other}'")),

            (FieldType::List { choices }, FieldValue::List(items)) => {
                normalize_list(items.iter().map(String::as_str), choices)
            }
            (FieldType::List { choices }, FieldValue::Text(s)) => {
                let items: Vec<String> = serde_json::from_str(s).unwrap_or_else(|_| {
                    s.split(|c: char| c == ',' || c.is_whitespace())
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect()
                });
                normalize_list(items.iter().map(String::as_str), choices)
            }
            (FieldType::List { .. }, FieldValue::Null) => Ok(FieldValue::List(Vec::new())),
            (FieldType::List { .. }, other) => Err(format!("expected a list, got '{other}'")),
        }
    }
}

/// Map every item to its stored choice value, dropping duplicates.
fn normalize_list<'a>(
    items: impl Iterator<Item = &'a str>,
    choices: &[(&'static str, &'static str)],
) -> Result<FieldValue, String> {
    let mut out: Vec<String> = Vec::new();

    for item in items {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let value = if choices.is_empty() {
            item.to_string()
        } else {
            choices
                .iter()
                .find(|(stored, alias)| *stored == item || alias.eq_ignore_ascii_case(item))
                .map(|(stored, _)| stored.to_string())
                .ok_or_else(|| {
                    let names: Vec<&str> = choices.iter().map(|(_, a)| *a).collect();
                    format!("'{item}' is not one of: {}", names.join(", "))
                })?
        };

        if !out.contains(&value) {
            out.push(value);
        }
    }

    Ok(FieldValue::List(out))
}

fn empty_text(_: &FormContext) -> FieldValue {
    FieldValue::Text(String::new())
}

fn empty_list(_: &FormContext) -> FieldValue {
    FieldValue::List(Vec::new())
}

fn unchecked(_: &FormContext) -> FieldValue {
    FieldValue::Bool(false)
}

fn null(_: &FormContext) -> FieldValue {
    FieldValue::Null
}

const fn text(name: &'static str, prompt: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        prompt,
        ty: FieldType::Text { required: false },
        default: empty_text,
    }
}

const fn check(name: &'static str, prompt: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        prompt,
        ty: FieldType::Bool,
        default: unchecked,
    }
}

static REFRAMING: &[FieldSpec] = &[
    FieldSpec {
        name: "emotions",
        prompt: "How do you feel right now? (several OK)",
        ty: FieldType::List { choices: &EMOTIONS },
        default: empty_list,
    },
    FieldSpec {
        name: "distress_before",
        prompt: "How heavy does it feel now? (0-10)",
        ty: FieldType::Int { min: 0, max: 10, optional: false },
        default: |_| FieldValue::Int(5),
    },
    FieldSpec {
        name: "prob_before",
        prompt: "How likely does this thought feel? (%)",
        ty: FieldType::Int { min: 0, max: 100, optional: false },
        default: |_| FieldValue::Int(50),
    },
    FieldSpec {
        name: "trigger_tags",
        prompt: "What set it off? (tap what is close)",
        ty: FieldType::List { choices: &TRIGGERS },
        default: empty_list,
    },
    text("trigger_free", "One line about it (optional)"),
    text("fact", "The way you see it right now"),
    text("alt", "Another way to see it (other explanations, exceptions)"),
    check("bw", "Thinking in 0/100?"),
    check("catastrophe", "Expecting the worst?"),
    check("fortune", "Deciding how it will end?"),
    check("emotion", "Feelings running ahead of facts?"),
    check("decide", "Labeling or jumping to conclusions?"),
    text("rephrase", "A provisional view, in one line"),
    FieldSpec {
        name: "prob_after",
        prompt: "How well does the provisional view fit? (%)",
        ty: FieldType::Int { min: 0, max: 100, optional: false },
        default: |_| FieldValue::Int(40),
    },
    FieldSpec {
        name: "distress_after",
        prompt: "How heavy does it feel after writing? (0-10)",
        ty: FieldType::Int { min: 0, max: 10, optional: false },
        default: |_| FieldValue::Int(4),
    },
];

static REFLECTION: &[FieldSpec] = &[
    FieldSpec {
        name: "date",
        prompt: "Date (YYYY-MM-DD)",
        ty: FieldType::Date,
        default: |ctx| FieldValue::Date(ctx.today),
    },
    text("small_win", "One thing you managed today"),
    text("self_message", "A word to yourself right now"),
    text("note_for_tomorrow", "A note for tomorrow (optional)"),
    FieldSpec {
        name: "loneliness",
        prompt: "How lonely do you feel? (0-10)",
        ty: FieldType::Int { min: 0, max: 10, optional: false },
        default: |_| FieldValue::Int(5),
    },
];

static BREATH: &[FieldSpec] = &[
    FieldSpec {
        name: "total_seconds",
        prompt: "Session length in seconds",
        ty: FieldType::Int { min: 10, max: 3600, optional: false },
        default: |ctx| FieldValue::Int(i64::from(ctx.breath_seconds)),
    },
    FieldSpec {
        name: "pattern",
        prompt: "Breathing pattern (name:seconds,...)",
        ty: FieldType::Text { required: true },
        default: |ctx| FieldValue::Text(ctx.breath_pattern.clone()),
    },
    FieldSpec {
        name: "mood_before",
        prompt: "Mood before (0-10, blank to skip)",
        ty: FieldType::Int { min: 0, max: 10, optional: true },
        default: null,
    },
];

static STUDY: &[FieldSpec] = &[
    FieldSpec {
        name: "subject",
        prompt: "Subject",
        ty: FieldType::Text { required: true },
        default: empty_text,
    },
    FieldSpec {
        name: "minutes",
        prompt: "Minutes studied",
        ty: FieldType::Int { min: 1, max: 1440, optional: false },
        default: |_| FieldValue::Int(25),
    },
    text("note", "Note (optional)"),
];

static MOOD: &[FieldSpec] = &[
    FieldSpec {
        name: "mood",
        prompt: "Mood right now (0-10)",
        ty: FieldType::Int { min: 0, max: 10, optional: false },
        default: |_| FieldValue::Int(5),
    },
    FieldSpec {
        name: "emotions",
        prompt: "Emotions (several OK)",
        ty: FieldType::List { choices: &EMOTIONS },
        default: empty_list,
    },
    text("note", "Note (optional)"),
];
