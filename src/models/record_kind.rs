use clap::ValueEnum;

/// Category of journal entry. Each kind owns one CSV store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum RecordKind {
    #[value(name = "breath", alias = "breath_session")]
    BreathSession,
    #[value(name = "reframing", alias = "reframing_note", alias = "cbt")]
    ReframingNote,
    #[value(name = "reflection", alias = "daily_reflection")]
    DailyReflection,
    #[value(name = "study", alias = "study_block")]
    StudyBlock,
    #[value(name = "mood", alias = "mood_checkin")]
    MoodCheckin,
    /// Internal operation log, written by `ttlog`.
    #[value(skip)]
    ActivityLog,
}

impl RecordKind {
    /// All user-facing journal kinds (the activity log is excluded).
    pub const JOURNAL: [RecordKind; 5] = [
        RecordKind::BreathSession,
        RecordKind::ReframingNote,
        RecordKind::DailyReflection,
        RecordKind::StudyBlock,
        RecordKind::MoodCheckin,
    ];

    /// Stable storage name, also used as file stem.
    pub fn storage_name(&self) -> &'static str {
        match self {
            RecordKind::BreathSession => "breath_session",
            RecordKind::ReframingNote => "reframing_note",
            RecordKind::DailyReflection => "daily_reflection",
            RecordKind::StudyBlock => "study_block",
            RecordKind::MoodCheckin => "mood_checkin",
            RecordKind::ActivityLog => "activity_log",
        }
    }

    pub fn from_storage_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breath_session" => Some(RecordKind::BreathSession),
            "reframing_note" => Some(RecordKind::ReframingNote),
            "daily_reflection" => Some(RecordKind::DailyReflection),
            "study_block" => Some(RecordKind::StudyBlock),
            "mood_checkin" => Some(RecordKind::MoodCheckin),
            "activity_log" => Some(RecordKind::ActivityLog),
            _ => None,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.storage_name())
    }

    /// Human label for listings and messages.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::BreathSession => "Breathing sessions",
            RecordKind::ReframingNote => "Reframing notes",
            RecordKind::DailyReflection => "Daily reflections",
            RecordKind::StudyBlock => "Study blocks",
            RecordKind::MoodCheckin => "Mood check-ins",
            RecordKind::ActivityLog => "Activity log",
        }
    }

    /// Free-text columns searched by `list --search`.
    pub fn text_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::BreathSession => &["pattern", "outcome"],
            RecordKind::ReframingNote => &[
                "fact",
                "alt",
                "rephrase",
                "trigger_free",
                "emotions",
                "trigger_tags",
            ],
            RecordKind::DailyReflection => &["small_win", "self_message", "note_for_tomorrow"],
            RecordKind::StudyBlock => &["subject", "note"],
            RecordKind::MoodCheckin => &["emotions", "note"],
            RecordKind::ActivityLog => &["operation", "target", "message"],
        }
    }
}
