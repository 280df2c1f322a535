use crate::export::TimeWindow;
use crate::export::aggregate::{in_time_window, with_keyword};
use crate::models::{Record, RecordKind};
use crate::session::forms::THINKING_CHECKS;
use crate::store::RecordStore;

/// Filters of one `list` call.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub search: Option<String>,
    pub window: Option<TimeWindow>,
    pub limit: usize,
}

pub struct HistoryLogic;

impl HistoryLogic {
    /// Matching records, newest first, at most `query.limit` of them
    /// (0 means no limit).
    pub fn select(store: &RecordStore, kind: RecordKind, query: &HistoryQuery) -> Vec<Record> {
        let mut rows = store.load(kind).rows;

        if let Some(w) = query.window {
            rows = in_time_window(&rows, w.start, w.end);
        }
        if let Some(needle) = query.search.as_deref() {
            rows = with_keyword(&rows, kind.text_fields(), needle);
        }

        // equal timestamps: latest insert first
        rows.reverse();
        rows.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        if query.limit > 0 {
            rows.truncate(query.limit);
        }
        rows
    }

    /// One block of lines per record: a headline, then labelled text
    /// wrapped to `width` columns.
    pub fn render(kind: RecordKind, records: &[Record], width: usize, separator: &str) -> Vec<String> {
        let width = width.max(30);
        let mut lines = Vec::new();

        for (i, r) in records.iter().enumerate() {
            if i > 0 {
                lines.push(separator.repeat(width.min(60)));
            }
            lines.push(format!(
                "🕒 {}  {}",
                r.timestamp_raw().unwrap_or("-"),
                headline(kind, r)
            ));
            for (label, text) in body(kind, r) {
                let indent = format!("   {label}: ");
                let options = textwrap::Options::new(width)
                    .initial_indent(&indent)
                    .subsequent_indent("      ");
                lines.extend(textwrap::wrap(&text, options).into_iter().map(|l| l.into_owned()));
            }
        }

        lines
    }
}

fn num(r: &Record, field: &str) -> String {
    r.get(field).unwrap_or("-").to_string()
}

/// Tags of the thinking-pattern checks ticked on a reframing note.
pub fn thinking_tags(r: &Record) -> Vec<&'static str> {
    THINKING_CHECKS
        .iter()
        .filter(|(field, _)| r.get_bool(field) == Some(true))
        .map(|(_, tag)| *tag)
        .collect()
}

fn headline(kind: RecordKind, r: &Record) -> String {
    match kind {
        RecordKind::BreathSession => {
            let mut s = format!(
                "🌬️ {}  {}s/{}s  {}",
                num(r, "pattern"),
                num(r, "elapsed_seconds"),
                num(r, "planned_seconds"),
                num(r, "outcome"),
            );
            if let (Some(b), Some(a)) = (r.get_i64("mood_before"), r.get_i64("mood_after")) {
                s.push_str(&format!("  mood {b} -> {a}"));
            }
            s
        }
        RecordKind::ReframingNote => {
            let mut s = format!(
                "🧠 distress {} -> {}",
                num(r, "distress_before"),
                num(r, "distress_after")
            );
            let emotions = r.get_list("emotions");
            if !emotions.is_empty() {
                s.push_str(&format!("  {}", emotions.join(" ")));
            }
            let tags = thinking_tags(r);
            if !tags.is_empty() {
                s.push_str(&format!("  [{}]", tags.join(", ")));
            }
            s
        }
        RecordKind::DailyReflection => format!(
            "📓 {}  loneliness {}",
            num(r, "date"),
            num(r, "loneliness")
        ),
        RecordKind::StudyBlock => format!("📚 {}  {} min", num(r, "subject"), num(r, "minutes")),
        RecordKind::MoodCheckin => {
            format!("🙂 mood {}  {}", num(r, "mood"), r.get_list("emotions").join(" "))
        }
        RecordKind::ActivityLog => format!(
            "{} ({})  {}",
            num(r, "operation"),
            num(r, "target"),
            r.get("message").unwrap_or("")
        ),
    }
}

fn body(kind: RecordKind, r: &Record) -> Vec<(&'static str, String)> {
    let fields: &[(&str, &'static str)] = match kind {
        RecordKind::ReframingNote => &[
            ("trigger_free", "trigger"),
            ("fact", "seen as"),
            ("alt", "other view"),
            ("rephrase", "provisional"),
        ],
        RecordKind::DailyReflection => &[
            ("small_win", "small win"),
            ("self_message", "to myself"),
            ("note_for_tomorrow", "tomorrow"),
        ],
        RecordKind::StudyBlock | RecordKind::MoodCheckin => &[("note", "note")],
        RecordKind::BreathSession | RecordKind::ActivityLog => &[],
    };

    fields
        .iter()
        .filter_map(|(field, label)| {
            r.get(field)
                .filter(|t| !t.trim().is_empty())
                .map(|t| (*label, t.to_string()))
        })
        .collect()
}
