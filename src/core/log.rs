use crate::errors::AppResult;
use crate::models::{Record, RecordKind};
use crate::store::RecordStore;
use ansi_term::Colour;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

const TARGET_MAX: usize = 60;

static ANSI: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    match ANSI.as_ref() {
        Some(re) => re.replace_all(s, ""),
        None => Cow::Borrowed(s),
    }
}

/// Colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "breathe" => Colour::Green,
        "wipe" => Colour::Red,
        "export" => Colour::Yellow,
        "backup" => Colour::Blue,
        "quarantine" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // arancione
        _ => Colour::White,
    }
}

/// `operation (target)`, cut to `TARGET_MAX` visible columns.
fn op_target(record: &Record) -> (String, String) {
    let op = record.get("operation").unwrap_or("?").to_string();
    let full = match record.get("target") {
        Some(t) => format!("{op} ({t})"),
        None => op.clone(),
    };

    let visible = if full.width() > TARGET_MAX {
        let mut s: String = full.chars().take(TARGET_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        full
    };
    (op, visible)
}

pub struct LogLogic;

impl LogLogic {
    /// Render the activity log, oldest first.
    pub fn render(store: &RecordStore) -> Vec<String> {
        let table = store.load(RecordKind::ActivityLog);
        let mut entries: Vec<(usize, String, String, String, String)> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let (op, visible) = op_target(r);
                (
                    i + 1,
                    r.timestamp_raw().unwrap_or("").to_string(),
                    op,
                    visible,
                    r.get("message").unwrap_or("").to_string(),
                )
            })
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

        let id_w = entries.len().to_string().len();
        let date_w = entries.iter().map(|e| e.1.len()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| e.3.width())
            .max()
            .unwrap_or(10)
            .min(TARGET_MAX);

        entries
            .into_iter()
            .map(|(id, date, op, visible, message)| {
                let color = color_for_operation(&op);
                // solo la prima parola resta colorata
                let colored = match visible.split_once(' ') {
                    Some((word, rest)) => format!("{} {}", color.paint(word), rest),
                    None => color.paint(visible.as_str()).to_string(),
                };
                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).width()));
                format!("{id:>id_w$}: {date:<date_w$} | {colored}{padding} => {message}")
            })
            .collect()
    }

    pub fn print_log(store: &RecordStore) -> AppResult<()> {
        let lines = Self::render(store);
        if lines.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}
