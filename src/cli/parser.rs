use crate::export::ExportFormat;
use crate::models::RecordKind;
use crate::session::FormId;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rCalmlog
/// A small personal wellbeing journal: breathing, reframing notes,
/// reflections, study blocks and mood check-ins, stored as CSV files
#[derive(Parser)]
#[command(
    name = "rcalmlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A quiet wellbeing journal for the terminal: guided breathing, reframing notes and daily reflections",
    long_about = None
)]
pub struct Cli {
    /// Override the data directory (useful for tests or a second journal)
    #[arg(global = true, long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// A journal kind, or every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSelector {
    One(RecordKind),
    All,
}

impl KindSelector {
    pub fn kinds(&self) -> Vec<RecordKind> {
        match self {
            KindSelector::One(k) => vec![*k],
            KindSelector::All => RecordKind::JOURNAL.to_vec(),
        }
    }
}

fn parse_kind_selector(s: &str) -> Result<KindSelector, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(KindSelector::All);
    }
    <RecordKind as clap::ValueEnum>::from_str(s, true)
        .map(KindSelector::One)
        .map_err(|_| format!("unknown kind '{s}' (breath, reframing, reflection, study, mood or all)"))
}

/// `key=value` pair of `add --set`.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected FIELD=VALUE, got '{s}'")),
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and data directory
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal activity log
    Log {
        #[arg(long = "print", help = "Print rows from the internal activity log")]
        print: bool,
    },

    /// Write a journal entry (interactive unless --set is given)
    Add {
        /// Form to fill in: reframing, reflection, study or mood
        #[arg(value_enum)]
        form: FormId,

        /// Set one field and skip the wizard (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Guided breathing session (press q or Esc to stop)
    Breathe {
        #[arg(long, help = "Session length in seconds (10-3600)")]
        seconds: Option<u32>,

        #[arg(long, help = "Breathing pattern, e.g. inhale:4,hold:7,exhale:8")]
        pattern: Option<String>,

        #[arg(long = "mood-before", help = "Mood before the session (0-10)")]
        mood_before: Option<u32>,

        #[arg(long = "mood-after", help = "Mood after the session (0-10), skips the question")]
        mood_after: Option<u32>,

        #[arg(long = "no-save", help = "Do not record the session")]
        no_save: bool,
    },

    /// List journal entries, newest first
    List {
        #[arg(value_enum)]
        kind: RecordKind,

        #[arg(long, help = "Case-insensitive text search")]
        search: Option<String>,

        #[arg(
            long,
            short,
            conflicts_with = "days",
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, a:b, all)"
        )]
        range: Option<String>,

        #[arg(long, help = "Only the last N days, today included")]
        days: Option<u32>,

        #[arg(long, help = "Maximum number of entries (0 = no limit)")]
        limit: Option<usize>,
    },

    /// Aggregate numeric fields of a journal
    Stats {
        #[arg(value_enum)]
        kind: RecordKind,

        #[arg(long = "sum-by", requires = "value", conflicts_with = "mean", help = "Group field")]
        sum_by: Option<String>,

        #[arg(long, help = "Numeric field to sum")]
        value: Option<String>,

        #[arg(long, help = "Numeric field to average")]
        mean: Option<String>,

        #[arg(long, short, conflicts_with = "days")]
        range: Option<String>,

        #[arg(long)]
        days: Option<u32>,
    },

    /// Export journal entries to a file
    Export {
        /// Journal kind or `all`
        #[arg(value_parser = parse_kind_selector)]
        kind: KindSelector,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Absolute output path (a directory when exporting `all`)
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short)]
        range: Option<String>,

        #[arg(long, help = "Overwrite existing files without asking")]
        force: bool,
    },

    /// Delete every entry of a journal
    Wipe {
        /// Journal kind or `all`
        #[arg(value_parser = parse_kind_selector)]
        kind: KindSelector,

        #[arg(long, help = "Confirm the deletion")]
        yes: bool,
    },

    /// Copy the data files to a backup location
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Write a single zip archive")]
        compress: bool,

        #[arg(long, help = "Overwrite existing files without asking")]
        force: bool,
    },
}
