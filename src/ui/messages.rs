//! User-facing status lines. Diagnostics go through `tracing` instead.

use ansi_term::{Colour, Style};
use std::fmt::Display;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn line(colour: Colour, icon: &str, msg: impl Display) {
    println!("{} {}", colour.bold().paint(icon), msg);
}

pub fn info<T: Display>(msg: T) {
    line(Colour::Blue, ICON_INFO, msg);
}

pub fn success<T: Display>(msg: T) {
    line(Colour::Green, ICON_OK, msg);
}

pub fn warning<T: Display>(msg: T) {
    line(Colour::Yellow, ICON_WARN, msg);
}

pub fn error<T: Display>(msg: T) {
    eprintln!("{} {}", Colour::Red.bold().paint(ICON_ERR), msg);
}

/// Section title printed above listings and tables.
pub fn header<T: Display>(title: T) {
    let style = Style::new().bold().fg(Colour::Blue);
    println!("{}\n", style.paint(format!("── {title} ──")));
}

/// Companion card shown after a save: a headline and a softer second line.
pub fn companion<T: Display>(icon: &str, text: T, sub: Option<&str>) {
    let style = Colour::Purple.bold();
    println!("{}", style.paint(format!("{icon} {text}")));
    if let Some(s) = sub {
        println!("   {}", Colour::Fixed(245).paint(s));
    }
}
