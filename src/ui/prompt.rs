//! Line-based prompts over any reader/writer pair, so wizards can be driven
//! by stdin in the CLI and by a byte buffer in tests.

use std::io::{self, BufRead, Write};

/// Print `question` and read one line. `None` on end of input.
pub fn ask_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim_end_matches(['\r', '\n']).to_string()))
}

/// Yes/no question, default no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    let answer = ask_line(input, out, &format!("{question} [y/N]: "))?;
    Ok(matches!(
        answer.map(|a| a.trim().to_ascii_lowercase()).as_deref(),
        Some("y") | Some("yes")
    ))
}

/// `confirm` on the process stdin/stdout.
pub fn confirm_stdin(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    confirm(&mut input, &mut out, question)
}
