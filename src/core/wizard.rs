//! Interactive field-by-field prompt for one form.

use crate::errors::AppResult;
use crate::models::FieldValue;
use crate::session::forms::{THINKING_CHECKS, tip_for};
use crate::session::{FieldType, FormId, SessionState};
use crate::ui::prompt::{ask_line, confirm};
use std::io::{BufRead, Write};

/// Typed alone, clears the field.
const CLEAR: &str = "-";

pub struct Wizard;

impl Wizard {
    /// Walk every field of `form`, showing the draft value as the default.
    ///
    /// A blank answer keeps the draft value, `-` clears it, anything else is
    /// validated and asked again until it is accepted. Returns `false` when
    /// input ends before the last field (the draft keeps what was entered).
    pub fn run<R: BufRead, W: Write>(
        state: &mut SessionState,
        form: FormId,
        input: &mut R,
        out: &mut W,
    ) -> AppResult<bool> {
        state.ensure_defaults(form);

        for spec in form.fields() {
            if let FieldType::List { choices } = spec.ty
                && !choices.is_empty()
            {
                let menu: Vec<String> = choices
                    .iter()
                    .map(|(stored, alias)| {
                        if stored == alias {
                            stored.to_string()
                        } else {
                            format!("{stored} {alias}")
                        }
                    })
                    .collect();
                writeln!(out, "   ({})", menu.join(" · "))?;
            }

            loop {
                let current = state
                    .get(form, spec.name)
                    .map(FieldValue::to_string)
                    .unwrap_or_default();
                let question = if current.is_empty() {
                    format!("{}: ", spec.prompt)
                } else {
                    format!("{} [{}]: ", spec.prompt, current)
                };

                let Some(answer) = ask_line(input, out, &question)? else {
                    writeln!(out)?;
                    return Ok(false);
                };
                let answer = answer.trim();

                let result = match answer {
                    "" => break,
                    CLEAR => state.set(form, spec.name, FieldValue::Null),
                    raw => state.set_from_input(form, spec.name, raw),
                };

                match result {
                    Ok(()) => break,
                    Err(e) => writeln!(out, "   ✗ {e}")?,
                }
            }

            if form == FormId::Reframing
                && THINKING_CHECKS.last().map(|(name, _)| *name) == Some(spec.name)
            {
                Self::offer_tips(state, input, out)?;
            }
        }

        Ok(true)
    }

    /// For every ticked thinking check, offer its tip as an addition to `alt`.
    fn offer_tips<R: BufRead, W: Write>(
        state: &mut SessionState,
        input: &mut R,
        out: &mut W,
    ) -> AppResult<()> {
        for (check, _) in THINKING_CHECKS {
            let ticked = state
                .get(FormId::Reframing, check)
                .and_then(FieldValue::as_bool)
                .unwrap_or(false);
            let Some(tip) = tip_for(check).filter(|_| ticked) else {
                continue;
            };
            if confirm(input, out, &format!("   {tip}  Add it to your other view?"))? {
                state.append_text(FormId::Reframing, "alt", tip)?;
            }
        }
        Ok(())
    }
}
