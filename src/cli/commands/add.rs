use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::wizard::Wizard;
use crate::errors::AppResult;
use crate::models::FieldValue;
use crate::session::{FormId, SessionState};
use crate::store::RecordStore;
use crate::ui::messages::{header, success, warning};
use crate::ui::support::Support;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { form, set } = cmd {
        let form = *form;
        let store = RecordStore::from_config(cfg);
        let mut state = SessionState::from_config(cfg);
        state.ensure_defaults(form);

        if set.is_empty() {
            header(form.record_kind().label());
            println!("Blank keeps the value in brackets, '-' clears it.\n");

            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            if !Wizard::run(&mut state, form, &mut input, &mut out)? {
                warning("Input ended before the last question, nothing saved.");
                return Ok(());
            }
        } else {
            for (field, value) in set {
                state.set_from_input(form, field, value)?;
            }
        }

        // read before submit resets the draft
        let support = support_for(&state, form, cfg.support_threshold);

        let id = AddLogic::submit(&mut state, &store, form)?;
        success(format!("{} entry saved (id {id})", form.name()));

        if let Some(s) = support {
            s.show();
        }
    }

    Ok(())
}

fn support_for(state: &SessionState, form: FormId, threshold: i64) -> Option<Support> {
    let score = |field: &str| state.get(form, field).and_then(FieldValue::as_i64);
    match form {
        FormId::Reframing => Some(Support::pick(score("distress_after"), None, threshold)),
        FormId::Reflection => Some(Support::pick(None, score("loneliness"), threshold)),
        _ => None,
    }
}
