use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::session::{FormId, SessionState};
use crate::store::RecordStore;
use crate::store::log::ttlog_quiet;

/// High-level business logic for saving a form draft.
pub struct AddLogic;

impl AddLogic {
    /// Save `form`'s draft as a new record and start a fresh draft.
    ///
    /// On any failure the draft is left exactly as it was, so the user can
    /// fix the problem (or free some disk space) and try again.
    pub fn submit(state: &mut SessionState, store: &RecordStore, form: FormId) -> AppResult<String> {
        if form == FormId::Breath {
            return Err(AppError::InvalidKind(
                "breathing sessions are recorded by `breathe`".to_string(),
            ));
        }

        state.ensure_defaults(form);

        if let Some(missing) = state.missing_required(form).first() {
            return Err(AppError::MissingField(missing.to_string()));
        }

        let record = Self::draft_to_record(state, form);
        let kind = form.record_kind();
        let id = store.append(kind, record)?;

        state.reset(form);
        ttlog_quiet(store, "add", kind.storage_name(), &format!("record {id}"));

        Ok(id)
    }

    /// Fields in schema order. Empty text and null values are left out so
    /// they read back as absent.
    pub fn draft_to_record(state: &SessionState, form: FormId) -> Record {
        let mut record = Record::new();
        for spec in form.fields() {
            if let Some(value) = state.get(form, spec.name) {
                record.set(spec.name, value.clone());
            }
        }
        record
    }
}
