//! Session-scoped form drafts.
//!
//! A `SessionState` lives as long as one interactive session and is never
//! persisted. Every form owns its own namespace, so resetting one form
//! cannot disturb another.

pub mod forms;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::FieldValue;
use forms::FormContext;
pub use forms::{FieldSpec, FieldType, FormId};
use std::collections::{BTreeMap, HashMap};

/// Draft of one form: field name -> current value.
pub type Draft = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    ctx: FormContext,
    forms: HashMap<FormId, Draft>,
}

impl SessionState {
    pub fn new(ctx: FormContext) -> Self {
        Self {
            ctx,
            forms: HashMap::new(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(FormContext::from_config(cfg))
    }

    pub fn context(&self) -> &FormContext {
        &self.ctx
    }

    /// Make sure `form` has a complete, well-formed draft.
    ///
    /// Missing fields get their default. A value of the wrong shape is
    /// coerced when possible and replaced by the default otherwise. Valid
    /// values are left as they are, so calling this on every render is safe.
    pub fn ensure_defaults(&mut self, form: FormId) {
        let ctx = &self.ctx;
        let draft = self.forms.entry(form).or_default();

        for spec in form.fields() {
            let fixed = match draft.get(spec.name) {
                None => spec.default_value(ctx),
                Some(current) => match spec.check(current) {
                    Ok(normalized) if &normalized == current => continue,
                    Ok(normalized) => normalized,
                    Err(reason) => {
                        tracing::debug!(
                            form = form.name(),
                            field = spec.name,
                            %reason,
                            "draft value replaced by default"
                        );
                        spec.default_value(ctx)
                    }
                },
            };
            draft.insert(spec.name.to_string(), fixed);
        }
    }

    pub fn get(&self, form: FormId, field: &str) -> Option<&FieldValue> {
        self.forms.get(&form).and_then(|d| d.get(field))
    }

    /// Set one field, after validating it against the form schema.
    pub fn set(&mut self, form: FormId, field: &str, value: impl Into<FieldValue>) -> AppResult<()> {
        let spec = form.field(field).ok_or_else(|| AppError::UnknownField {
            form: form.name().to_string(),
            field: field.to_string(),
        })?;

        let value = spec
            .check(&value.into())
            .map_err(|reason| AppError::invalid_field(field, reason))?;

        self.ensure_defaults(form);
        if let Some(draft) = self.forms.get_mut(&form) {
            draft.insert(field.to_string(), value);
        }
        Ok(())
    }

    /// Set one field from raw user text (CLI flags, wizard answers).
    pub fn set_from_input(&mut self, form: FormId, field: &str, raw: &str) -> AppResult<()> {
        self.set(form, field, FieldValue::Text(raw.to_string()))
    }

    /// Append `phrase` to a text field, closing the current sentence first
    /// when it is left open.
    pub fn append_text(&mut self, form: FormId, field: &str, phrase: &str) -> AppResult<()> {
        let current = self
            .get(form, field)
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        let glue = if current.is_empty() {
            ""
        } else if current.ends_with(['.', '!', '?']) {
            " "
        } else {
            ". "
        };
        self.set(form, field, format!("{current}{glue}{}", phrase.trim()))
    }

    /// Replace `form`'s draft with fresh defaults.
    pub fn reset(&mut self, form: FormId) {
        self.forms.remove(&form);
        self.ensure_defaults(form);
    }

    /// Reset every form that currently has a draft.
    pub fn reset_all(&mut self) {
        let present: Vec<FormId> = self.forms.keys().copied().collect();
        for form in present {
            self.reset(form);
        }
    }

    pub fn draft(&self, form: FormId) -> Option<&Draft> {
        self.forms.get(&form)
    }

    /// Put back a draft kept elsewhere (for example by a host that owns
    /// the session storage). The next `ensure_defaults` sanitizes it.
    pub fn restore(&mut self, form: FormId, draft: Draft) {
        self.forms.insert(form, draft);
    }

    /// Required fields of `form` that are still blank.
    pub fn missing_required(&self, form: FormId) -> Vec<&'static str> {
        form.fields()
            .iter()
            .filter(|spec| spec.is_required())
            .filter(|spec| {
                self.get(form, spec.name)
                    .and_then(FieldValue::as_str)
                    .map(|s| s.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|spec| spec.name)
            .collect()
    }
}
