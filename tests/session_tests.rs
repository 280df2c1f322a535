mod common;
use chrono::NaiveDate;
use common::Journal;
use rcalmlog::core::add::AddLogic;
use rcalmlog::core::wizard::Wizard;
use rcalmlog::errors::AppError;
use rcalmlog::models::{FieldValue, RecordKind};
use rcalmlog::session::forms::FormContext;
use rcalmlog::session::{Draft, FormId, SessionState};
use std::io::Cursor;

fn ctx() -> FormContext {
    FormContext {
        today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        breath_pattern: "inhale:4,exhale:6".to_string(),
        breath_seconds: 90,
    }
}

#[test]
fn test_ensure_defaults_fills_every_field() {
    let mut state = SessionState::new(ctx());
    state.ensure_defaults(FormId::Reframing);

    let draft = state.draft(FormId::Reframing).expect("draft");
    for spec in FormId::Reframing.fields() {
        assert!(draft.contains_key(spec.name), "missing {}", spec.name);
    }
    assert_eq!(state.get(FormId::Reframing, "distress_before"), Some(&FieldValue::Int(5)));
    assert_eq!(state.get(FormId::Reframing, "bw"), Some(&FieldValue::Bool(false)));
    assert_eq!(
        state.get(FormId::Reframing, "emotions"),
        Some(&FieldValue::List(Vec::new()))
    );
}

#[test]
fn test_defaults_come_from_context() {
    let mut state = SessionState::new(ctx());
    state.ensure_defaults(FormId::Reflection);
    state.ensure_defaults(FormId::Breath);

    assert_eq!(
        state.get(FormId::Reflection, "date"),
        Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()))
    );
    assert_eq!(state.get(FormId::Breath, "total_seconds"), Some(&FieldValue::Int(90)));
    assert_eq!(
        state.get(FormId::Breath, "pattern"),
        Some(&FieldValue::Text("inhale:4,exhale:6".into()))
    );
    assert_eq!(state.get(FormId::Breath, "mood_before"), Some(&FieldValue::Null));
}

#[test]
fn test_ensure_defaults_keeps_valid_values() {
    let mut state = SessionState::new(ctx());
    state.set(FormId::Study, "subject", "chemistry").unwrap();
    state.set(FormId::Study, "minutes", 50_i64).unwrap();

    state.ensure_defaults(FormId::Study);
    state.ensure_defaults(FormId::Study);

    assert_eq!(
        state.get(FormId::Study, "subject"),
        Some(&FieldValue::Text("chemistry".into()))
    );
    assert_eq!(state.get(FormId::Study, "minutes"), Some(&FieldValue::Int(50)));
}

#[test]
fn test_restore_sanitizes_wrong_shapes() {
    let mut state = SessionState::new(ctx());
    let mut draft = Draft::new();
    draft.insert("mood".into(), FieldValue::Text("8".into()));
    draft.insert("emotions".into(), FieldValue::Text("sad, tired".into()));
    draft.insert("note".into(), FieldValue::List(vec!["x".into()]));
    state.restore(FormId::Mood, draft);

    state.ensure_defaults(FormId::Mood);

    // coerced
    assert_eq!(state.get(FormId::Mood, "mood"), Some(&FieldValue::Int(8)));
    assert_eq!(
        state.get(FormId::Mood, "emotions"),
        Some(&FieldValue::List(vec!["😢".into(), "😴".into()]))
    );
    // replaced by the default
    assert_eq!(state.get(FormId::Mood, "note"), Some(&FieldValue::Text(String::new())));
}

#[test]
fn test_restore_out_of_range_number_falls_back_to_default() {
    let mut state = SessionState::new(ctx());
    let mut draft = Draft::new();
    draft.insert("distress_before".into(), FieldValue::Int(42));
    state.restore(FormId::Reframing, draft);

    state.ensure_defaults(FormId::Reframing);
    assert_eq!(state.get(FormId::Reframing, "distress_before"), Some(&FieldValue::Int(5)));
}

#[test]
fn test_set_rejects_unknown_field() {
    let mut state = SessionState::new(ctx());
    let err = state.set(FormId::Mood, "colour", "blue").unwrap_err();
    assert!(matches!(err, AppError::UnknownField { .. }));
}

#[test]
fn test_set_rejects_invalid_values_and_keeps_draft() {
    let mut state = SessionState::new(ctx());
    state.set(FormId::Mood, "mood", 3_i64).unwrap();

    let err = state.set(FormId::Mood, "mood", 11_i64).unwrap_err();
    assert!(matches!(err, AppError::InvalidField { .. }));
    assert!(state.set_from_input(FormId::Mood, "mood", "a lot").is_err());
    assert!(state.set_from_input(FormId::Mood, "emotions", "bored").is_err());

    assert_eq!(state.get(FormId::Mood, "mood"), Some(&FieldValue::Int(3)));
}

#[test]
fn test_set_from_input_coerces_text() {
    let mut state = SessionState::new(ctx());
    state.set_from_input(FormId::Reframing, "bw", "yes").unwrap();
    state.set_from_input(FormId::Reframing, "trigger_tags", "people thought people").unwrap();
    state.set_from_input(FormId::Reflection, "date", "2025-02-28").unwrap();

    assert_eq!(state.get(FormId::Reframing, "bw"), Some(&FieldValue::Bool(true)));
    assert_eq!(
        state.get(FormId::Reframing, "trigger_tags"),
        Some(&FieldValue::List(vec!["relationship".into(), "thought_line".into()]))
    );
    assert_eq!(
        state.get(FormId::Reflection, "date"),
        Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()))
    );
}

#[test]
fn test_reset_only_touches_one_form() {
    let mut state = SessionState::new(ctx());
    state.set(FormId::Mood, "mood", 9_i64).unwrap();
    state.set(FormId::Study, "subject", "piano").unwrap();

    state.reset(FormId::Mood);

    assert_eq!(state.get(FormId::Mood, "mood"), Some(&FieldValue::Int(5)));
    assert_eq!(
        state.get(FormId::Study, "subject"),
        Some(&FieldValue::Text("piano".into()))
    );
}

#[test]
fn test_reset_all() {
    let mut state = SessionState::new(ctx());
    state.set(FormId::Mood, "mood", 9_i64).unwrap();
    state.set(FormId::Study, "minutes", 90_i64).unwrap();

    state.reset_all();

    assert_eq!(state.get(FormId::Mood, "mood"), Some(&FieldValue::Int(5)));
    assert_eq!(state.get(FormId::Study, "minutes"), Some(&FieldValue::Int(25)));
}

#[test]
fn test_missing_required() {
    let mut state = SessionState::new(ctx());
    state.ensure_defaults(FormId::Study);
    assert_eq!(state.missing_required(FormId::Study), vec!["subject"]);

    state.set(FormId::Study, "subject", "  ").unwrap();
    assert_eq!(state.missing_required(FormId::Study), vec!["subject"]);

    state.set(FormId::Study, "subject", "latin").unwrap();
    assert!(state.missing_required(FormId::Study).is_empty());
}

#[test]
fn test_submit_saves_and_resets_draft() {
    let j = Journal::new();
    let store = j.store();
    let mut state = SessionState::new(ctx());
    state.set(FormId::Study, "subject", "latin").unwrap();
    state.set(FormId::Study, "minutes", 40_i64).unwrap();

    let id = AddLogic::submit(&mut state, &store, FormId::Study).expect("submit");

    let table = store.load(RecordKind::StudyBlock);
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0].id(), Some(id.as_str()));
    assert_eq!(table.rows[0].get("subject"), Some("latin"));
    assert_eq!(table.rows[0].get_i64("minutes"), Some(40));
    // empty note is left out
    assert_eq!(table.rows[0].get("note"), None);

    assert_eq!(state.get(FormId::Study, "subject"), Some(&FieldValue::Text(String::new())));

    let log = store.load(RecordKind::ActivityLog);
    assert_eq!(log.rows[0].get("operation"), Some("add"));
}

#[test]
fn test_submit_missing_required_keeps_draft() {
    let j = Journal::new();
    let store = j.store();
    let mut state = SessionState::new(ctx());
    state.set(FormId::Study, "minutes", 15_i64).unwrap();

    let err = AddLogic::submit(&mut state, &store, FormId::Study).unwrap_err();
    assert!(matches!(err, AppError::MissingField(f) if f == "subject"));
    assert_eq!(state.get(FormId::Study, "minutes"), Some(&FieldValue::Int(15)));
    assert!(store.load(RecordKind::StudyBlock).is_empty());
}

#[test]
fn test_submit_write_failure_keeps_draft() {
    let j = Journal::new();
    // a plain file where the data directory should be
    let blocker = j.path().join("not_a_dir");
    std::fs::write(&blocker, "x").unwrap();
    let store = rcalmlog::store::RecordStore::new(&blocker);

    let mut state = SessionState::new(ctx());
    state.set(FormId::Mood, "mood", 2_i64).unwrap();

    assert!(AddLogic::submit(&mut state, &store, FormId::Mood).is_err());
    assert_eq!(state.get(FormId::Mood, "mood"), Some(&FieldValue::Int(2)));
}

#[test]
fn test_submit_rejects_breath_form() {
    let j = Journal::new();
    let mut state = SessionState::new(ctx());
    assert!(AddLogic::submit(&mut state, &j.store(), FormId::Breath).is_err());
}

#[test]
fn test_reframing_record_contents() {
    let j = Journal::new();
    let store = j.store();
    let mut state = SessionState::new(ctx());
    state.set_from_input(FormId::Reframing, "emotions", "worried sad").unwrap();
    state.set_from_input(FormId::Reframing, "fact", "They ignored my message").unwrap();
    state.set_from_input(FormId::Reframing, "catastrophe", "y").unwrap();
    state.set(FormId::Reframing, "distress_after", 3_i64).unwrap();

    AddLogic::submit(&mut state, &store, FormId::Reframing).unwrap();

    let row = &store.load(RecordKind::ReframingNote).rows[0];
    assert_eq!(row.get_list("emotions"), vec!["😟", "😢"]);
    assert_eq!(row.get_bool("catastrophe"), Some(true));
    assert_eq!(row.get_bool("bw"), Some(false));
    assert_eq!(row.get_i64("distress_before"), Some(5));
    assert_eq!(row.get_i64("distress_after"), Some(3));
}

#[test]
fn test_wizard_blank_keeps_and_invalid_reprompts() {
    let mut state = SessionState::new(ctx());
    state.set(FormId::Study, "minutes", 30_i64).unwrap();

    // subject, minutes (invalid then blank), note
    let mut input = Cursor::new("geometry\nlots\n\nproofs\n");
    let mut out = Vec::new();
    let done = Wizard::run(&mut state, FormId::Study, &mut input, &mut out).unwrap();

    assert!(done);
    assert_eq!(
        state.get(FormId::Study, "subject"),
        Some(&FieldValue::Text("geometry".into()))
    );
    assert_eq!(state.get(FormId::Study, "minutes"), Some(&FieldValue::Int(30)));
    assert_eq!(state.get(FormId::Study, "note"), Some(&FieldValue::Text("proofs".into())));

    let shown = String::from_utf8(out).unwrap();
    assert!(shown.contains("[30]"));
    assert!(shown.contains("not a whole number"));
}

#[test]
fn test_wizard_stops_at_end_of_input() {
    let mut state = SessionState::new(ctx());
    let mut input = Cursor::new("chess\n");
    let mut out = Vec::new();

    let done = Wizard::run(&mut state, FormId::Study, &mut input, &mut out).unwrap();
    assert!(!done);
    assert_eq!(
        state.get(FormId::Study, "subject"),
        Some(&FieldValue::Text("chess".into()))
    );
}

#[test]
fn test_append_text_closes_open_sentence() {
    let mut state = SessionState::new(ctx());
    state.append_text(FormId::Reframing, "alt", "First idea").unwrap();
    assert_eq!(
        state.get(FormId::Reframing, "alt"),
        Some(&FieldValue::Text("First idea".into()))
    );

    state.append_text(FormId::Reframing, "alt", "Second idea.").unwrap();
    state.append_text(FormId::Reframing, "alt", "Third").unwrap();
    assert_eq!(
        state.get(FormId::Reframing, "alt"),
        Some(&FieldValue::Text("First idea. Second idea. Third".into()))
    );
}

#[test]
fn test_wizard_offers_tips_for_ticked_checks() {
    let mut state = SessionState::new(ctx());

    // five defaults, fact, alt, checks (bw and decide ticked),
    // accept the bw tip, decline the decide tip, three defaults
    let script = "\n\n\n\n\nLate reply\nMaybe busy\ny\n\n\n\ny\ny\nn\n\n\n\n";
    let mut input = Cursor::new(script);
    let mut out = Vec::new();

    let done = Wizard::run(&mut state, FormId::Reframing, &mut input, &mut out).unwrap();
    assert!(done);

    let shown = String::from_utf8(out).unwrap();
    assert!(shown.contains("Maybe part of it is OK"));
    assert!(shown.contains("leave it open"));
    assert!(!shown.contains("Other outcomes"));

    assert_eq!(
        state.get(FormId::Reframing, "alt"),
        Some(&FieldValue::Text("Maybe busy. 🌷 Maybe part of it is OK, too.".into()))
    );
}
