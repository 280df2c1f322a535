use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{Journal, out_dir, rcl, seed_study};
use rcalmlog::models::RecordKind;

#[test]
fn test_init_creates_data_dir() {
    let tmp = out_dir();
    let data = tmp.path().join("journal");
    let data_str = data.to_string_lossy().to_string();

    rcl()
        .args(["--test", "--data-dir", &data_str, "init"])
        .assert()
        .success()
        .stdout(contains("Data dir"))
        .stdout(contains("initialization completed"));

    assert!(data.is_dir());
    assert!(data.join("activity_log.csv").is_file());
}

#[test]
fn test_add_with_set_then_list() {
    let j = Journal::new();

    j.cmd()
        .args([
            "add",
            "study",
            "--set",
            "subject=Rust lifetimes",
            "--set",
            "minutes=45",
        ])
        .assert()
        .success()
        .stdout(contains("study entry saved"));

    j.cmd()
        .args(["list", "study"])
        .assert()
        .success()
        .stdout(contains("Rust lifetimes"))
        .stdout(contains("45 min"));
}

#[test]
fn test_add_missing_required_field_fails() {
    let j = Journal::new();

    j.cmd()
        .args(["add", "study", "--set", "minutes=10"])
        .assert()
        .failure()
        .stderr(contains("Error:").and(contains("subject")));

    assert!(j.store().load(RecordKind::StudyBlock).is_empty());
}

#[test]
fn test_add_invalid_value_fails() {
    let j = Journal::new();

    j.cmd()
        .args(["add", "mood", "--set", "mood=12"])
        .assert()
        .failure()
        .stderr(contains("Invalid value for field 'mood'"));

    j.cmd()
        .args(["add", "mood", "--set", "sparkle=yes"])
        .assert()
        .failure()
        .stderr(contains("Unknown field 'sparkle'"));

    j.cmd()
        .args(["add", "mood", "--set", "no-equals-sign"])
        .assert()
        .failure();
}

#[test]
fn test_add_breath_is_rejected() {
    let j = Journal::new();
    j.cmd()
        .args(["add", "breath", "--set", "total_seconds=60"])
        .assert()
        .failure()
        .stderr(contains("breathe"));
}

#[test]
fn test_add_wizard_from_stdin() {
    let j = Journal::new();

    // subject, minutes (blank keeps 25), note
    j.cmd()
        .args(["add", "study"])
        .write_stdin("piano scales\n\nslow practice\n")
        .assert()
        .success()
        .stdout(contains("[25]"))
        .stdout(contains("study entry saved"));

    let table = j.store().load(RecordKind::StudyBlock);
    assert_eq!(table.rows[0].get("subject"), Some("piano scales"));
    assert_eq!(table.rows[0].get_i64("minutes"), Some(25));
    assert_eq!(table.rows[0].get("note"), Some("slow practice"));
}

#[test]
fn test_add_wizard_interrupted_saves_nothing() {
    let j = Journal::new();

    j.cmd()
        .args(["add", "study"])
        .write_stdin("half an answer\n")
        .assert()
        .success()
        .stdout(contains("nothing saved"));

    assert!(j.store().load(RecordKind::StudyBlock).is_empty());
}

#[test]
fn test_support_message_after_heavy_note() {
    let j = Journal::new();

    j.cmd()
        .args(["add", "reframing", "--set", "distress_after=9", "--set", "fact=It went badly"])
        .assert()
        .success()
        .stdout(contains("You do not have to push yourself here."));

    j.cmd()
        .args(["add", "reflection", "--set", "loneliness=8"])
        .assert()
        .success()
        .stdout(contains("you are not alone"));

    j.cmd()
        .args(["add", "reflection", "--set", "loneliness=2", "--set", "small_win=cooked"])
        .assert()
        .success()
        .stdout(contains("already enough"));
}

#[test]
fn test_list_search_and_empty() {
    let j = Journal::new();
    seed_study(&j.store());

    j.cmd()
        .args(["list", "study", "--search", "OWNERSHIP"])
        .assert()
        .success()
        .stdout(contains("Rust ownership").and(contains("history").not()));

    j.cmd()
        .args(["list", "study", "--range", "2025-03", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("math").and(contains("history").not()));

    j.cmd()
        .args(["list", "mood"])
        .assert()
        .success()
        .stdout(contains("No mood check-ins found."));

    j.cmd()
        .args(["list", "study", "--range", "2025-99"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_stats_sum_and_mean() {
    let j = Journal::new();
    seed_study(&j.store());

    j.cmd()
        .args(["stats", "study", "--sum-by", "subject", "--value", "minutes"])
        .assert()
        .success()
        .stdout(contains("sum(minutes)"))
        .stdout(contains("math"))
        .stdout(contains("50"));

    j.cmd()
        .args(["stats", "study", "--mean", "minutes", "--range", "2025-03"])
        .assert()
        .success()
        .stdout(contains("mean(minutes) = 32.50 over 2 entries"));

    j.cmd().args(["stats", "study"]).assert().failure();
}

#[test]
fn test_export_csv_and_json() {
    let j = Journal::new();
    seed_study(&j.store());
    let out = out_dir();

    let csv_path = out.path().join("study.csv");
    let csv_str = csv_path.to_string_lossy().to_string();
    j.cmd()
        .args(["export", "study", "--format", "csv", "--file", &csv_str])
        .assert()
        .success();
    let content = fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("id,timestamp,"));
    assert!(content.contains("Rust ownership"));

    let json_path = out.path().join("study.json");
    let json_str = json_path.to_string_lossy().to_string();
    j.cmd()
        .args([
            "export", "study", "--format", "json", "--file", &json_str, "--range", "2025-03",
        ])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn test_export_requires_absolute_path() {
    let j = Journal::new();
    seed_study(&j.store());

    j.cmd()
        .args(["export", "study", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}

#[test]
fn test_export_existing_file_needs_confirmation_or_force() {
    let j = Journal::new();
    seed_study(&j.store());
    let out = out_dir();
    let path = out.path().join("study.csv");
    fs::write(&path, "keep me").unwrap();
    let path_str = path.to_string_lossy().to_string();

    j.cmd()
        .args(["export", "study", "--file", &path_str])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("cancelled"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

    j.cmd()
        .args(["export", "study", "--file", &path_str, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("history"));
}

#[test]
fn test_export_empty_selection_writes_nothing() {
    let j = Journal::new();
    seed_study(&j.store());
    let out = out_dir();
    let path = out.path().join("none.csv");
    let path_str = path.to_string_lossy().to_string();

    j.cmd()
        .args(["export", "study", "--file", &path_str, "--range", "2019"])
        .assert()
        .success()
        .stdout(contains("No study blocks found"));
    assert!(!path.exists());
}

#[test]
fn test_export_all_into_directory() {
    let j = Journal::new();
    seed_study(&j.store());
    j.cmd()
        .args(["add", "mood", "--set", "mood=6", "--set", "emotions=calm"])
        .assert()
        .success();
    let out = out_dir();
    let dir = out.path().join("dump");
    let dir_str = dir.to_string_lossy().to_string();

    j.cmd()
        .args(["export", "all", "--format", "json", "--file", &dir_str])
        .assert()
        .success();

    assert!(dir.join("study_block.json").is_file());
    assert!(dir.join("mood_checkin.json").is_file());
    assert!(!dir.join("breath_session.json").exists());
    let mood = fs::read_to_string(dir.join("mood_checkin.json")).unwrap();
    assert!(mood.contains("🙂"));
}

#[test]
fn test_wipe_kind_and_all() {
    let j = Journal::new();
    seed_study(&j.store());
    j.cmd()
        .args(["add", "mood", "--set", "mood=4"])
        .assert()
        .success();

    // declined confirmation keeps data
    j.cmd()
        .args(["wipe", "study"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Nothing deleted"));
    assert_eq!(j.store().load(RecordKind::StudyBlock).len(), 4);

    j.cmd()
        .args(["wipe", "study", "--yes"])
        .assert()
        .success()
        .stdout(contains("Study blocks deleted."));
    assert!(!j.file(RecordKind::StudyBlock).exists());
    assert_eq!(j.store().load(RecordKind::MoodCheckin).len(), 1);

    j.cmd().args(["wipe", "all", "--yes"]).assert().success();
    assert!(j.store().load(RecordKind::MoodCheckin).is_empty());
    // the activity log survives and records the wipes
    let log = j.store().load(RecordKind::ActivityLog);
    assert!(log.rows.iter().any(|r| r.get("operation") == Some("wipe")));
}

#[test]
fn test_backup_copy_and_zip() {
    let j = Journal::new();
    seed_study(&j.store());
    j.cmd()
        .args(["add", "mood", "--set", "mood=7"])
        .assert()
        .success();
    let out = out_dir();

    let copy_dir = out.path().join("copy");
    let copy_str = copy_dir.to_string_lossy().to_string();
    j.cmd()
        .args(["backup", "--file", &copy_str])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(copy_dir.join("study_block.csv").is_file());
    assert!(copy_dir.join("mood_checkin.csv").is_file());
    assert!(copy_dir.join("activity_log.csv").is_file());

    let zip_path = out.path().join("journal.zip");
    let zip_str = zip_path.to_string_lossy().to_string();
    j.cmd()
        .args(["backup", "--file", &zip_str, "--compress"])
        .assert()
        .success();

    let mut archive = zip::ZipArchive::new(fs::File::open(&zip_path).unwrap()).unwrap();
    assert!(archive.by_name("study_block.csv").is_ok());
    assert!(archive.by_name("mood_checkin.csv").is_ok());
}

#[test]
fn test_backup_empty_journal_fails() {
    let j = Journal::new();
    let out = out_dir();
    let dest = out.path().join("b").to_string_lossy().to_string();

    j.cmd()
        .args(["backup", "--file", &dest])
        .assert()
        .failure()
        .stderr(contains("No data files"));
}

#[test]
fn test_log_print_lists_operations() {
    let j = Journal::new();

    j.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log is empty"));

    j.cmd()
        .args(["add", "study", "--set", "subject=chess"])
        .assert()
        .success();

    j.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log:"))
        .stdout(contains("study_block"));
}

#[test]
fn test_config_print() {
    let j = Journal::new();
    j.cmd()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("breath_pattern"))
        .stdout(contains("inhale:4,exhale:6"))
        .stdout(contains(j.data_dir()));
}

#[test]
fn test_breathe_rejects_bad_input_before_starting() {
    let j = Journal::new();

    j.cmd()
        .args(["breathe", "--pattern", "inhale:x"])
        .assert()
        .failure()
        .stderr(contains("Invalid breathing pattern"));

    j.cmd()
        .args(["breathe", "--pattern", "inhale:4294967295,exhale:1"])
        .assert()
        .failure()
        .stderr(contains("Invalid breathing pattern"));

    j.cmd()
        .args(["breathe", "--seconds", "5"])
        .assert()
        .failure()
        .stderr(contains("total_seconds"));

    j.cmd()
        .args(["breathe", "--mood-after", "11"])
        .assert()
        .failure()
        .stderr(contains("mood_after"));

    assert!(j.store().load(RecordKind::BreathSession).is_empty());
}

#[test]
fn test_breathe_short_session_is_recorded() {
    let j = Journal::new();

    j.cmd()
        .args([
            "breathe",
            "--seconds",
            "10",
            "--pattern",
            "in:5,out:5",
            "--mood-before",
            "3",
            "--mood-after",
            "6",
        ])
        .assert()
        .success()
        .stdout(contains("Session complete"))
        .stdout(contains("Breathing session saved"));

    let table = j.store().load(RecordKind::BreathSession);
    let row = &table.rows[0];
    assert_eq!(row.get("outcome"), Some("completed"));
    assert_eq!(row.get_i64("elapsed_seconds"), Some(10));
    assert_eq!(row.get_i64("cycles"), Some(1));
    assert_eq!(row.get_i64("mood_delta"), Some(3));
}
