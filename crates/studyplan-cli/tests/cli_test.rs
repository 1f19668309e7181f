//! End-to-end tests for the `studyplan` binary.
//!
//! Each test writes a plan into a temporary directory and runs the compiled
//! binary against it with a pinned `--today`, an isolated config directory
//! and a cleared environment for the studyplan variables.

use std::path::Path;
use std::process::{Command, Output};

use studyplan_test_utils::write_plan;

const PLAN: &str = r#"# Spring exam prep
[plan]
exam = "Biology Final"
exam_date = "2026-03-11"
daily_hours = 2

[[topics]]
name = "Ecology"
difficulty = "easy"
hours = 2

[[topics]]
name = "Genetics"
difficulty = "hard"
hours = 4
"#;

const TODAY: &str = "2026-03-01";

fn studyplan(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_studyplan"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("STUDYPLAN_DAILY_HOURS")
        .env_remove("STUDYPLAN_TODAY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run studyplan binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

// -----------------------------------------------------------------------
// build
// -----------------------------------------------------------------------

#[test]
fn build_json_matches_schedule() {
    let fixture = write_plan(PLAN);
    let plan = fixture.plan_path.to_str().unwrap();

    let output = studyplan(
        fixture.dir.path(),
        &["build", plan, "--today", TODAY, "--format", "json"],
    );
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["exam_name"], "Biology Final");
    assert_eq!(value["days_until_exam"], 10);
    assert_eq!(value["total_estimated_hours"], 6);
    assert_eq!(value["total_available_hours"], 20);

    let ids: Vec<&str> = value["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "Genetics-2026-03-01-study",
            "Genetics-2026-03-02-study",
            "Ecology-2026-03-03-study",
            "Genetics-review",
            "Ecology-review",
            "final-review",
        ]
    );
}

#[test]
fn build_text_output_groups_by_day() {
    let fixture = write_plan(PLAN);
    let plan = fixture.plan_path.to_str().unwrap();

    let output = studyplan(fixture.dir.path(), &["build", plan, "--today", TODAY]);
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("Exam: Biology Final on 2026-03-11 (10 days away)"));
    assert!(text.contains("2026-03-08 (Sun)"));
    assert!(text.contains("final-review"));
    assert!(stderr(&output).is_empty(), "unexpected stderr: {}", stderr(&output));
}

#[test]
fn build_writes_csv_to_file() {
    let fixture = write_plan(PLAN);
    let plan = fixture.plan_path.to_str().unwrap();
    let out_path = fixture.dir.path().join("schedule.csv");

    let output = studyplan(
        fixture.dir.path(),
        &[
            "build",
            plan,
            "--today",
            TODAY,
            "--format",
            "csv",
            "--output",
            out_path.to_str().unwrap(),
        ],
    );
    assert_success(&output);
    assert!(stdout(&output).contains("Wrote 6 tasks"));

    let csv = std::fs::read_to_string(&out_path).unwrap();
    assert!(csv.starts_with("id,date,topic,type,hours,difficulty\n"));
    assert_eq!(csv.lines().count(), 7);
}

#[test]
fn daily_hours_flag_overrides_plan_file() {
    let fixture = write_plan(PLAN);
    let plan = fixture.plan_path.to_str().unwrap();

    let output = studyplan(
        fixture.dir.path(),
        &["build", plan, "--today", TODAY, "--daily-hours", "6", "--format", "json"],
    );
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total_available_hours"], 60);
    // Everything fits on the first day.
    let study_dates: Vec<&str> = value["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["kind"] == "study")
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(study_dates, vec!["2026-03-01", "2026-03-01"]);
}

#[test]
fn overcommitted_plan_succeeds_with_warning() {
    let fixture = write_plan(
        r#"
[plan]
exam = "Anatomy"
exam_date = "2026-03-04"
daily_hours = 1

[[topics]]
name = "Bones"
difficulty = "hard"
hours = 6
"#,
    );
    let plan = fixture.plan_path.to_str().unwrap();

    let output = studyplan(
        fixture.dir.path(),
        &["build", plan, "--today", TODAY, "--format", "json"],
    );
    assert_success(&output);
    assert!(stderr(&output).contains("overcommitted"));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["warnings"][0]["kind"], "overcommitted");
    assert_eq!(value["warnings"][0]["estimated_hours"], 6);
    assert_eq!(value["warnings"][0]["available_hours"], 3);
}

#[test]
fn exam_in_the_past_is_rejected() {
    let fixture = write_plan(PLAN);
    let plan = fixture.plan_path.to_str().unwrap();

    let output = studyplan(fixture.dir.path(), &["build", plan, "--today", "2026-03-11"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("must be after today"));
}

#[test]
fn default_hours_come_from_config_file() {
    let fixture = write_plan(
        r#"
[plan]
exam = "Biology Final"
exam_date = "2026-03-11"

[[topics]]
name = "Cells"
difficulty = "hard"
hours = 3
"#,
    );
    let plan = fixture.plan_path.to_str().unwrap();
    let home = fixture.dir.path();

    assert_success(&studyplan(home, &["init", "--default-hours", "3"]));
    assert!(home.join("studyplan/config.toml").exists());

    let output = studyplan(home, &["build", plan, "--today", TODAY, "--format", "json"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total_available_hours"], 30);

    // A second init without --force refuses to overwrite.
    let again = studyplan(home, &["init"]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("already exists"));
}

// -----------------------------------------------------------------------
// status / toggle
// -----------------------------------------------------------------------

#[test]
fn toggle_updates_status() {
    let fixture = write_plan(PLAN);
    let plan = fixture.plan_path.to_str().unwrap();
    let home = fixture.dir.path();

    let output = studyplan(home, &["toggle", plan, "Genetics-2026-03-01-study", "--today", TODAY]);
    assert_success(&output);
    assert!(stdout(&output).contains("as done"));
    assert!(home.join("plan.progress.toml").exists());

    let status = studyplan(home, &["status", plan, "--today", TODAY]);
    assert_success(&status);
    let text = stdout(&status);
    assert!(text.contains("Progress: 1/6 tasks, 2/10h (20%)"), "got:\n{text}");
    assert!(text.contains("[x] Genetics-2026-03-01-study"));
    assert!(text.contains("[ ] Genetics-2026-03-02-study"));

    let undo = studyplan(home, &["toggle", plan, "Genetics-2026-03-01-study", "--today", TODAY]);
    assert_success(&undo);
    assert!(stdout(&undo).contains("as not done"));
}

#[test]
fn toggle_unknown_task_fails() {
    let fixture = write_plan(PLAN);
    let plan = fixture.plan_path.to_str().unwrap();

    let output = studyplan(fixture.dir.path(), &["toggle", plan, "nope", "--today", TODAY]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no task with id \"nope\""));
}

// -----------------------------------------------------------------------
// new / topic
// -----------------------------------------------------------------------

#[test]
fn new_plan_then_topic_edits() {
    let tmp = tempfile::TempDir::new().unwrap();
    let home = tmp.path();
    let plan_path = home.join("chem.toml");
    let plan = plan_path.to_str().unwrap();

    assert_success(&studyplan(
        home,
        &["new", plan, "--exam", "Chemistry", "--date", "2026-03-15", "--daily-hours", "3"],
    ));

    // No topics yet: building fails, listing works.
    assert!(!studyplan(home, &["build", plan, "--today", TODAY]).status.success());
    assert!(stdout(&studyplan(home, &["topic", "list", plan])).contains("No topics yet"));

    assert_success(&studyplan(
        home,
        &["topic", "add", plan, "Acids", "--difficulty", "medium", "--hours", "4"],
    ));
    assert_success(&studyplan(
        home,
        &["topic", "add", plan, "Bonds", "--difficulty", "hard", "--hours", "2"],
    ));
    assert_success(&studyplan(home, &["topic", "set", plan, "1", "--hours", "5"]));

    let list = stdout(&studyplan(home, &["topic", "list", plan]));
    assert!(list.contains("Acids"));
    assert!(list.contains("Total: 7h"), "got:\n{list}");

    assert_success(&studyplan(home, &["topic", "remove", plan, "2"]));
    let written = std::fs::read_to_string(&plan_path).unwrap();
    assert!(written.contains("exam = \"Chemistry\""));
    assert!(written.contains("hours = 5"));
    assert!(!written.contains("Bonds"));

    assert_success(&studyplan(home, &["build", plan, "--today", TODAY]));
}

#[test]
fn new_rejects_zero_daily_hours() {
    let tmp = tempfile::TempDir::new().unwrap();
    let home = tmp.path();
    let plan_path = home.join("bio.toml");
    let plan = plan_path.to_str().unwrap();

    let output = studyplan(
        home,
        &["new", plan, "--exam", "Bio", "--date", "2026-03-11", "--daily-hours", "0"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--daily-hours must be at least 1"));
    assert!(!plan_path.exists(), "no plan file should be written");
}

#[test]
fn topic_set_out_of_range_fails() {
    let fixture = write_plan(PLAN);
    let plan = fixture.plan_path.to_str().unwrap();

    let output = studyplan(fixture.dir.path(), &["topic", "set", plan, "9", "--hours", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("out of range"));
}

#[test]
fn completions_are_generated() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = studyplan(tmp.path(), &["completions", "bash"]);
    assert_success(&output);
    assert!(stdout(&output).contains("studyplan"));
}
