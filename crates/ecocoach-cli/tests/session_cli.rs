//! CLI E2E tests for the in-memory session and config commands.

mod common;

use common::{assert_contains, parse_json_stream, run_cli, run_cli_success};

#[test]
fn session_script_reports_leaderboard() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
# comment lines are skipped
log alice 2.5 took the bus
log bob 5 planted a tree
leaderboard
stats carol
";
    let out = run_cli_success(home.path(), &["session"], script);
    let docs = parse_json_stream(&out);
    assert_eq!(docs.len(), 4);

    assert_eq!(docs[0]["message"], "Activity logged! +2.5 kg CO2");
    assert_eq!(docs[0]["user"]["streak"], 1);
    assert_eq!(docs[1]["message"], "Activity logged! +5.0 kg CO2");

    let board = docs[2].as_array().unwrap();
    assert_eq!(board[0]["user_id"], "bob");
    assert_eq!(board[0]["total_carbon_saved"], 5.0);
    assert_eq!(board[1]["user_id"], "alice");

    assert_eq!(docs[3]["streak"], 0);
    assert_eq!(docs[3]["total_carbon_saved"], 0.0);
}

#[test]
fn session_keeps_going_after_a_bad_line() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
log alice -1 drove
remind alice daily bring a bottle
reminders alice
quit
log alice 1 never runs
";
    let (out, stderr, code) = run_cli(home.path(), &["session"], script);
    assert_eq!(code, 0);
    assert_contains(&stderr, "carbon_saved");

    let docs = parse_json_stream(&out);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["message"], "Reminder added!");
    let reminders = docs[1].as_array().unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0]["habit"], "bring a bottle");
    assert_eq!(reminders[0]["enabled"], true);
}

#[test]
fn session_challenge_is_stable() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["session"], "challenge\nchallenge\n");
    let docs = parse_json_stream(&out);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0], docs[1]);
    assert!(docs[0]["title"].is_string());
}

#[test]
fn session_chat_without_key_uses_fallback() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "coach.fallback_reply", "Keep it green!"], "");
    let out = run_cli_success(home.path(), &["session"], "chat alice any tips\n");
    let docs = parse_json_stream(&out);
    assert_eq!(docs[0]["reply"], "Keep it green!");
}

#[test]
fn config_get_set_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["config", "get", "coach.model"], "");
    assert_eq!(out.trim(), "llama-3.1-8b-instant");

    run_cli_success(home.path(), &["config", "set", "coach.timeout_secs", "12"], "");
    let out = run_cli_success(home.path(), &["config", "get", "coach.timeout_secs"], "");
    assert_eq!(out.trim(), "12");

    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "coach.nope"], "");
    assert_ne!(code, 0);
    assert_contains(&stderr, "unknown key");
}

#[test]
fn session_help_line_prints_usage_and_continues() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["session"], "help\nleaderboard\n");
    assert_contains(&out, "remind");
    assert!(out.trim_end().ends_with("[]"), "unexpected output: {out}");
}

#[test]
fn session_fails_when_stdout_is_closed() {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let home = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_ecocoach"))
        .arg("session")
        .env("HOME", home.path())
        .env("ECOCOACH_ENV", "dev")
        .env("GROQ_API_KEY", "")
        .env("RUST_LOG", "error")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // close the read end before the session writes anything
    drop(child.stdout.take());
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"help\nhelp\nhelp\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}
