//! Basic CLI E2E tests.
//!
//! Each test runs the compiled binary against a throwaway home directory so
//! state and config never leak between tests.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `home` and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_timeboxer-cli"))
        .env("HOME", home)
        .env_remove("TIMEBOXER_ENV")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_session_start_and_status() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["session", "start", "write-report"]);
    assert_eq!(code, 0, "session start failed");
    assert!(stdout.contains("SessionStarted"));
    assert!(stdout.contains("\"taskId\": \"write-report\""));
    assert!(stdout.contains("\"durationMinutes\": 25"));

    let (stdout, _, code) = run_cli(home.path(), &["session", "status"]);
    assert_eq!(code, 0, "session status failed");
    assert!(stdout.contains("\"status\": \"running\""));
    assert!(stdout.contains("\"remainingSeconds\": 1500"));
}

#[test]
fn test_tick_counts_down_one_second() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(home.path(), &["session", "start", "t", "--minutes", "1"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["session", "tick"]);
    assert_eq!(code, 0, "session tick failed");
    assert!(stdout.contains("\"remainingSeconds\": 59"));
}

#[test]
fn test_oversized_minutes_starts_without_crashing() {
    let home = tempfile::tempdir().unwrap();

    // 71_582_789 minutes is the first duration whose second count exceeds
    // the countdown's range; it must saturate, not abort the process.
    let (stdout, _, code) = run_cli(
        home.path(),
        &["session", "start", "marathon", "--minutes", "71582789"],
    );
    assert_eq!(code, 0, "oversized box should start, not crash");
    assert!(stdout.contains("SessionStarted"));

    let (stdout, _, code) = run_cli(home.path(), &["session", "status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"status\": \"running\""));
}

#[test]
fn test_double_start_is_a_quiet_no_op() {
    let home = tempfile::tempdir().unwrap();

    run_cli(home.path(), &["session", "start", "first"]);
    let (stdout, _, code) = run_cli(home.path(), &["session", "start", "second"]);
    assert_eq!(code, 0, "second start should not fail");
    // No transition: the snapshot still shows the first task.
    assert!(stdout.contains("StateSnapshot"));
    assert!(stdout.contains("\"activeTaskId\": \"first\""));
}

#[test]
fn test_abandon_without_a_box_exits_zero() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["session", "abandon"]);
    assert_eq!(code, 0, "abandon with nothing running should be a no-op");
    assert!(stdout.contains("\"status\": \"idle\""));
}

#[test]
fn test_one_minute_box_runs_to_completion() {
    let home = tempfile::tempdir().unwrap();

    run_cli(home.path(), &["session", "start", "deep-work", "--minutes", "1"]);

    let mut last = String::new();
    for _ in 0..60 {
        let (stdout, _, code) = run_cli(home.path(), &["session", "tick"]);
        assert_eq!(code, 0);
        last = stdout;
    }
    assert!(last.contains("SessionCompleted"), "got: {last}");
    assert!(last.contains("\"taskId\": \"deep-work\""));

    let (stdout, _, code) = run_cli(home.path(), &["stats", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"completed\": 1"));

    // Completed sessions must be acknowledged before the next start.
    let (stdout, _, code) = run_cli(home.path(), &["session", "reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("SessionReset"));
}

#[test]
fn test_abandon_reports_parked_thoughts() {
    let home = tempfile::tempdir().unwrap();

    run_cli(home.path(), &["session", "start", "focus-task"]);
    let (stdout, _, code) = run_cli(
        home.path(),
        &["park", "add", "look up that library", "--kind", "search"],
    );
    assert_eq!(code, 0, "park add failed");
    assert!(stdout.contains("Parked: thought-"));

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["session", "abandon", "--reason", "phone call"],
    );
    assert_eq!(code, 0, "abandon failed");
    assert!(stdout.contains("SessionAbandoned"));
    assert!(stderr.contains("parked during this box: 1"));
}

#[test]
fn test_park_roundtrip() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["park", "add", "email alice back"]);
    assert_eq!(code, 0);
    let id = stdout
        .trim()
        .strip_prefix("Parked: ")
        .expect("park add should print the id")
        .to_string();

    let (stdout, _, code) = run_cli(home.path(), &["park", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("list should be JSON");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(1));
    assert_eq!(parsed[0]["content"], "email alice back");
    assert_eq!(parsed[0]["kind"], "memo");

    let (stdout, _, code) = run_cli(
        home.path(),
        &["park", "done", &id, "--resolution", "sent it"],
    );
    assert_eq!(code, 0, "park done failed");
    assert!(stdout.contains("\"status\": \"done\""));
    assert!(stdout.contains("\"resolution\": \"sent it\""));

    // Nothing pending anymore, but --all still shows the resolved entry.
    let (stdout, _, _) = run_cli(home.path(), &["park", "list"]);
    assert_eq!(stdout.trim(), "[]");
    let (stdout, _, _) = run_cli(home.path(), &["park", "list", "--all"]);
    assert!(stdout.contains(&id));
}

#[test]
fn test_park_done_unknown_id_fails() {
    let home = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["park", "done", "thought-nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_recommend_next_on_empty_pool_yields_sentinel() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["recommend", "next"]);
    assert_eq!(code, 0, "recommend next failed");
    assert!(stdout.contains("\"taskId\": \"dummy\""));
    assert!(stdout.contains("\"durationMinutes\": 15"));
}

#[test]
fn test_task_sync_feeds_the_pool_and_recommends() {
    let home = tempfile::tempdir().unwrap();

    // No backend configured: sync falls back to the built-in pool.
    let (stdout, _, code) = run_cli(home.path(), &["task", "sync"]);
    assert_eq!(code, 0, "task sync failed");
    assert!(stdout.contains("Synced 3 tasks into the pool"));
    // The urgent placeholder wins the local pick.
    assert!(stdout.contains("\"taskId\": \"deep-work\""));

    let (stdout, _, code) = run_cli(home.path(), &["task", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("list should be JSON");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(3));
}

#[test]
fn test_task_list_starts_empty() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["task", "list"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_stats_start_at_zero() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["stats", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"total\": 0"));
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(
        home.path(),
        &["config", "set", "watcher.cooldown_secs", "9"],
    );
    assert_eq!(code, 0, "config set failed");
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "watcher.cooldown_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "9");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_show_prints_toml() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[backend]"));
    assert!(stdout.contains("[watcher]"));
}

#[test]
fn test_config_set_rejects_bad_url() {
    let home = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "backend.url", "not a url"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_watch_without_a_running_box_returns() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["session", "watch"]);
    assert_eq!(code, 0, "watch with nothing running should return at once");
    assert!(stdout.contains("\"status\": \"idle\""));
}

#[test]
fn test_idle_nudge_reaches_stderr() {
    let home = tempfile::tempdir().unwrap();

    // A zero threshold makes any gap between invocations count as idle.
    let (stdout, _, code) = run_cli(
        home.path(),
        &["config", "set", "watcher.idle_threshold_secs", "0"],
    );
    assert_eq!(code, 0, "config set failed");
    assert_eq!(stdout.trim(), "ok");

    // The start arms the watcher; the next invocation finds a running box
    // and an elapsed gap, so the nudge fires.
    run_cli(home.path(), &["session", "start", "focus-task"]);
    let (_, stderr, code) = run_cli(home.path(), &["session", "status"]);
    assert_eq!(code, 0);
    assert!(
        stderr.contains("note: idle for"),
        "expected an idle nudge on stderr, got: {stderr}"
    );
    assert!(stderr.contains("with a box on the clock"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(home.path(), &["frobnicate"]);
    assert_ne!(code, 0);
}
