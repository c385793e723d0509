use std::io::Write;
use std::process::{Command, Stdio};

fn yh_bin() -> String {
    env!("CARGO_BIN_EXE_yh").to_string()
}

fn write_config(dir: &std::path::Path) -> std::path::PathBuf {
    let cfg = dir.join("cfg.yaml");
    let yaml = format!(
        "session:\n  roll_animation_ms: 0\n  chance: deterministic\n  seed: 7\nscores:\n  path: {}\n  player_name: Tester\nlogging:\n  events_path: {}\n",
        dir.join("scores.json").display(),
        dir.join("events.ndjson").display()
    );
    std::fs::write(&cfg, yaml).unwrap();
    cfg
}

#[test]
fn help_runs() {
    let out = Command::new(yh_bin()).arg("--help").output().unwrap();
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stderr);
    assert!(s.contains("yh <COMMAND>"));
    assert!(s.contains("sim"));
}

#[test]
fn version_runs() {
    let out = Command::new(yh_bin()).arg("--version").output().unwrap();
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.starts_with("yh "));
}

#[test]
fn unknown_command_fails() {
    let out = Command::new(yh_bin()).arg("fly").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn sim_reports_summary() {
    let out = Command::new(yh_bin())
        .args(["sim", "--games", "50", "--seed", "3", "--strategy", "greedy"])
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.contains("Games: 50"));
    assert!(s.contains("Upper total: mean="));
    assert!(s.contains("mean="));
    assert!(s.contains("Score histogram"));
}

#[test]
fn sim_rejects_bad_strategy() {
    let out = Command::new(yh_bin())
        .args(["sim", "--strategy", "oracle"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown strategy"));
}

#[test]
fn play_full_game_then_list_scores() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path());

    let mut script = String::new();
    for cat in [
        "ones", "twos", "threes", "fours", "fives", "sixes", "3k", "4k", "fh", "ss", "ls", "y",
        "chance",
    ] {
        script.push_str(&format!("r\nr\ns {cat}\n"));
    }
    script.push_str("q\n");

    let mut child = Command::new(yh_bin())
        .args(["play", "--config"])
        .arg(&cfg)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(
        out.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.contains("GAME OVER"), "stdout:\n{s}");
    assert!(dir.path().join("events.ndjson").exists());

    let out = Command::new(yh_bin())
        .args(["scores", "--config"])
        .arg(&cfg)
        .output()
        .unwrap();
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.contains("HIGH SCORES"));
    assert!(s.contains("Tester"));
}

#[test]
fn scores_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path());
    let out = Command::new(yh_bin())
        .args(["scores", "--config"])
        .arg(&cfg)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("No high scores yet."));
}
