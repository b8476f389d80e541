//! Integration tests for the qstr CLI
//!
//! These tests run the binary and check exit codes and output.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Build a qstr command isolated from any user or project qstr.toml
fn qstr(workdir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qstr"));
    cmd.current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir)
        .env("HOME", workdir)
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_strip_args() {
    let dir = TempDir::new().unwrap();
    let output = qstr(dir.path())
        .args(["strip", "Anti^x444body", "^7Antibody"])
        .output()
        .expect("Failed to execute qstr");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "Antibody\nAntibody\n");
}

#[test]
fn test_html_stdin() {
    let dir = TempDir::new().unwrap();
    let mut child = qstr(dir.path())
        .arg("html")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn qstr");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"^1a\nplain<\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "<span style=\"color:rgb(255,0,0)\">a</span>\nplain&lt;\n"
    );
}

#[test]
fn test_strip_stdin_with_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let mut child = qstr(dir.path())
        .arg("strip")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn qstr");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"^1a\xff\n^2b\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "a\u{fffd}\nb\n");
}

#[test]
fn test_parts_file_preserves_order() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("names.txt");
    let lines: Vec<String> = (0..50).map(|i| format!("^{}name{}", i % 10, i)).collect();
    fs::write(&input, lines.join("\n")).unwrap();

    let output = qstr(dir.path())
        .arg("parts")
        .arg("--file")
        .arg(&input)
        .output()
        .expect("Failed to execute qstr");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let rendered: Vec<&str> = stdout.lines().collect();
    assert_eq!(rendered.len(), 50);
    for (i, line) in rendered.iter().enumerate() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value[0]["text"], format!("name{}", i));
    }
}

#[test]
fn test_config_decode_and_leading_color() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("qstr.toml"),
        "[render]\nleading_color = \"000\"\n\n[[decode]]\nfrom = \"(c)\"\nto = \"©\"\n",
    )
    .unwrap();

    let output = qstr(dir.path())
        .args(["parts", "(c)"])
        .output()
        .expect("Failed to execute qstr");
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output).trim(),
        r#"[{"text":"©","color":{"r":0.0,"g":0.0,"b":0.0}}]"#
    );

    let output = qstr(dir.path())
        .args(["--no-decode", "strip", "(c)"])
        .output()
        .expect("Failed to execute qstr");
    assert_eq!(stdout_of(&output), "(c)\n");
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[html]\nlightness_floor = 0.9\nlightness_ceiling = 0.1\n").unwrap();

    let output = qstr(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["strip", "x"])
        .output()
        .expect("Failed to execute qstr");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("html.lightness_floor"), "stderr: {}", stderr);
}

#[test]
fn test_color_command() {
    let dir = TempDir::new().unwrap();
    let output = qstr(dir.path())
        .args(["color", "f00"])
        .output()
        .expect("Failed to execute qstr");

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "rgb(255,0,0)\nhsl(0, 100%, 50%)\n<span style=\"color:rgb(255,0,0)\">\n"
    );
}

#[test]
fn test_color_command_capped() {
    let dir = TempDir::new().unwrap();
    let output = qstr(dir.path())
        .args(["color", "000", "--floor", "0.5", "--ceiling", "1.0"])
        .output()
        .expect("Failed to execute qstr");

    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("rgb(128,128,128)\n"));
}

#[test]
fn test_color_command_negative_floor_warns() {
    let dir = TempDir::new().unwrap();
    let output = qstr(dir.path())
        .args(["color", "000", "--floor", "-1", "--ceiling", "1"])
        .output()
        .expect("Failed to execute qstr");

    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("rgb(0,0,0)\n"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid"), "stderr: {}", stderr);
}

#[test]
fn test_color_command_invalid_hex() {
    let dir = TempDir::new().unwrap();
    let output = qstr(dir.path())
        .args(["color", "xyz"])
        .output()
        .expect("Failed to execute qstr");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_palette_lists_ten_entries() {
    let dir = TempDir::new().unwrap();
    let output = qstr(dir.path())
        .arg("palette")
        .output()
        .expect("Failed to execute qstr");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 10);
    assert!(stdout.lines().next().unwrap().starts_with("^0"));
}

#[test]
fn test_file_conflicts_with_texts() {
    let dir = TempDir::new().unwrap();
    let output = qstr(dir.path())
        .args(["strip", "text", "--file", "x.txt"])
        .output()
        .expect("Failed to execute qstr");

    assert_eq!(output.status.code(), Some(2));
}
