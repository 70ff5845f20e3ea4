// Shared test helpers for integration tests: run the binary, build throwaway repos.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::{NamedTempFile, TempDir};

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_release-hooks"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Runs `release-hooks <subcommand> [extra_args]` with the given stdin.
/// Returns (stdout, stderr, exit_code).
pub fn run_hook_args(subcommand: &str, stdin_input: &str, extra_args: &[&str]) -> (String, String, i32) {
    let mut cmd = Command::new(binary_path());
    cmd.arg(subcommand).args(extra_args).env_remove("RELEASE_HOOKS_LOG");
    let output = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::ErrorKind;
            let write_result = child
                .stdin
                .take()
                .unwrap()
                .write_all(stdin_input.as_bytes());
            if let Err(e) = write_result {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e);
                }
            }
            child.wait_with_output()
        })
        .expect("failed to execute binary");

    let stdout = String::from_utf8(output.stdout).expect("stdout not valid UTF-8");
    let stderr = String::from_utf8(output.stderr).expect("stderr not valid UTF-8");
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}

pub fn run_hook(subcommand: &str, stdin_input: &str) -> (String, String, i32) {
    run_hook_args(subcommand, stdin_input, &[])
}

pub fn run_hook_with_config(subcommand: &str, stdin_input: &str, kdl: &str) -> (String, String, i32) {
    let mut tmpfile = NamedTempFile::new().expect("failed to create temp config");
    tmpfile
        .write_all(kdl.as_bytes())
        .expect("failed to write config");
    let config_path = tmpfile.path().to_str().unwrap().to_string();
    run_hook_args(subcommand, stdin_input, &["--config", &config_path])
}

/// Parses the single response line.
pub fn parse_response(stdout: &str) -> serde_json::Value {
    assert_eq!(stdout.lines().count(), 1, "expected exactly one line, got: {stdout:?}");
    serde_json::from_str(stdout.trim()).expect("stdout should be valid JSON")
}

pub fn request_json(repo: &Path, config: serde_json::Value) -> String {
    serde_json::json!({"project_root": repo, "config": config}).to_string()
}

pub fn tag_request_json(repo: &Path, version: &str, config: serde_json::Value) -> String {
    serde_json::json!({"project_root": repo, "version": version, "config": config}).to_string()
}

/// Run git in `dir`, panicking on failure. Returns trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("git {} failed to start: {e}", args.join(" ")));
    assert!(
        output.status.success(),
        "git {} failed:\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Whether a git command succeeds in `dir`.
pub fn git_ok(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A fresh repository on branch `main` with no commits.
pub fn init_repo() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path();
    git(path, &["init", "--quiet"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    for (key, val) in [
        ("user.email", "hooks@example.com"),
        ("user.name", "Hook Test"),
        ("commit.gpgsign", "false"),
        ("tag.gpgsign", "false"),
    ] {
        git(path, &["config", key, val]);
    }
    dir
}

pub fn commit(repo: &Path, subject: &str) {
    git(repo, &["commit", "--quiet", "--allow-empty", "-m", subject]);
}

pub fn repo_with_commits(subjects: &[&str]) -> TempDir {
    let repo = init_repo();
    for subject in subjects {
        commit(repo.path(), subject);
    }
    repo
}

/// Attach a bare repository as `origin`; returns it so it outlives the test.
pub fn add_bare_origin(repo: &Path) -> TempDir {
    let bare = TempDir::new().expect("tempdir");
    git(bare.path(), &["init", "--bare", "--quiet"]);
    let url = bare.path().to_str().unwrap().to_string();
    git(repo, &["remote", "add", "origin", &url]);
    bare
}
