//! End-to-end tests for the `reroot` binary contract.
//!
//! The binary is a filter: exactly one line on stdout (the original or
//! rewritten command), exit status 0 on every path, diagnostics only on
//! stderr and only when `REROOT_DEBUG` is set to a truthy value.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_reroot");

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .env_remove("REROOT_DEBUG")
        .output()
        .expect("failed to spawn reroot")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

/// Primary repository at `<tmp>/main` plus a linked worktree checkout at
/// `<tmp>/feature`. Returns the temp dir, the checkout root as created,
/// and the root as the OS reports it for a process running inside it
/// (symlinks resolved, e.g. `/var` vs `/private/var` on macOS).
fn worktree_fixture() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let metadata = temp.path().join("main/.git/worktrees/feature");
    fs::create_dir_all(&metadata).unwrap();
    let root = temp.path().join("feature");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join(".git"), format!("gitdir: {}\n", metadata.display())).unwrap();
    let resolved = root.canonicalize().unwrap();
    (temp, root, resolved)
}

#[cfg(unix)]
#[test]
fn rewrites_commands_run_inside_a_worktree() {
    let (_temp, root, resolved) = worktree_fixture();
    let output = run_in(&root, &["pytest", "tests/", "-v"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        format!("cd '{}' && pytest tests/ -v\n", resolved.display())
    );
    assert!(output.stderr.is_empty(), "no diagnostics without the flag");
}

#[cfg(unix)]
#[test]
fn places_the_background_operator_after_the_compound() {
    let (_temp, root, resolved) = worktree_fixture();
    let output = run_in(&root, &["long_task", "&"]);

    assert_eq!(
        stdout_of(&output),
        format!("cd '{}' && long_task &\n", resolved.display())
    );
}

#[test]
fn passes_commands_through_outside_worktrees() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["pytest", "tests/", "-v"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "pytest tests/ -v\n");
}

#[test]
fn passes_trivial_builtins_through_inside_worktrees() {
    let (_temp, root, _resolved) = worktree_fixture();
    for args in [
        &["pwd"][..],
        &["echo", "foo"][..],
        &["export", "X=1"][..],
        &["true"][..],
        &[":"][..],
        &["cd", "/tmp"][..],
    ] {
        let output = run_in(&root, args);
        assert!(output.status.success());
        assert_eq!(stdout_of(&output), format!("{}\n", args.join(" ")));
    }
}

#[test]
fn empty_invocation_echoes_an_empty_line() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &[]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "\n");
}

#[test]
fn hyphen_leading_words_are_part_of_the_command() {
    let temp = TempDir::new().unwrap();
    for args in [&["--help"][..], &["--version"][..], &["-rf", "x"][..]] {
        let output = run_in(temp.path(), args);
        assert!(output.status.success());
        assert_eq!(stdout_of(&output), format!("{}\n", args.join(" ")));
    }
}

#[cfg(unix)]
#[test]
fn debug_flag_traces_to_stderr_only() {
    let (_temp, root, resolved) = worktree_fixture();
    let output = Command::new(BIN)
        .args(["cargo", "check"])
        .current_dir(&root)
        .env("REROOT_DEBUG", "1")
        .output()
        .expect("failed to spawn reroot");

    assert!(output.status.success());
    // Primary output is unaffected by tracing
    assert_eq!(
        stdout_of(&output),
        format!("cd '{}' && cargo check\n", resolved.display())
    );
    assert!(!output.stderr.is_empty(), "expected trace lines on stderr");
}

#[test]
fn unrecognized_debug_values_stay_silent() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(BIN)
        .args(["make"])
        .current_dir(temp.path())
        .env("REROOT_DEBUG", "definitely")
        .output()
        .expect("failed to spawn reroot");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "make\n");
    assert!(output.stderr.is_empty());
}

/// Executing the rewritten line in a shell behaves like executing the
/// original command from the worktree root.
#[cfg(unix)]
#[test]
fn rewritten_command_is_behaviorally_transparent() {
    let (_temp, root, resolved) = worktree_fixture();
    let rewritten = stdout_of(&run_in(&root, &["ls"]));

    let via_rewrite = Command::new("sh")
        .arg("-c")
        .arg(rewritten.trim_end())
        .current_dir("/")
        .output()
        .expect("failed to spawn sh");
    let direct = Command::new("sh")
        .arg("-c")
        .arg("ls")
        .current_dir(&resolved)
        .output()
        .expect("failed to spawn sh");

    assert_eq!(via_rewrite.status.code(), direct.status.code());
    assert_eq!(via_rewrite.stdout, direct.stdout);
}
