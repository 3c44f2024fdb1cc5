//! End-to-end tests: run the `merkle-sweep` binary against a synthetic
//! benchmark executable written as a shell script.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

const BIN: &str = env!("CARGO_BIN_EXE_merkle-sweep");

/// Records its arguments, fails for arity 4, otherwise prints the usual figures.
const FAKE_BENCH: &str = r#"#!/bin/sh
echo "$*" >> "$CALLS_LOG"
case "$* " in
  *"-a 4 "*|*"--arity=4 "*)
    echo "boom: arity 4 unsupported"
    echo "stack overflow" >&2
    exit 2
    ;;
esac
echo "Allocating memory for $*"
echo "Updates per second: 1,234,567"
echo ""
echo "Total hashes computed: 42"
echo "Hasher per second: 9,999"
"#;

/// Written once so no test execs a script another thread still has open for writing
fn fake_bench() -> &'static Path {
    static BENCH: OnceLock<(tempfile::TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = BENCH.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-bench.sh");
        fs::write(&path, FAKE_BENCH).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        (dir, path)
    });
    path
}

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        fake_bench();
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_config(&self, body: &str) -> PathBuf {
        let path = self.path("sweep.toml");
        fs::write(&path, body).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(BIN)
            .args(args)
            .arg("--bench-bin")
            .arg(fake_bench())
            .env("CALLS_LOG", self.path("calls.log"))
            .env("RUST_LOG", "warn")
            .output()
            .unwrap()
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.path("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_missing_arguments_exit_1() {
    let fx = Fixture::new();
    for args in [
        vec!["sweep-batch", "merkle_sha3", "2 4"],
        vec!["sweep-grid"],
        vec!["sweep-grid-file", "merkle_sha3"],
    ] {
        let output = fx.run(&args);
        assert_eq!(output.status.code(), Some(1), "args {args:?}");
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    }
    assert!(fx.calls().is_empty());
}

#[test]
fn test_invalid_arity_leaves_destination_untouched() {
    let fx = Fixture::new();
    let out = fx.path("results.csv");
    let output = fx.run(&["sweep-batch", "merkle_sha3", "2 zero", out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    assert!(fx.calls().is_empty());
}

#[test]
fn test_unwritable_destination_exit_1() {
    let fx = Fixture::new();
    let out = fx.path("no-such-dir/results.csv");
    let output = fx.run(&["sweep-batch", "merkle_sha3", "2", out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(fx.calls().is_empty());
}

#[test]
fn test_sweep_batch_with_skip_and_failure() {
    let fx = Fixture::new();
    let out = fx.path("batch.csv");
    let output = fx.run(&["sweep-batch", "merkle_sha3", "#2 4 8", out.to_str().unwrap()]);
    assert!(output.status.success());

    let calls = fx.calls();
    assert_eq!(calls.len(), 42);
    assert_eq!(calls[0], "-t=merkle_sha3 --arity=4 -l=1073741824 -u=1");
    assert_eq!(calls[41], "-t=merkle_sha3 --arity=8 -l=1073741824 -u=1048576");
    assert!(calls.iter().all(|c| !c.contains("--arity=2 ")));

    let lines = read_lines(&out);
    assert_eq!(lines.len(), 22);
    assert_eq!(
        lines[0],
        "type,arity,num_leaves,batch_size,upds_per_sec,hashes_per_sec,num_hashes"
    );
    assert_eq!(lines[1], "merkle_sha3,8,1073741824,1,1234567,9999,42");
    assert_eq!(lines[21], "merkle_sha3,8,1073741824,1048576,1234567,9999,42");

    let status = stdout(&output);
    assert!(status.contains("Skipping arity 2 (marked with '#')"));
    assert_eq!(status.matches("===== run failed (exit status 2) =====").count(), 21);
    assert!(status.contains("boom: arity 4 unsupported\nstack overflow\n===== end of output ====="));
}

#[test]
fn test_sweep_grid_file_from_config() {
    let fx = Fixture::new();
    let config = fx.write_config(
        r##"
grid_leaf_counts = ["1e3", "#2e9", "1_000_000"]
grid_arities = ["2", "4", "#8", "16"]
"##,
    );
    let out = fx.path("grid.csv");
    let output = fx.run(&[
        "sweep-grid-file",
        "verkle",
        out.to_str().unwrap(),
        "500",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let calls = fx.calls();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls[0], "-t=verkle -a 2 -l 1000 -u 500");

    let lines = read_lines(&out);
    assert_eq!(
        lines,
        vec![
            "type,arity,num_leaves,num_updates,upds_per_sec,hashes_per_sec,num_hashes",
            "verkle,2,1000,500,1234567,9999,42",
            "verkle,16,1000,500,1234567,9999,42",
            "verkle,2,1000000,500,1234567,9999,42",
            "verkle,16,1000000,500,1234567,9999,42",
        ]
    );
    assert!(stdout(&output).contains("Skipping num_leaves 2e9 (marked with '#')"));
}

#[test]
fn test_rerun_appends_without_truncating() {
    let fx = Fixture::new();
    let config = fx.write_config("grid_leaf_counts = [\"64\"]\ngrid_arities = [\"2\"]\n");
    let out = fx.path("append.csv");
    fs::write(&out, "earlier,run\n").unwrap();

    for _ in 0..2 {
        let output = fx.run(&[
            "sweep-grid-file",
            "merkle++",
            out.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]);
        assert!(output.status.success());
    }

    let lines = read_lines(&out);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "earlier,run");
    assert!(lines[1].starts_with("type,"));
    assert_eq!(lines[2], "merkle++,2,64,200000,1234567,9999,42");
    assert_eq!(lines[3], lines[1]);
    assert_eq!(lines[4], lines[2]);
}

#[test]
fn test_sweep_grid_prints_rows_to_stdout() {
    let fx = Fixture::new();
    let config = fx.write_config("grid_leaf_counts = [\"64\"]\ngrid_arities = [\"2\", \"4\"]\n");
    let output = fx.run(&["sweep-grid", "merkle_sha3", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains(
        "type,arity,num_leaves,num_updates,upds_per_sec,hashes_per_sec,num_hashes\n"
    ));
    assert!(text.contains("merkle_sha3,2,64,200000,1234567,9999,42\n"));
    assert!(!text.contains("merkle_sha3,4,64"));
    assert_eq!(fx.calls(), vec![
        "-t=merkle_sha3 -a 2 -l 64 -u 200000",
        "-t=merkle_sha3 -a 4 -l 64 -u 200000",
    ]);
}

#[test]
fn test_missing_executable_does_not_abort() {
    let fx = Fixture::new();
    let config = fx.write_config("grid_leaf_counts = [\"64\"]\ngrid_arities = [\"2\", \"8\"]\n");
    let out = fx.path("missing.csv");
    let output = Command::new(BIN)
        .args([
            "sweep-grid-file",
            "merkle_sha3",
            out.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--bench-bin",
        ])
        .arg(fx.path("does-not-exist"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(read_lines(&out).len(), 1);
    assert_eq!(
        stdout(&output)
            .matches("===== run failed (spawn error) =====")
            .count(),
        2
    );
}

#[test]
fn test_digit_skip_marker_from_env_is_ignored() {
    let fx = Fixture::new();
    let config = fx.write_config("grid_leaf_counts = [\"64\"]\ngrid_arities = [\"2\", \"16\"]\n");
    let output = Command::new(BIN)
        .args(["sweep-grid", "merkle_sha3", "--config", config.to_str().unwrap()])
        .arg("--bench-bin")
        .arg(fake_bench())
        .env("CALLS_LOG", fx.path("calls.log"))
        .env("MERKLE_SWEEP_SKIP_MARKER", "1")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(fx.calls().len(), 2);
    assert!(!stdout(&output).contains("Skipping"));
}

#[test]
fn test_sweep_batch_comma_separated_arities() {
    let fx = Fixture::new();
    let out = fx.path("commas.csv");
    let output = fx.run(&["sweep-batch", "merkle_sha3", "2,8", out.to_str().unwrap()]);
    assert!(output.status.success());

    let calls = fx.calls();
    assert_eq!(calls.len(), 42);
    assert!(calls[0].contains("--arity=2 "));
    assert!(calls[21].contains("--arity=8 "));
    assert!(calls.iter().all(|c| !c.contains("--arity=28")));
    assert_eq!(read_lines(&out).len(), 43);
}
