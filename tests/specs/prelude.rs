//! Test helpers for behavioral specifications.
//!
//! Provides stub tool and capture-tool scripts plus a configured `Command`
//! for driving the cppconform binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;

/// Returns a Command configured to run the cppconform binary.
pub fn cppconform_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("cppconform"))
}

/// Writes an executable shell script at `dir/name` with the given body.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Creates a stub tool under test emitting fixed stdout/stderr and exit code.
pub fn stub_tool(dir: &Path, name: &str, stdout: &str, stderr: &str, exit_code: i32) -> PathBuf {
    let stdout_file = dir.join(format!("{name}.stdout"));
    let stderr_file = dir.join(format!("{name}.stderr"));
    fs::write(&stdout_file, stdout).unwrap();
    fs::write(&stderr_file, stderr).unwrap();
    write_script(
        dir,
        name,
        &format!(
            "cat \"{}\"\ncat \"{}\" >&2\nexit {}\n",
            stdout_file.display(),
            stderr_file.display(),
            exit_code
        ),
    )
}

/// Creates a stub capture tool honoring the frozen capture contract:
/// `<tool> --output <db-path> -- <compiler> <source> -o <artifact>`.
pub fn stub_capture_tool(dir: &Path, name: &str) -> PathBuf {
    write_script(
        dir,
        name,
        concat!(
            "db=\"$2\"\n",
            "artifact=\"$7\"\n",
            "printf '[{\"directory\":\"/tmp\",\"command\":\"g++ -c main.cpp\",",
            "\"file\":\"main.cpp\"}]' > \"$db\"\n",
            ": > \"$artifact\"\n",
        ),
    )
}

/// Writes a suite file with the given TOML content.
pub fn write_suite(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Get path to a test fixture.
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}
