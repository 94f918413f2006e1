// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Stub tool-under-test and capture-tool executables are small shell
//! scripts, so everything here is unix-only, as are the test modules that
//! use it.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Writes an executable shell script at `dir/name` with the given body.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Creates a stub tool under test emitting fixed stdout/stderr and exit code.
///
/// The payloads are written to side files and `cat`-ed by the script, so
/// arbitrary content (quotes, newlines, no trailing newline) survives intact.
#[cfg(unix)]
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

/// Creates a stub tool that echoes each received argument on its own line.
#[cfg(unix)]
pub fn arg_echo_tool(dir: &Path, name: &str) -> PathBuf {
    write_script(dir, name, "printf '%s\\n' \"$@\"\n")
}

/// Creates a stub capture tool honoring the frozen capture contract:
/// `<tool> --output <db-path> -- <compiler> <source> -o <artifact>`.
///
/// Writes a minimal valid database to `<db-path>` and simulates the compile
/// byproduct by touching `<artifact>`.
#[cfg(unix)]
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

/// Creates a stub capture tool that fails without producing a database.
#[cfg(unix)]
pub fn failing_capture_tool(dir: &Path, name: &str) -> PathBuf {
    write_script(dir, name, "echo 'capture blew up' >&2\nexit 1\n")
}
