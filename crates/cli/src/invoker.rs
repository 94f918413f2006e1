// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tool invocation and output capture.
//!
//! The tool under test runs as a child process with exactly the positional
//! arguments of its [`InvocationSpec`]: no shell interpretation, no
//! environment mutation beyond inheriting the parent's. The call blocks
//! until the child exits; no timeout is imposed, matching the tools'
//! assumption that they terminate. A hung tool hangs the harness.

use std::process::Command;

use crate::contract::InvocationSpec;
use crate::error::HarnessError;

/// Captured output of one tool invocation. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

impl ToolResult {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

/// Launch the tool and capture stdout, stderr, and exit status.
///
/// `Output`-based capture reaps the child on every path, so the process
/// handle cannot leak even when the harness errors afterwards. Streams are
/// decoded as UTF-8; a decoding failure is a harness error, not a tool
/// failure. A child killed by a signal reports exit code -1.
pub fn invoke(spec: &InvocationSpec) -> Result<ToolResult, HarnessError> {
    tracing::debug!(
        tool = %spec.tool_path().display(),
        argc = spec.arguments().len(),
        "invoking tool under test"
    );

    let output = Command::new(spec.tool_path())
        .args(spec.arguments())
        .output()
        .map_err(|e| {
            HarnessError::resource_io(
                format!(
                    "cannot launch tool under test {}",
                    spec.tool_path().display()
                ),
                e,
            )
        })?;

    let stdout = String::from_utf8(output.stdout).map_err(|e| HarnessError::InvalidOutput {
        stream: "stdout",
        source: e,
    })?;
    let stderr = String::from_utf8(output.stderr).map_err(|e| HarnessError::InvalidOutput {
        stream: "stderr",
        source: e,
    })?;
    let exit_code = output.status.code().unwrap_or(-1);

    tracing::debug!(exit_code, "tool under test exited");
    Ok(ToolResult {
        stdout,
        stderr,
        exit_code,
    })
}

#[cfg(all(test, unix))]
#[path = "invoker_tests.rs"]
mod tests;
