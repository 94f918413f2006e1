// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expectation matching over captured tool results.
//!
//! `matches` is a pure predicate; `assert_matches` wraps it into a
//! descriptive failure carrying both expected and actual values. A failed
//! match is an assertion failure of the scenario, never a harness error.
//!
//! Two stdout equality strategies exist side by side: `ExactStdout` and
//! `TrimmedStdout`. Both are live contract variants of the
//! definition-generator tool and are kept distinct deliberately.

use std::fmt;
use std::path::PathBuf;

use crate::invoker::ToolResult;

/// Declarative expectation evaluated against exactly one [`ToolResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// stdout equals the expected text byte for byte.
    ExactStdout(String),
    /// stdout equals the expected text after right-stripping trailing
    /// whitespace from stdout only, never from the expectation.
    TrimmedStdout(String),
    /// Right-stripped stdout is a decimal line number, optionally suffixed
    /// with `p` ("insert a new public section here").
    LineNumber { line: u32, public_section: bool },
    /// stdout is the two newline-terminated paths, in either order.
    UnorderedPathPair(PathBuf, PathBuf),
    /// stderr starts with the literal prefix.
    StderrPrefix(String),
    /// The tool signaled an error through its exit code.
    NonzeroExit,
    /// Exit code zero and empty stderr; the default "no errors" predicate.
    CleanSuccess,
}

impl Expectation {
    /// Short strategy name used in failure reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Expectation::ExactStdout(_) => "exact stdout",
            Expectation::TrimmedStdout(_) => "trimmed stdout",
            Expectation::LineNumber { .. } => "line number",
            Expectation::UnorderedPathPair(..) => "unordered path pair",
            Expectation::StderrPrefix(_) => "stderr prefix",
            Expectation::NonzeroExit => "non-zero exit",
            Expectation::CleanSuccess => "clean success",
        }
    }

    fn expected_description(&self) -> String {
        match self {
            Expectation::ExactStdout(s) | Expectation::TrimmedStdout(s) => format!("{s:?}"),
            Expectation::LineNumber {
                line,
                public_section,
            } => {
                let flag = if *public_section { "p" } else { "" };
                format!("{:?}", format!("{line}{flag}"))
            }
            Expectation::UnorderedPathPair(a, b) => format!(
                "{:?} (in either order)",
                format!("{}\n{}\n", a.display(), b.display())
            ),
            Expectation::StderrPrefix(prefix) => format!("stderr starting with {prefix:?}"),
            Expectation::NonzeroExit => "a non-zero exit code".to_string(),
            Expectation::CleanSuccess => "exit code 0 and empty stderr".to_string(),
        }
    }

    fn actual_description(&self, result: &ToolResult) -> String {
        match self {
            Expectation::ExactStdout(_) | Expectation::UnorderedPathPair(..) => {
                format!("{:?}", result.stdout())
            }
            Expectation::TrimmedStdout(_) | Expectation::LineNumber { .. } => {
                format!("{:?}", result.stdout().trim_end())
            }
            Expectation::StderrPrefix(_) => format!("stderr {:?}", result.stderr()),
            Expectation::NonzeroExit => format!("exit code {}", result.exit_code()),
            Expectation::CleanSuccess => format!(
                "exit code {}, stderr {:?}",
                result.exit_code(),
                result.stderr()
            ),
        }
    }
}

/// Does `result` satisfy `expectation`?
pub fn matches(result: &ToolResult, expectation: &Expectation) -> bool {
    match expectation {
        Expectation::ExactStdout(expected) => result.stdout() == expected,
        Expectation::TrimmedStdout(expected) => result.stdout().trim_end() == expected,
        Expectation::LineNumber {
            line,
            public_section,
        } => {
            let flag = if *public_section { "p" } else { "" };
            result.stdout().trim_end() == format!("{line}{flag}")
        }
        Expectation::UnorderedPathPair(a, b) => {
            let forward = format!("{}\n{}\n", a.display(), b.display());
            let reverse = format!("{}\n{}\n", b.display(), a.display());
            result.stdout() == forward || result.stdout() == reverse
        }
        Expectation::StderrPrefix(prefix) => result.stderr().starts_with(prefix),
        Expectation::NonzeroExit => result.exit_code() != 0,
        Expectation::CleanSuccess => result.exit_code() == 0 && result.stderr().is_empty(),
    }
}

/// An expectation the captured result did not meet.
///
/// Carries both sides of the comparison for diagnosability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFailure {
    pub kind: &'static str,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} expectation not met\n  expected: {}\n    actual: {}",
            self.kind, self.expected, self.actual
        )
    }
}

/// Evaluate `expectation` and report a [`MatchFailure`] on mismatch.
pub fn assert_matches(result: &ToolResult, expectation: &Expectation) -> Result<(), MatchFailure> {
    if matches(result, expectation) {
        Ok(())
    } else {
        Err(MatchFailure {
            kind: expectation.kind(),
            expected: expectation.expected_description(),
            actual: expectation.actual_description(result),
        })
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
