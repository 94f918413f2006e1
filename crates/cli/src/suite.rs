// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative suite files.
//!
//! A suite is a TOML document binding scenarios to one tool family:
//!
//! ```toml
//! [suite]
//! name = "paired file finder conformance"
//! family = "paired-file-finder"
//!
//! [[suite.scenario]]
//! name = "reports a missing pair"
//! files = [{ path = "dir/file1.hpp" }]
//! invoke = { query = "dir/file1.cpp" }
//! expect = [
//!     "nonzero_exit",
//!     { stderr_prefix = "ERROR: No paired C++ file found" },
//! ]
//! ```
//!
//! This is a structured, typed binding to the engine operations; free-text
//! scenario matching lives outside this crate. Paths declared in
//! expectations are sandbox-relative and resolved against the live sandbox
//! root at assertion time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::contract::{ContractInput, ToolFamily};
use crate::error::HarnessError;
use crate::matcher::Expectation;

#[derive(Debug, Deserialize)]
struct SuiteFile {
    suite: Suite,
}

/// A named list of scenarios for one tool family.
#[derive(Debug, Deserialize)]
pub struct Suite {
    pub name: String,
    pub family: ToolFamily,
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<ScenarioSpec>,
}

/// One declarative scenario.
#[derive(Debug, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    #[serde(default)]
    pub files: Vec<FileSpec>,
    #[serde(default)]
    pub invoke: InvokeSpec,
    #[serde(default)]
    pub expect: Vec<ExpectSpec>,
}

/// A fixture file to materialize, path relative to the sandbox root.
#[derive(Debug, Deserialize)]
pub struct FileSpec {
    pub path: String,
    #[serde(default)]
    pub content: String,
}

/// The family-specific invocation input. At most one field may be set.
#[derive(Debug, Default, Deserialize)]
pub struct InvokeSpec {
    pub line: Option<u32>,
    pub class_name: Option<String>,
    pub query: Option<String>,
}

impl InvokeSpec {
    /// Convert to the typed contract input.
    pub fn to_input(&self) -> Result<ContractInput, HarnessError> {
        let set = [
            self.line.is_some(),
            self.class_name.is_some(),
            self.query.is_some(),
        ]
        .iter()
        .filter(|s| **s)
        .count();
        if set > 1 {
            return Err(HarnessError::Config(
                "invoke takes at most one of line, class_name, query".to_string(),
            ));
        }

        Ok(if let Some(line) = self.line {
            ContractInput::Line(line)
        } else if let Some(class_name) = &self.class_name {
            ContractInput::ClassName(class_name.clone())
        } else if let Some(query) = &self.query {
            ContractInput::Query(query.clone())
        } else {
            ContractInput::None
        })
    }
}

/// A declared expectation, before sandbox paths are known.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectSpec {
    /// stdout equals the text byte for byte.
    ExactStdout(String),
    /// stdout equals the text after right-stripping stdout.
    TrimmedStdout(String),
    /// Right-stripped stdout is this line number, optionally flagged.
    LineNumber(LineNumberSpec),
    /// Right-stripped stdout is this sandbox-relative path, made absolute.
    Path(String),
    /// stdout is these two sandbox-relative paths, absolute, either order.
    PathPair(PathPairSpec),
    /// stderr starts with the literal prefix.
    StderrPrefix(String),
    /// The tool signaled an error through its exit code.
    NonzeroExit,
    /// Exit code 0 and empty stderr.
    CleanSuccess,
}

#[derive(Debug, Deserialize)]
pub struct LineNumberSpec {
    pub line: u32,
    #[serde(default)]
    pub public_section: bool,
}

#[derive(Debug, Deserialize)]
pub struct PathPairSpec {
    pub first: String,
    pub second: String,
}

impl ExpectSpec {
    /// Resolve declared sandbox-relative paths against the live sandbox root.
    pub fn resolve(&self, sandbox_root: &Path) -> Result<Expectation, HarnessError> {
        Ok(match self {
            ExpectSpec::ExactStdout(s) => Expectation::ExactStdout(s.clone()),
            ExpectSpec::TrimmedStdout(s) => Expectation::TrimmedStdout(s.clone()),
            ExpectSpec::LineNumber(spec) => Expectation::LineNumber {
                line: spec.line,
                public_section: spec.public_section,
            },
            ExpectSpec::Path(path) => Expectation::TrimmedStdout(
                resolve_relative(sandbox_root, path)?.display().to_string(),
            ),
            ExpectSpec::PathPair(pair) => Expectation::UnorderedPathPair(
                resolve_relative(sandbox_root, &pair.first)?,
                resolve_relative(sandbox_root, &pair.second)?,
            ),
            ExpectSpec::StderrPrefix(prefix) => Expectation::StderrPrefix(prefix.clone()),
            ExpectSpec::NonzeroExit => Expectation::NonzeroExit,
            ExpectSpec::CleanSuccess => Expectation::CleanSuccess,
        })
    }
}

fn resolve_relative(sandbox_root: &Path, declared: &str) -> Result<PathBuf, HarnessError> {
    let declared_path = Path::new(declared);
    if declared_path.is_absolute() {
        return Err(HarnessError::Config(format!(
            "expected paths must be sandbox-relative, got {declared}"
        )));
    }
    Ok(sandbox_root.join(declared_path))
}

/// Load and validate a suite file.
pub fn load(path: &Path) -> Result<Suite, HarnessError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        HarnessError::Config(format!("cannot read suite file {}: {e}", path.display()))
    })?;
    let file: SuiteFile = toml::from_str(&raw).map_err(|e| {
        HarnessError::Config(format!("suite file {} is invalid: {e}", path.display()))
    })?;

    let suite = file.suite;
    for scenario in &suite.scenarios {
        if scenario.expect.is_empty() {
            return Err(HarnessError::Config(format!(
                "scenario {:?} in {} declares no expectations",
                scenario.name,
                path.display()
            )));
        }
    }
    Ok(suite)
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
