// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compilation database fixture.
//!
//! The tools under test need a `compile_commands.json` describing how their
//! input files should be parsed. The fixture produces one by running a
//! build-capture utility over a minimal, guaranteed-compilable dummy program:
//!
//! ```text
//! <capture-tool> --output <db-path> -- <compiler> <dummy-source> -o <artifact>
//! ```
//!
//! The compiled artifact is a byproduct of capture, not part of the fixture;
//! it is deleted in the same step. A capture that exits non-zero, produces no
//! database file, or produces one that does not decode as a JSON array is a
//! fatal setup error: no scenario proceeds without a usable database.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::HarnessError;

/// File name the tools under test expect inside the database directory.
pub const DATABASE_FILE_NAME: &str = "compile_commands.json";

const DUMMY_SOURCE_NAME: &str = "cppconform_dummy_main.cpp";
const DUMMY_ARTIFACT_NAME: &str = "cppconform_dummy";
const DUMMY_SOURCE: &str = "int main()\n{\n    return 0;\n}\n";

/// External commands used to produce the database.
#[derive(Debug, Clone)]
pub struct CaptureCommand {
    /// Build-capture executable, `bear` by default.
    pub capture_tool: String,
    /// Compiler handed to the capture tool, `g++` by default.
    pub compiler: String,
}

impl Default for CaptureCommand {
    fn default() -> Self {
        Self {
            capture_tool: "bear".to_string(),
            compiler: "g++".to_string(),
        }
    }
}

/// A compilation database materialized in a directory.
///
/// At most one valid database exists per directory at a time.
#[derive(Debug)]
pub struct CompilationDatabase {
    directory: PathBuf,
}

impl CompilationDatabase {
    /// Run the capture step and validate its product.
    pub fn create(directory: &Path, capture: &CaptureCommand) -> Result<Self, HarnessError> {
        let db_path = directory.join(DATABASE_FILE_NAME);
        let dummy_source = directory.join(DUMMY_SOURCE_NAME);
        let artifact = directory.join(DUMMY_ARTIFACT_NAME);

        fs::write(&dummy_source, DUMMY_SOURCE).map_err(|e| {
            HarnessError::resource_io(
                format!("cannot write dummy program {}", dummy_source.display()),
                e,
            )
        })?;

        tracing::debug!(
            capture_tool = %capture.capture_tool,
            db = %db_path.display(),
            "capturing compilation database"
        );
        let output = Command::new(&capture.capture_tool)
            .arg("--output")
            .arg(&db_path)
            .arg("--")
            .arg(&capture.compiler)
            .arg(&dummy_source)
            .arg("-o")
            .arg(&artifact)
            .output()
            .map_err(|e| {
                HarnessError::resource_io(
                    format!("cannot run capture tool `{}`", capture.capture_tool),
                    e,
                )
            })?;

        // The compiled dummy is a byproduct of capture; clean it up in the
        // same step even when capture failed.
        if artifact.exists() {
            let _ = fs::remove_file(&artifact);
        }

        if !output.status.success() {
            return Err(HarnessError::resource(format!(
                "capture tool `{}` exited with {}: {}",
                capture.capture_tool,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            )));
        }
        if !db_path.exists() {
            return Err(HarnessError::resource(format!(
                "capture tool `{}` produced no database at {}",
                capture.capture_tool,
                db_path.display()
            )));
        }

        let raw = fs::read_to_string(&db_path).map_err(|e| {
            HarnessError::resource_io(format!("cannot read database {}", db_path.display()), e)
        })?;
        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            HarnessError::resource(format!(
                "database {} is not valid JSON: {}",
                db_path.display(),
                e
            ))
        })?;
        if !value.is_array() {
            return Err(HarnessError::resource(format!(
                "database {} is not a JSON array of compile commands",
                db_path.display()
            )));
        }

        Ok(Self {
            directory: directory.to_path_buf(),
        })
    }

    /// Directory the database lives in; the path the tools under test take.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of the database file.
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(DATABASE_FILE_NAME)
    }

    /// Delete the database file and the dummy source.
    ///
    /// Safe to call when either is already absent.
    pub fn remove(&self) -> Result<(), HarnessError> {
        for path in [self.file_path(), self.directory.join(DUMMY_SOURCE_NAME)] {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    HarnessError::resource_io(format!("cannot remove {}", path.display()), e)
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
#[path = "compile_db_tests.rs"]
mod tests;
