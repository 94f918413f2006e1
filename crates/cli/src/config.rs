// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run-level configuration.
//!
//! One run exercises one tool binary; its path is the single required
//! external parameter. Everything else has defaults good enough for a
//! developer machine with the real capture toolchain installed.

use std::path::PathBuf;

use crate::compile_db::CaptureCommand;

/// Configuration shared by every scenario of a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path to the tool under test.
    pub tool_path: PathBuf,
    /// Parent directory for scenario sandboxes; the OS temp dir by default.
    pub sandbox_parent: PathBuf,
    /// Commands used to capture compilation databases.
    pub capture: CaptureCommand,
    /// Leave sandbox directories on disk for debugging.
    pub keep_sandboxes: bool,
}

impl RunConfig {
    pub fn new(tool_path: PathBuf) -> Self {
        Self {
            tool_path,
            sandbox_parent: std::env::temp_dir(),
            capture: CaptureCommand::default(),
            keep_sandboxes: false,
        }
    }
}
