// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-scenario filesystem sandboxes and the fixture files placed in them.
//!
//! A sandbox is a freshly created directory whose name is derived from the
//! process id plus a process-wide counter, so no two concurrently active
//! sandboxes ever share a root. Teardown removes the root recursively and is
//! idempotent; `Drop` performs it as a backstop so a scenario that panics or
//! bails out early still leaves no directory behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::HarnessError;

static SANDBOX_COUNTER: AtomicU64 = AtomicU64::new(0);

/// One source file materialized on disk for a scenario.
#[derive(Debug, Clone)]
pub struct FixtureFile {
    path: PathBuf,
    content: String,
}

impl FixtureFile {
    fn create(path: PathBuf, content: &str) -> Result<Self, HarnessError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                HarnessError::resource_io(
                    format!("cannot create fixture directory {}", parent.display()),
                    e,
                )
            })?;
        }
        // Content is written verbatim; no newline normalization.
        fs::write(&path, content).map_err(|e| {
            HarnessError::resource_io(format!("cannot write fixture {}", path.display()), e)
        })?;
        Ok(Self {
            path,
            content: content.to_string(),
        })
    }

    /// Absolute path of the fixture on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The exact text written to disk.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Remove the fixture file. A no-op when the file is already gone.
    pub fn remove(&self) -> Result<(), HarnessError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                HarnessError::resource_io(format!("cannot remove fixture {}", self.path.display()), e)
            })?;
        }
        Ok(())
    }
}

/// An isolated, disposable working directory scoped to one scenario.
#[derive(Debug)]
pub struct Sandbox {
    root: PathBuf,
    owned_files: Vec<FixtureFile>,
    torn_down: bool,
}

impl Sandbox {
    /// Allocate a new, empty sandbox directory under `parent`.
    ///
    /// The directory name embeds the process id and a monotonically
    /// increasing counter, which keeps concurrently active sandboxes
    /// collision-free without coordination.
    pub fn create(parent: &Path) -> Result<Self, HarnessError> {
        let seq = SANDBOX_COUNTER.fetch_add(1, Ordering::SeqCst);
        let root = parent.join(format!("cppconform-{}-{}", std::process::id(), seq));

        fs::create_dir_all(parent).map_err(|e| {
            HarnessError::resource_io(
                format!("cannot create sandbox parent {}", parent.display()),
                e,
            )
        })?;
        // create_dir, not create_dir_all: a leftover directory with this name
        // must fail loudly instead of being silently reused.
        fs::create_dir(&root).map_err(|e| {
            HarnessError::resource_io(format!("cannot create sandbox {}", root.display()), e)
        })?;

        tracing::debug!(root = %root.display(), "sandbox created");
        Ok(Self {
            root,
            owned_files: Vec::new(),
            torn_down: false,
        })
    }

    /// Root directory of the sandbox.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Materialize a fixture file at `relative_path` under the sandbox root.
    ///
    /// Parent directories are created as needed and `content` is written
    /// verbatim. An absolute `relative_path` is a contract violation and is
    /// rejected before anything touches the disk, as is a path already placed
    /// in this sandbox.
    pub fn add_file(
        &mut self,
        relative_path: impl AsRef<Path>,
        content: &str,
    ) -> Result<&FixtureFile, HarnessError> {
        let relative_path = relative_path.as_ref();
        if relative_path.is_absolute() {
            return Err(HarnessError::resource(format!(
                "fixture path must be relative, got {}",
                relative_path.display()
            )));
        }

        let path = self.root.join(relative_path);
        if self.owned_files.iter().any(|f| f.path() == path) {
            return Err(HarnessError::resource(format!(
                "fixture {} already placed in this sandbox",
                path.display()
            )));
        }

        let file = FixtureFile::create(path, content)?;
        self.owned_files.push(file);
        let placed = self.owned_files.len() - 1;
        Ok(&self.owned_files[placed])
    }

    /// Fixture files in creation order.
    pub fn fixtures(&self) -> &[FixtureFile] {
        &self.owned_files
    }

    /// The most recently placed fixture, the default target of an invocation.
    pub fn last_fixture(&self) -> Option<&FixtureFile> {
        self.owned_files.last()
    }

    /// Recursively remove the sandbox root and everything in it.
    ///
    /// Idempotent: tearing down a sandbox whose directory no longer exists is
    /// a no-op, not an error.
    pub fn teardown(&mut self) -> Result<(), HarnessError> {
        if self.torn_down {
            return Ok(());
        }
        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(|e| {
                HarnessError::resource_io(
                    format!("cannot remove sandbox {}", self.root.display()),
                    e,
                )
            })?;
        }
        self.owned_files.clear();
        self.torn_down = true;
        tracing::debug!(root = %self.root.display(), "sandbox removed");
        Ok(())
    }

    /// Leave the sandbox on disk when it is dropped.
    ///
    /// Used by the `--keep-sandboxes` debugging flag.
    pub fn persist(&mut self) {
        self.torn_down = true;
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            tracing::warn!(error = %e, "sandbox teardown failed during drop");
        }
    }
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod tests;
