// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-scenario orchestration.
//!
//! A scenario walks the state machine
//! `Idle → SandboxReady → FixturesPlaced → Invoked → Asserted → TornDown`.
//! Exactly one tool invocation happens per scenario; assertions read the one
//! captured result as often as they like. Teardown is reached on every path:
//! `end` performs it explicitly and `Drop` backstops scenarios abandoned by
//! an error or panic, so the sandbox root never outlives the scenario.

use std::path::{Path, PathBuf};

use crate::compile_db::CompilationDatabase;
use crate::config::RunConfig;
use crate::contract::{ContractInput, DatabaseScope, InvocationContext, InvocationSpec, ToolFamily};
use crate::error::HarnessError;
use crate::invoker::{self, ToolResult};
use crate::matcher::{self, Expectation, MatchFailure};
use crate::sandbox::Sandbox;

/// Where a scenario currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    SandboxReady,
    FixturesPlaced,
    Invoked,
    Asserted,
    TornDown,
}

/// Outcome of evaluating one expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(MatchFailure),
}

/// One Given/When/Then unit of behavior against exactly one tool invocation.
#[derive(Debug)]
pub struct ScenarioRunner {
    name: String,
    family: ToolFamily,
    tool_path: PathBuf,
    keep_sandbox: bool,
    state: ScenarioState,
    sandbox: Sandbox,
    /// Database owned by this scenario; sandbox-scoped families only.
    own_database: Option<CompilationDatabase>,
    /// Database directory to hand the tool, whatever its scope.
    database_dir: Option<PathBuf>,
    result: Option<ToolResult>,
}

impl ScenarioRunner {
    /// `Idle → SandboxReady`: provision the sandbox and, for sandbox-scoped
    /// families, a compilation database inside it.
    ///
    /// Run-scoped families receive the run's database; starting such a
    /// scenario without one is a precondition error.
    pub fn begin(
        name: impl Into<String>,
        family: ToolFamily,
        config: &RunConfig,
        run_database: Option<&CompilationDatabase>,
    ) -> Result<Self, HarnessError> {
        let name = name.into();
        let mut sandbox = Sandbox::create(&config.sandbox_parent)?;

        let mut own_database = None;
        let database_dir = match family.database_scope() {
            DatabaseScope::Run => {
                let Some(db) = run_database else {
                    // Make sure the sandbox does not linger when we bail.
                    sandbox.teardown()?;
                    return Err(HarnessError::Precondition(format!(
                        "tool family {} needs the run-scoped compilation database",
                        family.id()
                    )));
                };
                Some(db.directory().to_path_buf())
            }
            DatabaseScope::Sandbox => {
                match CompilationDatabase::create(sandbox.root(), &config.capture) {
                    Ok(db) => {
                        let dir = db.directory().to_path_buf();
                        own_database = Some(db);
                        Some(dir)
                    }
                    Err(e) => {
                        sandbox.teardown()?;
                        return Err(e);
                    }
                }
            }
            DatabaseScope::None => None,
        };

        tracing::debug!(scenario = %name, family = family.id(), "scenario began");
        Ok(Self {
            name,
            family,
            tool_path: config.tool_path.clone(),
            keep_sandbox: config.keep_sandboxes,
            state: ScenarioState::SandboxReady,
            sandbox,
            own_database,
            database_dir,
            result: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ScenarioState {
        self.state
    }

    /// Root of this scenario's sandbox, for resolving declared paths.
    pub fn sandbox_root(&self) -> &Path {
        self.sandbox.root()
    }

    /// `SandboxReady|FixturesPlaced → FixturesPlaced`: materialize a fixture.
    pub fn place_fixture(
        &mut self,
        relative_path: impl AsRef<Path>,
        content: &str,
    ) -> Result<(), HarnessError> {
        match self.state {
            ScenarioState::SandboxReady | ScenarioState::FixturesPlaced => {
                self.sandbox.add_file(relative_path, content)?;
                self.state = ScenarioState::FixturesPlaced;
                Ok(())
            }
            _ => Err(HarnessError::Precondition(
                "fixtures must be placed before the tool is invoked".to_string(),
            )),
        }
    }

    /// `FixturesPlaced → Invoked`: run the tool under test, exactly once.
    pub fn invoke(&mut self, input: &ContractInput) -> Result<(), HarnessError> {
        match self.state {
            ScenarioState::FixturesPlaced => {}
            ScenarioState::SandboxReady => {
                return Err(HarnessError::Precondition(
                    "no fixture file to pass to the tool; place a fixture first".to_string(),
                ));
            }
            _ => {
                return Err(HarnessError::Precondition(
                    "the tool under test is invoked exactly once per scenario".to_string(),
                ));
            }
        }

        let ctx = InvocationContext {
            sandbox_root: self.sandbox.root(),
            database_dir: self.database_dir.as_deref(),
            target: self.sandbox.last_fixture(),
        };
        let spec = InvocationSpec::build(self.family, &self.tool_path, &ctx, input)?;
        self.result = Some(invoker::invoke(&spec)?);
        self.state = ScenarioState::Invoked;
        Ok(())
    }

    /// `Invoked|Asserted → Asserted`: evaluate one expectation against the
    /// captured result. Declared paths inside the expectation must already be
    /// resolved against [`Self::sandbox_root`].
    pub fn assert(&mut self, expectation: &Expectation) -> Result<Verdict, HarnessError> {
        let result = match self.state {
            ScenarioState::Invoked | ScenarioState::Asserted => {
                self.result.as_ref().ok_or_else(|| {
                    HarnessError::Precondition("invoked scenario lost its result".to_string())
                })?
            }
            _ => {
                return Err(HarnessError::Precondition(
                    "the tool under test has not been invoked; missing an invoke step?"
                        .to_string(),
                ));
            }
        };

        self.state = ScenarioState::Asserted;
        match matcher::assert_matches(result, expectation) {
            Ok(()) => Ok(Verdict::Pass),
            Err(failure) => Ok(Verdict::Fail(failure)),
        }
    }

    /// The captured result, once the scenario has been invoked.
    pub fn result(&self) -> Option<&ToolResult> {
        self.result.as_ref()
    }

    /// `* → TornDown`: remove the sandbox and any scenario-owned database.
    pub fn end(mut self) -> Result<(), HarnessError> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<(), HarnessError> {
        if self.state == ScenarioState::TornDown {
            return Ok(());
        }
        self.state = ScenarioState::TornDown;

        if self.keep_sandbox {
            tracing::info!(
                scenario = %self.name,
                root = %self.sandbox.root().display(),
                "keeping sandbox for inspection"
            );
            self.sandbox.persist();
            return Ok(());
        }

        if let Some(db) = self.own_database.take() {
            db.remove()?;
        }
        self.sandbox.teardown()
    }
}

impl Drop for ScenarioRunner {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            tracing::warn!(scenario = %self.name, error = %e, "scenario teardown failed");
        }
    }
}

#[cfg(all(test, unix))]
#[path = "scenario_tests.rs"]
mod tests;
