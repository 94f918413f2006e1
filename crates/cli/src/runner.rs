// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite runner with per-scenario error recovery.
//!
//! Scenarios execute strictly sequentially; the engine imposes no internal
//! threading. Errors are isolated per scenario: an assertion failure or a
//! scenario-level resource error is recorded and the run continues, so one
//! run reports every failing scenario instead of stopping at the first.
//! Run-level setup errors (an unusable run-scoped compilation database)
//! abort the run outright.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::compile_db::CompilationDatabase;
use crate::config::RunConfig;
use crate::contract::{DatabaseScope, ToolFamily};
use crate::error::HarnessError;
use crate::sandbox::Sandbox;
use crate::scenario::{ScenarioRunner, Verdict};
use crate::suite::{ScenarioSpec, Suite};

/// How one scenario ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    /// Every expectation held.
    Passed,
    /// At least one expectation did not hold.
    Failed,
    /// The harness could not drive the scenario to an assertion.
    Error,
}

/// Record of one executed scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub status: ScenarioStatus,
    /// One entry per unmet expectation, each carrying expected and actual.
    pub failures: Vec<String>,
    /// Harness error that aborted the scenario, when status is `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated result of running one suite.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub suite: String,
    pub family: ToolFamily,
    pub started: DateTime<Local>,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.count(ScenarioStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(ScenarioStatus::Failed)
    }

    pub fn errored(&self) -> usize {
        self.count(ScenarioStatus::Error)
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.outcomes.len()
    }

    fn count(&self, status: ScenarioStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// Runs every scenario of a suite against one tool binary.
pub struct SuiteRunner {
    config: RunConfig,
}

impl SuiteRunner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Execute the suite and collect per-scenario outcomes.
    ///
    /// For run-scoped families the compilation database is captured once,
    /// before any scenario, and removed after the last one; a capture
    /// failure is fatal for the whole run.
    pub fn run(&self, suite: &Suite) -> Result<RunReport, HarnessError> {
        let started = Local::now();
        tracing::info!(suite = %suite.name, family = suite.family.id(), "run started");

        let run_database = self.provision_run_database(suite.family)?;
        let db_ref = run_database.as_ref().map(|(_, db)| db);

        let outcomes = suite
            .scenarios
            .iter()
            .map(|scenario| self.run_scenario(suite.family, scenario, db_ref))
            .collect();

        if let Some((mut holder, db)) = run_database {
            db.remove()?;
            holder.teardown()?;
        }

        let report = RunReport {
            suite: suite.name.clone(),
            family: suite.family,
            started,
            outcomes,
        };
        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            errored = report.errored(),
            "run finished"
        );
        Ok(report)
    }

    fn provision_run_database(
        &self,
        family: ToolFamily,
    ) -> Result<Option<(Sandbox, CompilationDatabase)>, HarnessError> {
        if family.database_scope() != DatabaseScope::Run {
            return Ok(None);
        }
        let holder = Sandbox::create(&self.config.sandbox_parent)?;
        let db = CompilationDatabase::create(holder.root(), &self.config.capture)?;
        Ok(Some((holder, db)))
    }

    fn run_scenario(
        &self,
        family: ToolFamily,
        spec: &ScenarioSpec,
        run_database: Option<&CompilationDatabase>,
    ) -> ScenarioOutcome {
        match self.drive_scenario(family, spec, run_database) {
            Ok(failures) => {
                let status = if failures.is_empty() {
                    ScenarioStatus::Passed
                } else {
                    ScenarioStatus::Failed
                };
                ScenarioOutcome {
                    name: spec.name.clone(),
                    status,
                    failures,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(scenario = %spec.name, error = %e, "scenario errored");
                ScenarioOutcome {
                    name: spec.name.clone(),
                    status: ScenarioStatus::Error,
                    failures: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Drive one scenario through its whole lifecycle.
    ///
    /// Returns the unmet expectations; harness errors propagate. Teardown is
    /// guaranteed by `ScenarioRunner` on both paths.
    fn drive_scenario(
        &self,
        family: ToolFamily,
        spec: &ScenarioSpec,
        run_database: Option<&CompilationDatabase>,
    ) -> Result<Vec<String>, HarnessError> {
        let mut scenario =
            ScenarioRunner::begin(spec.name.clone(), family, &self.config, run_database)?;

        for file in &spec.files {
            scenario.place_fixture(&file.path, &file.content)?;
        }

        scenario.invoke(&spec.invoke.to_input()?)?;

        let mut failures = Vec::new();
        for declared in &spec.expect {
            let expectation = declared.resolve(scenario.sandbox_root())?;
            if let Verdict::Fail(failure) = scenario.assert(&expectation)? {
                failures.push(failure.to_string());
            }
        }

        scenario.end()?;
        Ok(failures)
    }
}

#[cfg(all(test, unix))]
#[path = "runner_tests.rs"]
mod tests;
