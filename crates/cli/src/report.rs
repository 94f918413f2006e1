// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run report output in text and JSON formats.

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::runner::{RunReport, ScenarioStatus};

/// Write a human-readable report, coloring pass/fail markers.
pub fn write_text<W: WriteColor>(w: &mut W, report: &RunReport) -> io::Result<()> {
    writeln!(
        w,
        "{} [{}] — {}",
        report.suite,
        report.family.id(),
        report.started.format("%Y-%m-%d %H:%M:%S")
    )?;

    for outcome in &report.outcomes {
        match outcome.status {
            ScenarioStatus::Passed => {
                write_marker(w, "PASS", Color::Green)?;
                writeln!(w, " {}", outcome.name)?;
            }
            ScenarioStatus::Failed => {
                write_marker(w, "FAIL", Color::Red)?;
                writeln!(w, " {}", outcome.name)?;
                for failure in &outcome.failures {
                    for line in failure.lines() {
                        writeln!(w, "       {line}")?;
                    }
                }
            }
            ScenarioStatus::Error => {
                write_marker(w, "ERROR", Color::Yellow)?;
                writeln!(w, " {}", outcome.name)?;
                if let Some(error) = &outcome.error {
                    writeln!(w, "       {error}")?;
                }
            }
        }
    }

    writeln!(
        w,
        "\n{} passed, {} failed, {} errored",
        report.passed(),
        report.failed(),
        report.errored()
    )
}

fn write_marker<W: WriteColor>(w: &mut W, marker: &str, color: Color) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(w, "{marker:>5}")?;
    w.reset()
}

/// Render the report as pretty-printed JSON.
pub fn to_json(report: &RunReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
