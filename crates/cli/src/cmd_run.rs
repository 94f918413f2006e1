// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `cppconform run` command implementation.
//!
//! Executes each suite file in order against the configured tool binary.
//! Assertion failures are reported and counted without stopping the run;
//! configuration and resource errors abort it.

use termcolor::{ColorChoice, NoColor, StandardStream};

use cppconform::cli::{OutputFormat, RunArgs};
use cppconform::compile_db::CaptureCommand;
use cppconform::config::RunConfig;
use cppconform::error::{ExitCode, HarnessError};
use cppconform::report;
use cppconform::runner::{RunReport, SuiteRunner};
use cppconform::suite;

/// Run the `cppconform run` command.
pub fn run(args: &RunArgs) -> anyhow::Result<ExitCode> {
    let config = build_config(args)?;
    let runner = SuiteRunner::new(config);

    let mut all_passed = true;
    for suite_path in &args.suites {
        let suite = suite::load(suite_path)?;
        let report = runner.run(&suite)?;

        match args.output {
            OutputFormat::Json => println!("{}", report::to_json(&report)?),
            OutputFormat::Text => print_text(&report, args.color.to_color_choice())?,
        }

        if !report.all_passed() {
            all_passed = false;
        }
    }

    Ok(if all_passed {
        ExitCode::Success
    } else {
        ExitCode::AssertionFailures
    })
}

fn build_config(args: &RunArgs) -> Result<RunConfig, HarnessError> {
    let tool_path = args.tool_path.clone().ok_or_else(|| {
        HarnessError::Config(
            "no path to the tool under test specified; \
             pass it with --tool-path <path/to/the/tool> or CPPCONFORM_TOOL_PATH"
                .to_string(),
        )
    })?;

    let mut config = RunConfig::new(tool_path);
    if let Some(sandbox_root) = &args.sandbox_root {
        config.sandbox_parent = sandbox_root.clone();
    }
    config.capture = CaptureCommand {
        capture_tool: args.capture_tool.clone(),
        compiler: args.compiler.clone(),
    };
    config.keep_sandboxes = args.keep_sandboxes;
    Ok(config)
}

fn print_text(report: &RunReport, choice: ColorChoice) -> anyhow::Result<()> {
    if choice == ColorChoice::Never {
        // Avoid emitting escape sequences into pipes and files.
        let mut out = NoColor::new(std::io::stdout().lock());
        report::write_text(&mut out, report)?;
    } else {
        let mut out = StandardStream::stdout(choice);
        report::write_text(&mut out, report)?;
    }
    Ok(())
}
