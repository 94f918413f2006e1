// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use termcolor::ColorChoice;

/// Black-box conformance harness for C++ source-analysis CLI tools
#[derive(Parser)]
#[command(name = "cppconform")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run conformance suites against a tool binary
    Run(RunArgs),
    /// List tool families and their frozen argument vectors
    Families,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Suite files to execute
    #[arg(value_name = "SUITE", required = true)]
    pub suites: Vec<PathBuf>,

    /// Path to the tool under test
    #[arg(long, value_name = "PATH", env = "CPPCONFORM_TOOL_PATH")]
    pub tool_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Parent directory for scenario sandboxes (default: OS temp dir)
    #[arg(long, value_name = "DIR")]
    pub sandbox_root: Option<PathBuf>,

    /// Build-capture tool used to produce compilation databases
    #[arg(long, default_value = "bear", value_name = "TOOL")]
    pub capture_tool: String,

    /// Compiler handed to the capture tool
    #[arg(long, default_value = "g++", value_name = "COMPILER")]
    pub compiler: String,

    /// Keep sandbox directories on disk (for debugging)
    #[arg(long)]
    pub keep_sandboxes: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Translate to a termcolor choice, honoring whether stdout is a tty.
    pub fn to_color_choice(self) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => {
                if std::io::stdout().is_terminal() {
                    ColorChoice::Auto
                } else {
                    ColorChoice::Never
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
