// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `cppconform` binary entry point.

mod cmd_families;
mod cmd_run;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cppconform::cli::{Cli, Command};
use cppconform::error::{ExitCode, HarnessError};

fn main() {
    let cli = Cli::parse();
    init_tracing(match &cli.command {
        Command::Run(args) => args.verbose,
        Command::Families => false,
    });

    let result = match &cli.command {
        Command::Run(args) => cmd_run::run(args),
        Command::Families => cmd_families::run(),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            match err.downcast_ref::<HarnessError>() {
                Some(HarnessError::Config(_)) => ExitCode::ConfigError,
                _ => ExitCode::ResourceError,
            }
        }
    };
    std::process::exit(exit_code.code());
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("CPPCONFORM_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
