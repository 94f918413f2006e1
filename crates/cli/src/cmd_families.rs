// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `cppconform families` command implementation.
//!
//! Prints the frozen per-family argument vectors. The listing is the
//! contract table scenario authors bind suites against.

use cppconform::contract::{DatabaseScope, ToolFamily};
use cppconform::error::ExitCode;

/// Run the `cppconform families` command.
pub fn run() -> anyhow::Result<ExitCode> {
    for family in ToolFamily::ALL {
        let scope = match family.database_scope() {
            DatabaseScope::Run => "run-scoped database",
            DatabaseScope::Sandbox => "sandbox-scoped database",
            DatabaseScope::None => "no database",
        };
        println!(
            "{:<24} {:<44} {}",
            family.id(),
            family.argument_template(),
            scope
        );
    }
    Ok(ExitCode::Success)
}
