// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness error taxonomy and process exit codes.
//!
//! Failures of the tool under test are not errors; they flow through
//! [`crate::invoker::ToolResult`] as ordinary data. The variants here cover
//! the harness itself: unusable run configuration, filesystem or capture-tool
//! trouble, and scenarios driven out of order.

use std::io;

use thiserror::Error;

/// Errors raised by the harness, as opposed to failures of the tool under test.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Run-level configuration is unusable. Fatal before any scenario runs.
    #[error("configuration error: {0}")]
    Config(String),

    /// The filesystem or an external setup command failed.
    #[error("resource error: {message}")]
    Resource {
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Scenario operations were driven out of order. Programmer error in
    /// scenario wiring, never silently ignored.
    #[error("precondition error: {0}")]
    Precondition(String),

    /// An output stream of the tool under test could not be decoded as UTF-8.
    #[error("{stream} of the tool under test is not valid UTF-8")]
    InvalidOutput {
        stream: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl HarnessError {
    /// A resource error with no underlying I/O cause.
    pub fn resource(message: impl Into<String>) -> Self {
        Self::Resource {
            message: message.into(),
            source: None,
        }
    }

    /// A resource error wrapping the I/O error that caused it.
    pub fn resource_io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Resource {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Process exit codes for the `cppconform` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every scenario passed.
    Success,
    /// At least one scenario failed an assertion or errored.
    AssertionFailures,
    /// The run configuration was unusable.
    ConfigError,
    /// A sandbox, fixture, or capture step failed.
    ResourceError,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::AssertionFailures => 1,
            ExitCode::ConfigError => 2,
            ExitCode::ResourceError => 3,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
