// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-tool-family invocation contracts.
//!
//! Each tool family reads its arguments positionally in a frozen order.
//! Reordering an argument vector silently breaks the paired tool's own
//! parser, so the vectors built here must match the table below literally:
//!
//! | family                   | argument vector                                |
//! |--------------------------|------------------------------------------------|
//! | `definition-scan`        | `tool -p <db_dir> <header>`                    |
//! | `definition-inline`      | `tool <db_dir> <header> <header_content> <line>` |
//! | `pure-virtual-extractor` | `tool <db_dir> <header> <class_name>`          |
//! | `class-name-expander`    | `tool <db_dir> <header> <class_name>`          |
//! | `insertion-point-finder` | `tool <db_dir> <header> <class_name>`          |
//! | `abstract-class-finder`  | `tool <search_root> <start_root> <class_name>` |
//! | `paired-file-finder`     | `tool <project_root> <relative_path>`          |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::sandbox::FixtureFile;

/// Which compilation database a tool family expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseScope {
    /// One database shared by every scenario of the run.
    Run,
    /// A database created inside each scenario's sandbox.
    Sandbox,
    /// The family does not consume a database.
    None,
}

/// The tool families whose CLI contracts this harness verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolFamily {
    /// Method-definition generator, declaration located by the tool's own scan.
    DefinitionScan,
    /// Method-definition generator taking the header content and line inline.
    DefinitionInline,
    /// Pure-virtual-function extractor.
    PureVirtualExtractor,
    /// Full-class-name expander.
    ClassNameExpander,
    /// Suitable-insertion-point finder.
    InsertionPointFinder,
    /// Abstract-class finder.
    AbstractClassFinder,
    /// Paired-implementation-file finder.
    PairedFileFinder,
}

impl ToolFamily {
    pub const ALL: [ToolFamily; 7] = [
        ToolFamily::DefinitionScan,
        ToolFamily::DefinitionInline,
        ToolFamily::PureVirtualExtractor,
        ToolFamily::ClassNameExpander,
        ToolFamily::InsertionPointFinder,
        ToolFamily::AbstractClassFinder,
        ToolFamily::PairedFileFinder,
    ];

    /// Stable identifier used in suite files and listings.
    pub fn id(self) -> &'static str {
        match self {
            ToolFamily::DefinitionScan => "definition-scan",
            ToolFamily::DefinitionInline => "definition-inline",
            ToolFamily::PureVirtualExtractor => "pure-virtual-extractor",
            ToolFamily::ClassNameExpander => "class-name-expander",
            ToolFamily::InsertionPointFinder => "insertion-point-finder",
            ToolFamily::AbstractClassFinder => "abstract-class-finder",
            ToolFamily::PairedFileFinder => "paired-file-finder",
        }
    }

    pub fn database_scope(self) -> DatabaseScope {
        match self {
            ToolFamily::DefinitionScan | ToolFamily::DefinitionInline => DatabaseScope::Run,
            ToolFamily::PureVirtualExtractor
            | ToolFamily::ClassNameExpander
            | ToolFamily::InsertionPointFinder => DatabaseScope::Sandbox,
            ToolFamily::AbstractClassFinder | ToolFamily::PairedFileFinder => DatabaseScope::None,
        }
    }

    /// Human-readable argument template for listings.
    pub fn argument_template(self) -> &'static str {
        match self {
            ToolFamily::DefinitionScan => "-p <db_dir> <header>",
            ToolFamily::DefinitionInline => "<db_dir> <header> <header_content> <line>",
            ToolFamily::PureVirtualExtractor
            | ToolFamily::ClassNameExpander
            | ToolFamily::InsertionPointFinder => "<db_dir> <header> <class_name>",
            ToolFamily::AbstractClassFinder => "<search_root> <start_root> <class_name>",
            ToolFamily::PairedFileFinder => "<project_root> <relative_path>",
        }
    }
}

/// Typed per-invocation input, validated against the family before any
/// subprocess is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractInput {
    /// No extra argument; the tool locates its target itself.
    None,
    /// A one-based line number in the target header.
    Line(u32),
    /// A class name to look up.
    ClassName(String),
    /// A project-relative path to query.
    Query(String),
}

impl ContractInput {
    fn kind(&self) -> &'static str {
        match self {
            ContractInput::None => "no argument",
            ContractInput::Line(_) => "a line number",
            ContractInput::ClassName(_) => "a class name",
            ContractInput::Query(_) => "a query path",
        }
    }
}

/// Everything from the live scenario an argument vector can refer to.
#[derive(Debug, Clone, Copy)]
pub struct InvocationContext<'a> {
    /// Sandbox root, doubling as the project root for the finder families.
    pub sandbox_root: &'a Path,
    /// Directory holding `compile_commands.json`, when the family needs one.
    pub database_dir: Option<&'a Path>,
    /// The fixture the invocation targets, normally the last one placed.
    pub target: Option<&'a FixtureFile>,
}

/// The exact child-process invocation: tool path plus positional arguments.
///
/// Constructed fresh per invocation and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    tool_path: PathBuf,
    arguments: Vec<OsString>,
}

impl InvocationSpec {
    /// Build the argument vector for `family`, in its frozen order.
    pub fn build(
        family: ToolFamily,
        tool_path: &Path,
        ctx: &InvocationContext<'_>,
        input: &ContractInput,
    ) -> Result<Self, HarnessError> {
        let arguments = match family {
            ToolFamily::DefinitionScan => {
                if !matches!(input, ContractInput::None) {
                    return Err(wrong_input(family, input));
                }
                let db = required_database(family, ctx)?;
                let target = required_target(family, ctx)?;
                vec![
                    OsString::from("-p"),
                    db.as_os_str().to_os_string(),
                    target.path().as_os_str().to_os_string(),
                ]
            }
            ToolFamily::DefinitionInline => {
                let ContractInput::Line(line) = input else {
                    return Err(wrong_input(family, input));
                };
                let db = required_database(family, ctx)?;
                let target = required_target(family, ctx)?;
                vec![
                    db.as_os_str().to_os_string(),
                    target.path().as_os_str().to_os_string(),
                    OsString::from(target.content()),
                    OsString::from(line.to_string()),
                ]
            }
            ToolFamily::PureVirtualExtractor
            | ToolFamily::ClassNameExpander
            | ToolFamily::InsertionPointFinder => {
                let ContractInput::ClassName(class_name) = input else {
                    return Err(wrong_input(family, input));
                };
                let db = required_database(family, ctx)?;
                let target = required_target(family, ctx)?;
                vec![
                    db.as_os_str().to_os_string(),
                    target.path().as_os_str().to_os_string(),
                    OsString::from(class_name),
                ]
            }
            ToolFamily::AbstractClassFinder => {
                let ContractInput::ClassName(class_name) = input else {
                    return Err(wrong_input(family, input));
                };
                // Search root and start root are distinguished by the tool;
                // the harness passes the sandbox root for both.
                vec![
                    ctx.sandbox_root.as_os_str().to_os_string(),
                    ctx.sandbox_root.as_os_str().to_os_string(),
                    OsString::from(class_name),
                ]
            }
            ToolFamily::PairedFileFinder => {
                let ContractInput::Query(query) = input else {
                    return Err(wrong_input(family, input));
                };
                if Path::new(query).is_absolute() {
                    return Err(HarnessError::Precondition(format!(
                        "paired-file-finder query must be relative, got {query}"
                    )));
                }
                vec![
                    ctx.sandbox_root.as_os_str().to_os_string(),
                    OsString::from(query),
                ]
            }
        };

        Ok(Self {
            tool_path: tool_path.to_path_buf(),
            arguments,
        })
    }

    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.arguments
    }
}

fn required_database<'a>(
    family: ToolFamily,
    ctx: &InvocationContext<'a>,
) -> Result<&'a Path, HarnessError> {
    ctx.database_dir.ok_or_else(|| {
        HarnessError::Precondition(format!(
            "tool family {} requires a compilation database, but none was provisioned",
            family.id()
        ))
    })
}

fn required_target<'a>(
    family: ToolFamily,
    ctx: &InvocationContext<'a>,
) -> Result<&'a FixtureFile, HarnessError> {
    ctx.target.ok_or_else(|| {
        HarnessError::Precondition(format!(
            "no fixture file to pass to the {} tool; place a fixture first",
            family.id()
        ))
    })
}

fn wrong_input(family: ToolFamily, input: &ContractInput) -> HarnessError {
    HarnessError::Precondition(format!(
        "tool family {} does not take {}",
        family.id(),
        input.kind()
    ))
}

#[cfg(test)]
#[path = "contract_tests.rs"]
mod tests;
