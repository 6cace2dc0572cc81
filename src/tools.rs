//! External tool execution.
//!
//! Every invocation flows through [`run_step`] over the [`ToolRunner`] seam,
//! so the exit-code policy has a single enforcement point and tests can
//! substitute a runner that records commands instead of spawning them.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{ReportError, ReportResult};

/// The coverage capture and filter tool.
pub const LCOV: &str = "lcov";

/// The HTML renderer shipped with the lcov package.
pub const GENHTML: &str = "genhtml";

/// One external command: a program name and its discrete arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit state of one external invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Process exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ToolOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Seam between the pipeline and the operating system.
pub trait ToolRunner {
    /// Resolve a tool on the search path.
    fn locate(&self, tool: &str) -> Option<PathBuf>;

    /// Execute an invocation, blocking until the process exits.
    fn run(&mut self, invocation: &ToolInvocation) -> ReportResult<ToolOutcome>;
}

/// Runner that spawns real processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }

    fn run(&mut self, invocation: &ToolInvocation) -> ReportResult<ToolOutcome> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|source| ReportError::Spawn {
                tool: invocation.program.clone(),
                source,
            })?;
        Ok(ToolOutcome {
            code: status.code(),
        })
    }
}

/// Run one pipeline step.
///
/// Tool failures, including a tool that cannot be launched at all, are not
/// checked unless `strict` is set; the lenient path logs a warning and keeps
/// going.
pub fn run_step(
    runner: &mut dyn ToolRunner,
    invocation: &ToolInvocation,
    strict: bool,
) -> ReportResult<()> {
    tracing::debug!(command = %invocation, "running external tool");

    match runner.run(invocation) {
        Ok(outcome) if outcome.success() => Ok(()),
        Ok(outcome) => {
            if strict {
                return Err(ReportError::ToolFailed {
                    tool: invocation.program.clone(),
                    code: outcome.code,
                });
            }
            tracing::warn!(
                tool = %invocation.program,
                code = ?outcome.code,
                "external tool exited with a non-zero status"
            );
            Ok(())
        }
        Err(err) => {
            if strict {
                return Err(err);
            }
            tracing::warn!(tool = %invocation.program, error = %err, "external tool failed to run");
            Ok(())
        }
    }
}
