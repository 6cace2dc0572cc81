//! The capture, filter, render pipeline.
//!
//! Three external steps run in sequence: `lcov --capture` writes a raw trace
//! into the output directory, one `lcov --remove` per exclusion pattern
//! rewrites it in place, and `genhtml` renders the filtered trace.

use std::path::Path;

use crate::derived_data;
use crate::error::{ReportError, ReportResult};
use crate::options::ReportOptions;
use crate::tools::{self, ToolInvocation, ToolRunner, GENHTML, LCOV};

/// File name of the intermediate trace inside the output directory.
pub const TRACE_FILE_NAME: &str = "coverage.info";

/// Path globs removed from the trace before rendering. Applied in order,
/// each rewriting the trace file in place.
pub const EXCLUDED_PATTERNS: [&str; 3] = ["/Applications/*", "/Frameworks/*", "*/*Tests*/*"];

/// Generate a coverage report: tool availability check, then the pipeline.
///
/// The check resolves only `lcov`; it is skipped entirely in dry-run mode.
pub fn run(options: &ReportOptions, runner: &mut dyn ToolRunner) -> ReportResult<()> {
    if !options.dry_run && runner.locate(LCOV).is_none() {
        return Err(ReportError::MissingTool { tool: LCOV });
    }

    generate(options, runner)
}

/// Execute the capture, filter, render sequence.
pub fn generate(options: &ReportOptions, runner: &mut dyn ToolRunner) -> ReportResult<()> {
    let trace_file = options.output_dir.join(TRACE_FILE_NAME);
    let build_dir = derived_data::resolve_build_dir(options)?;

    tracing::info!(build_dir = %build_dir.display(), "capturing coverage data");
    tools::run_step(
        runner,
        &capture_invocation(&build_dir, &trace_file),
        options.strict,
    )?;

    for pattern in EXCLUDED_PATTERNS {
        tools::run_step(
            runner,
            &remove_invocation(&trace_file, pattern),
            options.strict,
        )?;
    }

    tracing::info!(output_dir = %options.output_dir.display(), "rendering HTML report");
    tools::run_step(
        runner,
        &render_invocation(&trace_file, &options.output_dir),
        options.strict,
    )
}

/// `lcov --capture` against the resolved build directory.
pub fn capture_invocation(build_dir: &Path, trace_file: &Path) -> ToolInvocation {
    ToolInvocation::new(LCOV)
        .arg("--capture")
        .arg("--directory")
        .arg(build_dir.display().to_string())
        .arg("--output-file")
        .arg(trace_file.display().to_string())
        .arg("--rc")
        .arg("lcov_branch_coverage=1")
}

/// `lcov --remove` for one exclusion pattern, rewriting the trace in place.
pub fn remove_invocation(trace_file: &Path, pattern: &str) -> ToolInvocation {
    let trace = trace_file.display().to_string();
    ToolInvocation::new(LCOV)
        .arg("--rc")
        .arg("lcov_branch_coverage=1")
        .arg("--remove")
        .arg(trace.as_str())
        .arg(pattern)
        .arg("--rc")
        .arg("lcov_branch_coverage=1")
        .arg("--output")
        .arg(trace)
}

/// `genhtml` render of the filtered trace into the output directory.
pub fn render_invocation(trace_file: &Path, output_dir: &Path) -> ToolInvocation {
    ToolInvocation::new(GENHTML)
        .arg(trace_file.display().to_string())
        .arg("--output-directory")
        .arg(output_dir.display().to_string())
        .arg("--branch-coverage")
        .arg("--rc")
        .arg("genhtml_branch_coverage=1")
}
