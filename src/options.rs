//! Options for a report-generation run.

use std::path::PathBuf;

/// Build configuration used when none is given.
pub const DEFAULT_CONFIGURATION: &str = "Debug";

/// Directory that report artifacts are written into by default.
pub const DEFAULT_OUTPUT_DIR: &str = "coverage_reports";

/// Resolved options for one report-generation run.
///
/// Either `build_dir` is set, or `project_name`, `scheme`, and
/// `configuration` must be usable to derive one from the DerivedData tree.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Name of the project.
    pub project_name: String,
    /// Scheme of the project.
    pub scheme: String,
    /// Build configuration.
    pub configuration: String,
    /// Directory that the trace file and HTML report are written into.
    pub output_dir: PathBuf,
    /// Explicit build directory, bypassing DerivedData resolution.
    pub build_dir: Option<PathBuf>,
    /// Skip the lcov availability check.
    pub dry_run: bool,
    /// Treat a non-zero exit from an external tool as fatal.
    pub strict: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            scheme: String::new(),
            configuration: DEFAULT_CONFIGURATION.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            build_dir: None,
            dry_run: false,
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn report_options__default__then_debug_configuration_and_report_dir() {
        let options = ReportOptions::default();
        assert_eq!(options.configuration, "Debug");
        assert_eq!(options.output_dir, PathBuf::from("coverage_reports"));
        assert!(options.build_dir.is_none());
        assert!(!options.dry_run);
        assert!(!options.strict);
    }
}
