#![allow(non_snake_case)]

//! Pipeline sequencing tests exercised through a recording runner.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use coverage_reporter::error::{ReportError, ReportResult};
use coverage_reporter::options::ReportOptions;
use coverage_reporter::pipeline::{self, EXCLUDED_PATTERNS};
use coverage_reporter::tools::{ToolInvocation, ToolOutcome, ToolRunner};

/// Runner that records invocations instead of spawning processes.
#[derive(Default)]
struct RecordingRunner {
    lcov_installed: bool,
    fail_from_step: Option<usize>,
    invocations: Vec<ToolInvocation>,
}

impl RecordingRunner {
    fn with_lcov() -> Self {
        Self {
            lcov_installed: true,
            ..Self::default()
        }
    }
}

impl ToolRunner for RecordingRunner {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        if self.lcov_installed {
            Some(PathBuf::from("/opt/homebrew/bin").join(tool))
        } else {
            None
        }
    }

    fn run(&mut self, invocation: &ToolInvocation) -> ReportResult<ToolOutcome> {
        let step = self.invocations.len();
        self.invocations.push(invocation.clone());
        let code = match self.fail_from_step {
            Some(failing) if step >= failing => Some(1),
            _ => Some(0),
        };
        Ok(ToolOutcome { code })
    }
}

fn explicit_options(build_dir: &str, output_dir: &str) -> ReportOptions {
    ReportOptions {
        project_name: "MyApp".to_string(),
        scheme: "MyScheme".to_string(),
        build_dir: Some(PathBuf::from(build_dir)),
        output_dir: PathBuf::from(output_dir),
        ..ReportOptions::default()
    }
}

#[test]
fn run__explicit_build_dir__then_capture_filters_render_in_order() {
    let options = explicit_options("/tmp/dd", "coverage_reports");
    let mut runner = RecordingRunner::with_lcov();

    pipeline::run(&options, &mut runner).unwrap();

    assert_eq!(runner.invocations.len(), 5);

    let capture = &runner.invocations[0];
    assert_eq!(capture.program, "lcov");
    assert!(capture.args.contains(&"--capture".to_string()));
    assert!(capture.args.contains(&"/tmp/dd".to_string()));
    assert!(capture.args.contains(&"lcov_branch_coverage=1".to_string()));

    for (filter, pattern) in runner.invocations[1..4].iter().zip(EXCLUDED_PATTERNS) {
        assert_eq!(filter.program, "lcov");
        assert!(filter.args.contains(&pattern.to_string()));
        // Both the --remove input and the --output rewrite target the same
        // trace file.
        let trace_refs = filter
            .args
            .iter()
            .filter(|arg| arg.as_str() == "coverage_reports/coverage.info")
            .count();
        assert_eq!(trace_refs, 2);
    }

    let render = &runner.invocations[4];
    assert_eq!(render.program, "genhtml");
    assert!(render.args.contains(&"coverage_reports".to_string()));
}

#[test]
fn run__missing_lcov__then_aborts_before_any_invocation() {
    let options = explicit_options("/tmp/dd", "coverage_reports");
    let mut runner = RecordingRunner::default();

    let err = pipeline::run(&options, &mut runner).unwrap_err();

    assert!(matches!(err, ReportError::MissingTool { tool: "lcov" }));
    assert!(err.to_string().contains("brew install lcov"));
    assert!(runner.invocations.is_empty());
}

#[test]
fn run__missing_lcov_in_dry_run__then_pipeline_still_runs() {
    let options = ReportOptions {
        dry_run: true,
        ..explicit_options("/tmp/dd", "coverage_reports")
    };
    let mut runner = RecordingRunner::default();

    pipeline::run(&options, &mut runner).unwrap();
    assert_eq!(runner.invocations.len(), 5);
}

#[test]
fn run__derived_build_dir__then_end_to_end_sequence() {
    let home = tempdir().unwrap();
    let derived_data = home.path().join("Library/Developer/Xcode/DerivedData");
    fs::create_dir_all(derived_data.join("Foo-abcdef")).unwrap();
    std::env::set_var("HOME", home.path());

    let options = ReportOptions {
        project_name: "Foo".to_string(),
        scheme: "FooScheme".to_string(),
        configuration: "Release".to_string(),
        output_dir: PathBuf::from("cov_out"),
        ..ReportOptions::default()
    };
    let mut runner = RecordingRunner::with_lcov();

    pipeline::run(&options, &mut runner).unwrap();

    let expected_build_dir = format!(
        "{}/Library/Developer/Xcode/DerivedData/Foo-abcdef/Build/Intermediates/Foo.build/Release-iphonesimulator/FooScheme.build/Objects-normal/x86_64/",
        home.path().display()
    );

    let capture = &runner.invocations[0];
    assert_eq!(
        capture.args,
        vec![
            "--capture".to_string(),
            "--directory".to_string(),
            expected_build_dir,
            "--output-file".to_string(),
            "cov_out/coverage.info".to_string(),
            "--rc".to_string(),
            "lcov_branch_coverage=1".to_string(),
        ]
    );

    for (filter, pattern) in runner.invocations[1..4].iter().zip(EXCLUDED_PATTERNS) {
        assert!(filter.args.contains(&pattern.to_string()));
        assert!(filter.args.contains(&"cov_out/coverage.info".to_string()));
    }

    let render = &runner.invocations[4];
    assert_eq!(render.program, "genhtml");
    assert_eq!(render.args[0], "cov_out/coverage.info");
    assert!(render.args.contains(&"cov_out".to_string()));
}

#[test]
fn run__nonzero_exits_lenient__then_all_steps_still_run() {
    let options = explicit_options("/tmp/dd", "coverage_reports");
    let mut runner = RecordingRunner {
        fail_from_step: Some(0),
        ..RecordingRunner::with_lcov()
    };

    pipeline::run(&options, &mut runner).unwrap();
    assert_eq!(runner.invocations.len(), 5);
}

#[test]
fn run__nonzero_exit_strict__then_stops_at_failing_step() {
    let options = ReportOptions {
        strict: true,
        ..explicit_options("/tmp/dd", "coverage_reports")
    };
    let mut runner = RecordingRunner {
        fail_from_step: Some(0),
        ..RecordingRunner::with_lcov()
    };

    let err = pipeline::run(&options, &mut runner).unwrap_err();

    assert!(matches!(err, ReportError::ToolFailed { .. }));
    assert_eq!(runner.invocations.len(), 1);
}
