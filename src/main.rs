//! Coverage report generator for Xcode projects.
//!
//! Shells out to `lcov` and `genhtml` to capture, filter, and render line-
//! and branch-coverage reports from DerivedData build intermediates.
//!
//! # Commands
//!
//! - `coverage_reporter generate` - Generate an HTML coverage report
//! - `coverage_reporter doctor` - Check external tool availability

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use coverage_reporter::doctor;
use coverage_reporter::error::ReportError;
use coverage_reporter::options::{self, ReportOptions};
use coverage_reporter::pipeline;
use coverage_reporter::platform::{self, Platform};
use coverage_reporter::tools::SystemRunner;

/// Coverage report generation for iOS and macOS projects.
#[derive(Parser)]
#[command(name = "coverage_reporter")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate coverage data using lcov
    Generate(GenerateArgs),

    /// Check that the external coverage tools are installed
    #[command(subcommand)]
    Doctor(doctor::DoctorCommands),
}

#[derive(Args)]
struct GenerateArgs {
    /// Name of the project
    #[arg(long, env = "FL_LCOV_PROJECT_NAME", required_unless_present = "build_dir")]
    project_name: Option<String>,

    /// Scheme of the project
    #[arg(long, env = "FL_LCOV_SCHEME", required_unless_present = "build_dir")]
    scheme: Option<String>,

    /// Configuration of the project
    #[arg(long, env = "FL_LCOV_CONFIGURATION", default_value = options::DEFAULT_CONFIGURATION)]
    configuration: String,

    /// The output directory that coverage data will be stored in
    #[arg(long, env = "FL_LCOV_OUTPUT_DIR", default_value = options::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// The build directory where lcov should look for the Derived Data
    #[arg(long, env = "FL_LCOV_BUILD_DIR")]
    build_dir: Option<PathBuf>,

    /// Target platform
    #[arg(long, value_enum, default_value_t = Platform::Ios)]
    platform: Platform,

    /// Skip the lcov availability check
    #[arg(long)]
    dry_run: bool,

    /// Fail when an external tool exits with a non-zero status
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Doctor(cmd) => doctor::run(cmd),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    if !platform::is_supported(args.platform) {
        return Err(ReportError::UnsupportedPlatform(args.platform).into());
    }

    let options = ReportOptions {
        project_name: args.project_name.unwrap_or_default(),
        scheme: args.scheme.unwrap_or_default(),
        configuration: args.configuration,
        output_dir: args.output_dir,
        build_dir: args.build_dir,
        dry_run: args.dry_run,
        strict: args.strict,
    };

    let mut runner = SystemRunner;
    pipeline::run(&options, &mut runner)?;

    tracing::info!(output_dir = %options.output_dir.display(), "coverage report written");
    Ok(())
}
