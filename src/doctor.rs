//! Doctor command for external tool health checks.
//!
//! The report pipeline only probes `lcov` before running; this command
//! checks the full toolchain and prints installation hints for anything
//! missing.

use clap::Subcommand;
use serde::Serialize;

use crate::tools::{GENHTML, LCOV};

#[derive(Subcommand)]
pub enum DoctorCommands {
    /// Run all tool checks
    Check {
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

/// Result of a single tool check
#[derive(Serialize, Clone)]
struct ToolCheck {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<String>,
}

/// All check results
#[derive(Serialize)]
struct DoctorReport {
    status: String,
    lcov: ToolCheck,
    genhtml: ToolCheck,
    issues_count: usize,
}

pub fn run(cmd: DoctorCommands) -> anyhow::Result<()> {
    match cmd {
        DoctorCommands::Check { format } => run_checks(&format),
    }
}

fn run_checks(format: &str) -> anyhow::Result<()> {
    let lcov = check_tool(LCOV);
    let genhtml = check_tool(GENHTML);

    let issues_count = [&lcov, &genhtml].iter().filter(|check| !check.ok).count();
    let status = if issues_count == 0 {
        "ok".to_string()
    } else {
        "issues_found".to_string()
    };

    if format == "json" {
        let report = DoctorReport {
            status,
            lcov,
            genhtml,
            issues_count,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&lcov, &genhtml, issues_count);
    }

    if issues_count > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_text_report(lcov: &ToolCheck, genhtml: &ToolCheck, issues_count: usize) {
    println!("Coverage Doctor");
    println!("===============\n");

    print_check(LCOV, lcov);
    print_check(GENHTML, genhtml);
    println!();

    if issues_count == 0 {
        println!("Status: All checks passed");
    } else {
        println!(
            "Status: {} issue{} found",
            issues_count,
            if issues_count == 1 { "" } else { "s" }
        );
    }
}

fn print_check(name: &str, result: &ToolCheck) {
    if result.ok {
        if let Some(path) = &result.path {
            println!("  \u{2713} {}: {}", name, path);
        } else {
            println!("  \u{2713} {}: found", name);
        }
    } else {
        println!("  \u{2717} {}: not found", name);
        if let Some(fix) = &result.fix {
            println!("    \u{2192} {}", fix);
        }
    }
}

/// Probe a tool on the search path.
///
/// genhtml ships with the lcov package, so the fix is the same for both.
fn check_tool(tool: &str) -> ToolCheck {
    match which::which(tool) {
        Ok(path) => ToolCheck {
            ok: true,
            path: Some(path.display().to_string()),
            fix: None,
        },
        Err(_) => ToolCheck {
            ok: false,
            path: None,
            fix: Some("brew install lcov".to_string()),
        },
    }
}
