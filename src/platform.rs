//! Target platform gate.

use std::fmt;

use clap::ValueEnum;

/// Platforms an Xcode build can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Ios,
    Mac,
    Android,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Mac => write!(f, "mac"),
            Platform::Android => write!(f, "android"),
        }
    }
}

/// Reports whether coverage generation supports the given platform.
///
/// Only iOS and macOS builds leave lcov-readable instrumentation data in
/// DerivedData.
pub fn is_supported(platform: Platform) -> bool {
    matches!(platform, Platform::Ios | Platform::Mac)
}
