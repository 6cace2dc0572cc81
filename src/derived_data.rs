//! Locating the derived build directory that holds coverage data.
//!
//! Xcode writes build intermediates under
//! `~/Library/Developer/Xcode/DerivedData/<Project>-<hash>/`. The hash is not
//! predictable, so the newest directory whose name contains the project name
//! is taken as the match.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{ReportError, ReportResult};
use crate::options::ReportOptions;

/// Resolve the directory that the capture step should scan.
///
/// An explicit `build_dir` is returned unchanged. Otherwise the path is
/// derived from the DerivedData tree under the user's home directory.
pub fn resolve_build_dir(options: &ReportOptions) -> ReportResult<PathBuf> {
    if let Some(build_dir) = &options.build_dir {
        return Ok(build_dir.clone());
    }

    let root = derived_data_root()?;
    Ok(resolve_in_root(&root, options))
}

fn derived_data_root() -> ReportResult<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| ReportError::HomeDirUnavailable)?;
    Ok(PathBuf::from(home).join("Library/Developer/Xcode/DerivedData"))
}

/// Derive the build directory from a DerivedData root.
///
/// When no directory matches the project name the spliced path carries an
/// empty segment. It is still returned: validation is left to the capture
/// tool.
pub fn resolve_in_root(root: &Path, options: &ReportOptions) -> PathBuf {
    let matched = find_project_dir(root, &options.project_name).unwrap_or_default();
    if matched.is_empty() {
        tracing::warn!(
            project = %options.project_name,
            root = %root.display(),
            "no DerivedData directory matches the project name"
        );
    }

    PathBuf::from(format!(
        "{}/{}/Build/Intermediates/{}.build/{}-iphonesimulator/{}.build/Objects-normal/x86_64/",
        root.display(),
        matched,
        options.project_name,
        options.configuration,
        options.scheme,
    ))
}

/// Name of the newest directory under `root` containing `project_name`.
///
/// Equivalent to `ls -t <root> | grep <project_name> | head -1`.
fn find_project_dir(root: &Path, project_name: &str) -> Option<String> {
    let entries = fs::read_dir(root).ok()?;

    let mut candidates: Vec<(SystemTime, String)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_type()
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false)
        })
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if !name.contains(project_name) {
                return None;
            }
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            Some((modified, name))
        })
        .collect();

    candidates.sort_by(|a, b| b.0.cmp(&a.0));
    candidates.into_iter().next().map(|(_, name)| name)
}
