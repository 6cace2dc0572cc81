use std::io;

use thiserror::Error;

use crate::platform::Platform;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{tool} not installed, please install using `brew install {tool}`")]
    MissingTool { tool: &'static str },
    #[error("platform {0} is not supported, expected ios or mac")]
    UnsupportedPlatform(Platform),
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },
    #[error("{tool} exited with a non-zero status")]
    ToolFailed { tool: String, code: Option<i32> },
    #[error("HOME is not set, cannot locate the Xcode DerivedData directory")]
    HomeDirUnavailable,
}

pub type ReportResult<T> = Result<T, ReportError>;
