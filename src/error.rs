use std::path::PathBuf;

use thiserror::Error;

/// Every way loading credentials can fail. None of these are recovered
/// locally; the binary reports them and exits non-zero.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("environment variable {var} is not set or is empty")]
    MissingConfiguration { var: String },
    #[error("unable to read credentials at {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credentials at {} are not a valid JSON object: {reason}", path.display())]
    MalformedData { path: PathBuf, reason: String },
}

impl LoadError {
    /// Short stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::MissingConfiguration { .. } => "missing-configuration",
            LoadError::FileAccess { .. } => "file-access",
            LoadError::MalformedData { .. } => "malformed-data",
        }
    }
}
