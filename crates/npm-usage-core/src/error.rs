use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Input the caller left out and that had to come from the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    PackageName,
    CommandNames,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingInput::PackageName => "the package name (--package-name)",
            MissingInput::CommandNames => "the CLI utility names (--cli-utility-names)",
        })
    }
}

/// Underlying reason a manifest could not be loaded.
#[derive(Debug, Error)]
pub enum ManifestFailure {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error(
        "failed to read manifest '{}': {source}. Either specify {missing} explicitly or make sure that '{}' exists and is valid JSON",
        path.display(),
        path.display()
    )]
    ManifestRead {
        path: PathBuf,
        missing: MissingInput,
        #[source]
        source: ManifestFailure,
    },

    #[error(
        "manifest '{}' has no `bin` field. Either specify {} explicitly or add a `bin` field to the manifest",
        path.display(),
        MissingInput::CommandNames
    )]
    MissingCommandMap { path: PathBuf },

    #[error("failed to write output file '{}': {source}", path.display())]
    FilesystemWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

pub type UsageResult<T> = Result<T, UsageError>;
