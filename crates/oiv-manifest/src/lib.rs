//! Package manifest loader.
//!
//! A manifest is a TOML file (`oiv.toml` by default) describing the package
//! metadata, installer colours and the ordered command content. Parsed values
//! are converted into the typed records of `oiv-assembly` and the command
//! algebra of `oiv-command-core`; every invalid entry is reported with its
//! location, not just the first one.

mod raw;
mod validation;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use oiv_assembly::{Assembly, Colors, Metadata};
use oiv_command_core::Content;
use thiserror::Error;
use tracing::debug;

pub use validation::{ManifestValidationError, ManifestValidationErrors};

pub const MANIFEST_FILE_NAME: &str = "oiv.toml";

/// Fully validated package manifest.
#[derive(Clone, Debug)]
pub struct Manifest {
    pub metadata: Metadata,
    pub colors: Colors,
    pub content: Content,
    pub path: PathBuf,
}

impl Manifest {
    /// Locates, reads and validates the manifest.
    pub fn load(options: LoadOptions) -> Result<Self, ManifestError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let path = match options.manifest_path {
            Some(path) => make_absolute(&path, &working_dir),
            None => working_dir.join(MANIFEST_FILE_NAME),
        };

        if !path.exists() {
            return Err(ManifestError::NotFound { path });
        }

        debug!(path = %path.display(), "loading manifest");
        let contents = fs::read_to_string(&path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&contents, path)
    }

    /// Parses and validates manifest text. `path` is used for error reporting.
    pub fn from_toml(contents: &str, path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        let raw: raw::RawManifest = toml::from_str(contents).map_err(|source| {
            ManifestError::Parse {
                path: path.clone(),
                source,
            }
        })?;

        let (metadata, colors, content) = raw
            .into_parts()
            .map_err(|errors| ManifestError::Validation {
                path: path.clone(),
                errors,
            })?;

        debug!(
            path = %path.display(),
            operations = content.operations().len(),
            "manifest loaded"
        );
        Ok(Manifest {
            metadata,
            colors,
            content,
            path,
        })
    }

    /// Builds the package document with a fresh package id.
    pub fn assembly(&self) -> Assembly {
        Assembly::new(
            self.metadata.clone(),
            self.colors,
            self.content.clone(),
        )
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub manifest_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("manifest {path} not found")]
    NotFound { path: PathBuf },
    #[error("failed to read manifest {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("manifest {path} is invalid:\n{errors}")]
    Validation {
        path: PathBuf,
        errors: ManifestValidationErrors,
    },
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ManifestError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ManifestError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ManifestError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
