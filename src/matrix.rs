//! Build matrix construction and persistence

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::MatrixConfig;
use crate::version::companion::CompanionVersion;
use crate::version::error::RegistryError;
use crate::version::selector::SelectedReleases;
use crate::version::semver::ReleaseLine;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("Failed to fetch release list: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to serialize matrix: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write matrix to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

/// One CI job: a release, the companion version it ships with, and a runtime.
///
/// Field names are consumed verbatim by downstream workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub boot: String,
    pub framework: CompanionVersion,
    pub java: String,
}

/// Top-level document written to the output file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Matrix {
    pub matrix: Vec<MatrixEntry>,
}

impl Matrix {
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Pretty-printed JSON followed by a newline
    pub fn to_json(&self) -> Result<String, MatrixError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Cross each selected release with the runtimes configured for its line.
///
/// Lines are emitted in ascending order, runtimes in table order. A line
/// without runtimes contributes nothing; a line without a resolved companion
/// version is written as unknown.
pub fn build_matrix(
    selected: &SelectedReleases,
    companions: &BTreeMap<ReleaseLine, CompanionVersion>,
    config: &MatrixConfig,
) -> Matrix {
    let matrix = selected
        .iter()
        .flat_map(|(line, release)| {
            let framework = companions
                .get(line)
                .cloned()
                .unwrap_or(CompanionVersion::Unknown);
            let boot = release.to_string();

            config
                .runtimes_for(line)
                .iter()
                .map(move |java| MatrixEntry {
                    boot: boot.clone(),
                    framework: framework.clone(),
                    java: java.clone(),
                })
        })
        .collect();

    Matrix { matrix }
}

/// Overwrite `path` with the matrix document, creating parent directories
pub fn write_matrix(path: &Path, matrix: &Matrix) -> Result<(), MatrixError> {
    let json = matrix.to_json()?;
    let io_error = |source| MatrixError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, json).map_err(io_error)?;

    info!("Wrote {} matrix entries to {}", matrix.len(), path.display());
    Ok(())
}

/// Console line reporting the entry count; `path` is None for a dry run
pub fn summary(path: Option<&Path>, matrix: &Matrix) -> String {
    match path {
        Some(path) => format!(
            "Updated {} with {} matrix entries.",
            path.display(),
            matrix.len()
        ),
        None => format!("Generated {} matrix entries.", matrix.len()),
    }
}

/// Write the matrix to `path`, or to `stdout` when `dry_run` is set, and
/// return the summary line. A dry run never touches `path`.
pub fn publish_matrix<W: Write>(
    matrix: &Matrix,
    path: &Path,
    dry_run: bool,
    stdout: &mut W,
) -> Result<String, MatrixError> {
    if dry_run {
        stdout
            .write_all(matrix.to_json()?.as_bytes())
            .map_err(MatrixError::Stdout)?;
        return Ok(summary(None, matrix));
    }

    write_matrix(path, matrix)?;
    Ok(summary(Some(path), matrix))
}
