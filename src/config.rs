use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::version::registries::maven::DEFAULT_BASE_URL;
use crate::version::semver::ReleaseLine;
use crate::version::types::ArtifactCoordinates;

// =============================================================================
// Defaults
// =============================================================================

/// Release lines tracked when no configuration overrides them
pub const DEFAULT_TRACKED_LINES: &[&str] = &["3.0", "3.1", "3.2", "3.3", "3.4"];

/// Runtime versions exercised per release line ("3.0" does not support 21)
pub const DEFAULT_RUNTIME_COMPATIBILITY: &[(&str, &[&str])] = &[
    ("3.0", &["17"]),
    ("3.1", &["17", "21"]),
    ("3.2", &["17", "21"]),
    ("3.3", &["17", "21"]),
    ("3.4", &["17", "21"]),
];

/// Default location of the generated matrix file
pub const DEFAULT_OUTPUT_PATH: &str = ".github/spring-versions.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed JSON, or a release line that is not "major.minor"
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Matrix generation configuration
///
/// Loaded once at startup and passed by reference to each stage.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MatrixConfig {
    pub tracked_lines: BTreeSet<ReleaseLine>,
    /// Release line -> runtime versions, in the order they are emitted
    pub runtime_compatibility: BTreeMap<ReleaseLine, Vec<String>>,
    pub repository_url: String,
    /// Artifact whose releases define the matrix
    pub artifact: ArtifactCoordinates,
    /// Library whose version is read from each release's descriptor
    pub companion: ArtifactCoordinates,
    pub output_path: PathBuf,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            tracked_lines: DEFAULT_TRACKED_LINES
                .iter()
                .filter_map(|line| line.parse().ok())
                .collect(),
            runtime_compatibility: DEFAULT_RUNTIME_COMPATIBILITY
                .iter()
                .filter_map(|(line, runtimes)| {
                    let line = line.parse().ok()?;
                    Some((line, runtimes.iter().map(|r| r.to_string()).collect()))
                })
                .collect(),
            repository_url: DEFAULT_BASE_URL.to_string(),
            artifact: ArtifactCoordinates::new("org.springframework.boot", "spring-boot-starter"),
            companion: ArtifactCoordinates::new("org.springframework", "spring-core"),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl MatrixConfig {
    /// Reads a JSON configuration file; keys it omits keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Runtime versions configured for a line, empty when the line has none
    pub fn runtimes_for(&self, line: &ReleaseLine) -> &[String] {
        self.runtime_compatibility
            .get(line)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_tracks_three_zero_through_three_four() {
        let config = MatrixConfig::default();

        let lines: Vec<String> = config.tracked_lines.iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["3.0", "3.1", "3.2", "3.3", "3.4"]);
        assert_eq!(config.runtimes_for(&ReleaseLine::new(3, 0)), ["17"]);
        assert_eq!(config.runtimes_for(&ReleaseLine::new(3, 4)), ["17", "21"]);
        assert_eq!(config.output_path, PathBuf::from(".github/spring-versions.json"));
    }

    #[test]
    fn matrix_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<MatrixConfig>(json!({
            "trackedLines": ["3.3"],
            "runtimeCompatibility": { "3.3": ["21", "17"] }
        }))
        .unwrap();

        assert_eq!(
            result.tracked_lines,
            BTreeSet::from([ReleaseLine::new(3, 3)])
        );
        assert_eq!(result.runtimes_for(&ReleaseLine::new(3, 3)), ["21", "17"]);
        assert_eq!(result.repository_url, DEFAULT_BASE_URL);
        assert_eq!(result.companion, MatrixConfig::default().companion);
    }

    #[test]
    fn matrix_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<MatrixConfig>(json!({
            "trackedLines": ["2.7"],
            "runtimeCompatibility": { "2.7": ["8", "11", "17"] },
            "repositoryUrl": "https://mirror.example.com/maven2",
            "artifact": { "groupId": "com.example", "artifactId": "starter" },
            "companion": { "groupId": "com.example", "artifactId": "core" },
            "outputPath": "matrix.json"
        }))
        .unwrap();

        assert_eq!(
            result,
            MatrixConfig {
                tracked_lines: BTreeSet::from([ReleaseLine::new(2, 7)]),
                runtime_compatibility: BTreeMap::from([(
                    ReleaseLine::new(2, 7),
                    vec!["8".to_string(), "11".to_string(), "17".to_string()]
                )]),
                repository_url: "https://mirror.example.com/maven2".to_string(),
                artifact: ArtifactCoordinates::new("com.example", "starter"),
                companion: ArtifactCoordinates::new("com.example", "core"),
                output_path: PathBuf::from("matrix.json"),
            }
        );
    }

    #[test]
    fn load_reports_malformed_release_line_as_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"runtimeCompatibility": {{"3.02": ["17"]}}}}"#).unwrap();

        let result = MatrixConfig::load(file.path());

        match result {
            Err(ConfigError::Parse { source, .. }) => {
                assert!(source.to_string().contains("invalid release line"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn matrix_config_rejects_malformed_release_line() {
        let result = serde_json::from_value::<MatrixConfig>(json!({
            "trackedLines": ["3.x"]
        }));

        assert!(result.is_err());
    }

    #[test]
    fn runtimes_for_untabled_line_is_empty() {
        let config = MatrixConfig::default();

        assert!(config.runtimes_for(&ReleaseLine::new(9, 9)).is_empty());
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"outputPath": "out/matrix.json"}}"#).unwrap();

        let config = MatrixConfig::load(file.path()).unwrap();

        assert_eq!(config.output_path, PathBuf::from("out/matrix.json"));
        assert_eq!(config.tracked_lines, MatrixConfig::default().tracked_lines);
    }

    #[test]
    fn load_reports_missing_file() {
        let result = MatrixConfig::load(Path::new("/nonexistent/version-matrix.json"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_reports_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = MatrixConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
