//! Common types shared by the registry, selector and resolver

use std::fmt;

use serde::Deserialize;

/// Raw version strings as published in a repository index, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageVersions {
    pub versions: Vec<String>,
}

impl PackageVersions {
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Maven group/artifact pair identifying an artifact in a repository
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCoordinates {
    pub group_id: String,
    pub artifact_id: String,
}

impl ArtifactCoordinates {
    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
        }
    }

    /// Repository path of the artifact directory (e.g. "org/example/demo")
    pub fn path(&self) -> String {
        format!("{}/{}", self.group_id.replace('.', "/"), self.artifact_id)
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A dependency declared in a release descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl Dependency {
    pub fn matches(&self, coordinates: &ArtifactCoordinates) -> bool {
        self.group_id == coordinates.group_id && self.artifact_id == coordinates.artifact_id
    }
}
