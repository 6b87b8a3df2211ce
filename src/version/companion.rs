//! Resolves the companion library version declared by a release

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::ArtifactCoordinates;

/// Text written for a companion version that could not be resolved
pub const UNKNOWN: &str = "unknown";

/// Companion library version of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionVersion {
    Resolved(String),
    /// Descriptor could not be fetched or parsed, or declares no matching dependency
    Unknown,
}

impl CompanionVersion {
    pub fn as_str(&self) -> &str {
        match self {
            CompanionVersion::Resolved(version) => version,
            CompanionVersion::Unknown => UNKNOWN,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, CompanionVersion::Unknown)
    }
}

impl fmt::Display for CompanionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CompanionVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Looks up `companion` among the dependencies declared by `artifact` at `release`.
///
/// Never fails: fetch and parse errors are logged and yield `Unknown`, as does
/// a descriptor without a matching dependency.
pub async fn resolve_companion_version<R: Registry + ?Sized>(
    registry: &R,
    artifact: &ArtifactCoordinates,
    companion: &ArtifactCoordinates,
    release: &str,
) -> CompanionVersion {
    match find_companion_version(registry, artifact, companion, release).await {
        Ok(Some(version)) => {
            debug!("{} {} declares {} {}", artifact, release, companion, version);
            CompanionVersion::Resolved(version)
        }
        Ok(None) => {
            warn!(
                "No {} dependency declared by {} {}",
                companion, artifact, release
            );
            CompanionVersion::Unknown
        }
        Err(e) => {
            warn!(
                "Failed to fetch {} version for {} {}: {}",
                companion, artifact, release, e
            );
            CompanionVersion::Unknown
        }
    }
}

async fn find_companion_version<R: Registry + ?Sized>(
    registry: &R,
    artifact: &ArtifactCoordinates,
    companion: &ArtifactCoordinates,
    release: &str,
) -> Result<Option<String>, RegistryError> {
    let dependencies = registry.fetch_dependencies(artifact, release).await?;

    Ok(dependencies
        .into_iter()
        .filter(|dependency| dependency.matches(companion))
        .find_map(|dependency| dependency.version))
}
