//! Registry trait for fetching release metadata from a remote repository

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::{ArtifactCoordinates, Dependency, PackageVersions};

/// Trait for fetching artifact metadata from a repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches every published version of an artifact
    ///
    /// # Returns
    /// * `Ok(PackageVersions)` - Raw version strings in index order, unfiltered
    /// * `Err(RegistryError)` - If the fetch or parse fails
    async fn fetch_all_versions(
        &self,
        artifact: &ArtifactCoordinates,
    ) -> Result<PackageVersions, RegistryError>;

    /// Fetches the dependencies declared in one release's build descriptor
    async fn fetch_dependencies(
        &self,
        artifact: &ArtifactCoordinates,
        version: &str,
    ) -> Result<Vec<Dependency>, RegistryError>;
}
