//! Maven repository implementation (maven-metadata.xml and POM descriptors)

use reqwest::Client;
use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::{ArtifactCoordinates, Dependency, PackageVersions};

/// Default base URL for Maven Central
pub const DEFAULT_BASE_URL: &str = "https://repo1.maven.org/maven2";

/// Registry implementation for Maven-layout repositories
pub struct MavenRegistry {
    client: Client,
    base_url: String,
}

impl MavenRegistry {
    /// Creates a new MavenRegistry with a custom base URL
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        Ok(Self {
            client: Client::builder().user_agent("version-matrix").build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn metadata_url(&self, artifact: &ArtifactCoordinates) -> String {
        format!("{}/{}/maven-metadata.xml", self.base_url, artifact.path())
    }

    fn pom_url(&self, artifact: &ArtifactCoordinates, version: &str) -> String {
        format!(
            "{}/{}/{}/{}-{}.pom",
            self.base_url,
            artifact.path(),
            version,
            artifact.artifact_id,
            version
        )
    }

    async fn fetch_text(&self, url: &str, what: &str) -> Result<String, RegistryError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            warn!("Maven repository returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.text().await.map_err(|e| {
            warn!("Failed to read Maven repository response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl Registry for MavenRegistry {
    async fn fetch_all_versions(
        &self,
        artifact: &ArtifactCoordinates,
    ) -> Result<PackageVersions, RegistryError> {
        let url = self.metadata_url(artifact);
        let body = self.fetch_text(&url, &artifact.to_string()).await?;
        parse_metadata(&body)
    }

    async fn fetch_dependencies(
        &self,
        artifact: &ArtifactCoordinates,
        version: &str,
    ) -> Result<Vec<Dependency>, RegistryError> {
        let url = self.pom_url(artifact, version);
        let body = self
            .fetch_text(&url, &format!("{}:{}", artifact, version))
            .await?;
        parse_pom_dependencies(&body)
    }
}

/// Extracts every `<version>` element from a maven-metadata.xml document, in document order.
///
/// Text is kept verbatim; padded entries are left for the selector to reject.
pub fn parse_metadata(xml: &str) -> Result<PackageVersions, RegistryError> {
    let doc = Document::parse(xml)?;

    let versions = doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "version")
        .filter_map(|node| node.text())
        .map(str::to_string)
        .collect();

    Ok(PackageVersions::new(versions))
}

/// Extracts `<dependency>` entries from a POM.
///
/// Elements are matched by local name so the POM's default namespace is
/// accepted as well as namespace-less documents. Entries missing a group or
/// artifact id are skipped.
pub fn parse_pom_dependencies(xml: &str) -> Result<Vec<Dependency>, RegistryError> {
    let doc = Document::parse(xml)?;

    let dependencies = doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "dependency")
        .filter_map(|node| {
            Some(Dependency {
                group_id: child_text(node, "groupId")?,
                artifact_id: child_text(node, "artifactId")?,
                version: child_text(node, "version"),
            })
        })
        .collect();

    Ok(dependencies)
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .and_then(|child| child.text())
        .map(str::to_string)
}
