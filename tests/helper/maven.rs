//! Maven repository test utilities

use std::path::Path;

use mockito::{Mock, Server, ServerGuard};

use version_matrix::config::MatrixConfig;

const STARTER_PATH: &str = "/org/springframework/boot/spring-boot-starter";

/// Render a maven-metadata.xml listing `versions` in the given order
pub fn metadata_xml(versions: &[&str]) -> String {
    let versions: String = versions
        .iter()
        .map(|v| format!("      <version>{}</version>\n", v))
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>org.springframework.boot</groupId>
  <artifactId>spring-boot-starter</artifactId>
  <versioning>
    <versions>
{}    </versions>
  </versioning>
</metadata>"#,
        versions
    )
}

/// Render a namespaced POM declaring `(groupId, artifactId, version)` dependencies
pub fn pom_xml(release: &str, dependencies: &[(&str, &str, &str)]) -> String {
    let dependencies: String = dependencies
        .iter()
        .map(|(group_id, artifact_id, version)| {
            format!(
                "    <dependency>\n      <groupId>{}</groupId>\n      <artifactId>{}</artifactId>\n      <version>{}</version>\n    </dependency>\n",
                group_id, artifact_id, version
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <modelVersion>4.0.0</modelVersion>
  <groupId>org.springframework.boot</groupId>
  <artifactId>spring-boot-starter</artifactId>
  <version>{}</version>
  <dependencies>
{}  </dependencies>
</project>"#,
        release, dependencies
    )
}

/// Configuration pointing at `repository_url`, tracking exactly the lines in `table`
pub fn test_config(
    repository_url: &str,
    output_path: &Path,
    table: &[(&str, &[&str])],
) -> MatrixConfig {
    MatrixConfig {
        tracked_lines: table
            .iter()
            .map(|(line, _)| line.parse().unwrap())
            .collect(),
        runtime_compatibility: table
            .iter()
            .map(|(line, runtimes)| {
                (
                    line.parse().unwrap(),
                    runtimes.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect(),
        repository_url: repository_url.to_string(),
        output_path: output_path.to_path_buf(),
        ..MatrixConfig::default()
    }
}

/// Mock Maven repository serving spring-boot-starter metadata and POMs
pub struct MavenFixture {
    pub server: ServerGuard,
}

impl MavenFixture {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub async fn with_metadata(&mut self, versions: &[&str]) -> Mock {
        self.server
            .mock("GET", format!("{}/maven-metadata.xml", STARTER_PATH).as_str())
            .with_status(200)
            .with_header("content-type", "text/xml")
            .with_body(metadata_xml(versions))
            .create_async()
            .await
    }

    pub async fn with_metadata_status(&mut self, status: usize) -> Mock {
        self.server
            .mock("GET", format!("{}/maven-metadata.xml", STARTER_PATH).as_str())
            .with_status(status)
            .create_async()
            .await
    }

    /// Serve a POM for `release` declaring spring-core at `spring_core`
    pub async fn with_pom(&mut self, release: &str, spring_core: &str) -> Mock {
        let body = pom_xml(
            release,
            &[
                ("org.springframework.boot", "spring-boot", release),
                ("org.springframework", "spring-core", spring_core),
            ],
        );
        self.with_pom_body(release, 200, &body).await
    }

    pub async fn with_pom_body(&mut self, release: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(
                "GET",
                format!(
                    "{}/{}/spring-boot-starter-{}.pom",
                    STARTER_PATH, release, release
                )
                .as_str(),
            )
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }
}
