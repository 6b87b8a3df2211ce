//! Matrix generation pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Selector   │────▶│  Companion  │────▶│   Matrix    │
//! │ (versions)  │     │(latest/line)│     │  (per line) │     │  (cross)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Stages run strictly in sequence. A failure fetching the release list
//! aborts the run before anything is written; descriptor failures only mark
//! the affected release's companion version as unknown.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::MatrixConfig;
use crate::matrix::{Matrix, MatrixError, build_matrix};
use crate::version::companion::resolve_companion_version;
use crate::version::registry::Registry;
use crate::version::selector::select_latest_per_line;

/// Run every stage except persistence and return the matrix
pub async fn generate_matrix<R: Registry + ?Sized>(
    registry: &R,
    config: &MatrixConfig,
) -> Result<Matrix, MatrixError> {
    let versions = registry.fetch_all_versions(&config.artifact).await?;
    if versions.is_empty() {
        warn!("Repository index lists no versions of {}", config.artifact);
    } else {
        info!(
            "Fetched {} published versions of {}",
            versions.versions.len(),
            config.artifact
        );
    }

    let selected = select_latest_per_line(&versions.versions, &config.tracked_lines);
    info!(
        "Selected {} of {} tracked release lines",
        selected.len(),
        config.tracked_lines.len()
    );

    let mut companions = BTreeMap::new();
    for (line, release) in &selected {
        let companion = resolve_companion_version(
            registry,
            &config.artifact,
            &config.companion,
            &release.to_string(),
        )
        .await;
        companions.insert(*line, companion);
    }

    let unresolved = companions.values().filter(|c| c.is_unknown()).count();
    if unresolved > 0 {
        warn!(
            "{} of {} releases have an unknown {} version",
            unresolved,
            companions.len(),
            config.companion
        );
    }

    Ok(build_matrix(&selected, &companions, config))
}
