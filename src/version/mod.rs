//! Release metadata layer
//!
//! Fetches release lists and descriptors from a Maven-layout repository,
//! selects the latest release per tracked line and resolves the companion
//! library version each release declares.
//!
//! # Modules
//!
//! - [`registry`]: Registry trait for fetching release metadata
//! - [`registries`]: Concrete registry implementations (Maven)
//! - [`selector`]: Latest plain release per tracked release line
//! - [`companion`]: Companion library version lookup with `unknown` fallback
//! - [`semver`]: Strict release and release-line parsing
//! - [`error`]: Error types for registry operations
//! - [`types`]: Common types like `PackageVersions` and `ArtifactCoordinates`

pub mod companion;
pub mod error;
pub mod registries;
pub mod registry;
pub mod selector;
pub mod semver;
pub mod types;
