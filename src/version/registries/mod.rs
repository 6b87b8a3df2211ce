//! Registry implementations for fetching release metadata

pub mod maven;

pub use maven::MavenRegistry;
