//! Shared fixtures for end-to-end tests

pub mod maven;

pub use maven::{MavenFixture, test_config};
