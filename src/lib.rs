pub mod config;
pub mod logging;
pub mod matrix;
pub mod pipeline;
pub mod version;
