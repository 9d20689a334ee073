//! Project configuration (CCDEV.toml)

mod project_toml;

pub use project_toml::{Platform, ProjectConfig, CONFIG_FILE};
