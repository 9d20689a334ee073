//! CCDEV.toml configuration parsing
//!
//! A project is described by a CCDEV.toml at its root:
//!
//! ```toml
//! [project]
//! name = "my-app"
//!
//! [build]
//! toolchain = "vcpkg/scripts/buildsystems/vcpkg.cmake"
//! platform = "x64"
//! build_type = "Debug"
//! generator = "Ninja"
//! ```
//!
//! `toolchain` and `platform` have no defaults: commands that need them fail
//! with a configuration error instead of guessing.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::build::cmake::BuildType;
use crate::error::{hints, CcdevError};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "CCDEV.toml";

/// Root configuration from CCDEV.toml
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Package metadata
    pub project: ProjectSection,

    /// Build configuration
    #[serde(default)]
    pub build: BuildSection,
}

/// The `[project]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Application name; also the name of the produced executable
    pub name: String,
}

/// The `[build]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSection {
    /// CMake toolchain file, relative to the project root or absolute
    pub toolchain: Option<PathBuf>,

    /// Target platform architecture
    pub platform: Option<Platform>,

    /// CMake build type
    #[serde(default)]
    pub build_type: BuildType,

    /// CMake generator; defaults to Ninja when omitted
    pub generator: Option<String>,
}

/// Target platform architecture
///
/// Combined with the host OS this forms the installed-dependency triplet,
/// e.g. `x64-windows` or `x86-linux`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    X86,
    X64,
}

impl Platform {
    /// The triplet naming the installed-dependency subtree for this platform
    pub fn triplet(&self) -> String {
        format!("{}-{}", self, triplet_os())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::X86 => write!(f, "x86"),
            Platform::X64 => write!(f, "x64"),
        }
    }
}

/// OS component of the dependency triplet ("osx" follows the vcpkg convention)
fn triplet_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "osx",
        other => other,
    }
}

impl ProjectConfig {
    /// Load configuration from CCDEV.toml in the current directory
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Err(CcdevError::config_error_with_hint(
                format!("{} not found in the current directory", CONFIG_FILE),
                None,
                hints::config_not_found(),
            )
            .into());
        }
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;
        Ok(config)
    }

    /// The configured toolchain file, required for configure/build
    pub fn require_toolchain(&self) -> Result<&PathBuf> {
        self.build.toolchain.as_ref().ok_or_else(|| {
            CcdevError::config_error_with_hint(
                format!("no toolchain configured in {}", CONFIG_FILE),
                None,
                hints::build_config(),
            )
            .into()
        })
    }

    /// The configured target platform, required for configure/build and
    /// for resolving the installed-dependency directory
    pub fn require_platform(&self) -> Result<Platform> {
        self.build.platform.ok_or_else(|| {
            CcdevError::config_error_with_hint(
                format!("no target platform configured in {}", CONFIG_FILE),
                None,
                hints::build_config(),
            )
            .into()
        })
    }

    /// The configured generator, defaulting to Ninja
    pub fn generator(&self) -> &str {
        self.build.generator.as_deref().unwrap_or("Ninja")
    }
}
