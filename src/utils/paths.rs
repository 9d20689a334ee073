//! Path derivation for ccdev projects
//!
//! All project-relative paths are derived from the working directory; ccdev
//! assumes it is invoked from inside the project. Nothing here validates
//! existence: a missing directory is a build or discovery concern.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::build::cmake::BuildType;

/// Environment variable overriding the ccdev home directory
pub const TOOL_HOME_ENV: &str = "CCDEV_HOME";

/// Canonical directories of a ccdev project
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Project root (the invocation directory)
    pub root: PathBuf,
    /// CMake configure/build output, `<root>/build`
    pub build_dir: PathBuf,
    /// Produced application binaries, `<root>/bin`
    pub bin_dir: PathBuf,
    /// Compiled test executables, `<root>/bin/test`
    pub test_bin_dir: PathBuf,
}

impl ProjectLayout {
    /// Derive the layout from an explicit project root
    pub fn from_root(root: PathBuf) -> Self {
        let build_dir = root.join("build");
        let bin_dir = root.join("bin");
        let test_bin_dir = bin_dir.join("test");
        Self {
            root,
            build_dir,
            bin_dir,
            test_bin_dir,
        }
    }

    /// Derive the layout from the current working directory
    pub fn from_current_dir() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::from_root(root))
    }
}

/// The ccdev home directory: $CCDEV_HOME if set, else `~/.ccdev`
pub fn tool_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(TOOL_HOME_ENV) {
        return Ok(PathBuf::from(home));
    }

    let base = directories::BaseDirs::new().context("Failed to resolve the user home directory")?;
    Ok(base.home_dir().join(".ccdev"))
}

/// Shared-library directory of installed dependencies for a platform triplet
///
/// Debug builds link against the `debug` subtree; every other build type
/// resolves to the release binaries.
pub fn dependency_bin_dir(tool_home: &Path, triplet: &str, build_type: BuildType) -> PathBuf {
    let installed = tool_home.join("installed").join(triplet);
    match build_type {
        BuildType::Debug => installed.join("debug").join("bin"),
        _ => installed.join("bin"),
    }
}
