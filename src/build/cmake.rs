//! CMake configuration and execution
//!
//! This module handles invoking CMake for the configure and build steps.
//! Both steps run synchronously with inherited stdout/stderr; any non-zero
//! exit is an error, and a failed configure never reaches the build step.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{hints, CcdevError};

/// CMake build type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum BuildType {
    #[default]
    #[value(name = "Debug")]
    Debug,
    #[value(name = "Release")]
    Release,
    #[value(name = "RelWithDebInfo")]
    RelWithDebInfo,
    #[value(name = "MinSizeRel")]
    MinSizeRel,
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildType::Debug => write!(f, "Debug"),
            BuildType::Release => write!(f, "Release"),
            BuildType::RelWithDebInfo => write!(f, "RelWithDebInfo"),
            BuildType::MinSizeRel => write!(f, "MinSizeRel"),
        }
    }
}

/// Configure-step descriptor
///
/// Immutable once handed to `configure`; built per invocation and never
/// persisted.
#[derive(Debug, Default)]
pub struct CMakeConfig {
    /// Source directory (where CMakeLists.txt is located)
    source_dir: PathBuf,
    /// Build directory
    build_dir: PathBuf,
    /// Build type
    build_type: BuildType,
    /// Generator (e.g., "Ninja", "Unix Makefiles")
    generator: Option<String>,
    /// Toolchain file
    toolchain_file: Option<PathBuf>,
    /// Installed-dependency triplet (e.g., "x64-windows")
    target_triplet: Option<String>,
    /// Extra C++ compiler flags
    cxx_flags: Vec<String>,
    /// Write compile_commands.json into the build directory
    export_compile_commands: bool,
    /// Suppress warnings about unused -D variables
    no_warn_unused_cli: bool,
    /// Verbose output
    verbose: bool,
}

impl CMakeConfig {
    /// Create a new configure descriptor
    pub fn new(source_dir: PathBuf, build_dir: PathBuf) -> Self {
        Self {
            source_dir,
            build_dir,
            ..Default::default()
        }
    }

    /// Set the build type
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set the generator
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    /// Set the toolchain file
    pub fn toolchain_file(mut self, path: PathBuf) -> Self {
        self.toolchain_file = Some(path);
        self
    }

    /// Set the installed-dependency triplet
    pub fn target_triplet(mut self, triplet: impl Into<String>) -> Self {
        self.target_triplet = Some(triplet.into());
        self
    }

    /// Append an extra C++ compiler flag
    pub fn cxx_flag(mut self, flag: impl Into<String>) -> Self {
        self.cxx_flags.push(flag.into());
        self
    }

    /// Enable compile_commands.json export
    pub fn export_compile_commands(mut self, enabled: bool) -> Self {
        self.export_compile_commands = enabled;
        self
    }

    /// Suppress unused CLI variable warnings
    pub fn no_warn_unused_cli(mut self, enabled: bool) -> Self {
        self.no_warn_unused_cli = enabled;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Render the configure-step argument list
    pub(crate) fn configure_args(&self) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.source_dir.display().to_string(),
            "-B".to_string(),
            self.build_dir.display().to_string(),
        ];

        if self.no_warn_unused_cli {
            args.push("--no-warn-unused-cli".to_string());
        }

        args.push(format!("-DCMAKE_BUILD_TYPE={}", self.build_type));

        if self.export_compile_commands {
            args.push("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON".to_string());
        }

        if let Some(generator) = &self.generator {
            args.push("-G".to_string());
            args.push(generator.clone());
        }

        if let Some(toolchain) = &self.toolchain_file {
            args.push(format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain.display()));
        }

        if let Some(triplet) = &self.target_triplet {
            args.push(format!("-DVCPKG_TARGET_TRIPLET={}", triplet));
        }

        if !self.cxx_flags.is_empty() {
            args.push(format!("-DCMAKE_CXX_FLAGS={}", self.cxx_flags.join(" ")));
        }

        args
    }

    /// Run the CMake configure step
    pub fn configure(&self) -> Result<()> {
        let cmake = find_cmake()?;

        // Create build directory if it doesn't exist
        std::fs::create_dir_all(&self.build_dir)
            .context("Failed to create CMake build directory")?;

        let mut cmd = Command::new(&cmake);
        cmd.args(self.configure_args());

        if self.verbose {
            eprintln!("Running: {:?}", cmd);
        }

        let status = cmd
            .stdin(Stdio::null())
            .status()
            .context("Failed to run CMake configure")?;

        if !status.success() {
            return Err(
                CcdevError::tool_failure("CMake configure", exit_message(status)).into(),
            );
        }

        Ok(())
    }
}

/// Build-step descriptor
///
/// `clean` is the only destructive operation in the tool: it deletes the
/// build directory before configuring and must be requested explicitly.
#[derive(Debug)]
pub struct CMakeBuild {
    /// Build directory
    build_dir: PathBuf,
    /// Build type
    build_type: BuildType,
    /// Delete the build directory before configuring
    clean: bool,
    /// Number of parallel jobs
    jobs: Option<usize>,
    /// Verbose output
    verbose: bool,
}

impl CMakeBuild {
    /// Create a new build descriptor
    pub fn new(build_dir: PathBuf, build_type: BuildType) -> Self {
        Self {
            build_dir,
            build_type,
            clean: false,
            jobs: None,
            verbose: false,
        }
    }

    /// Request a clean build
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Set the number of parallel jobs
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Render the build-step argument list
    pub(crate) fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "--build".to_string(),
            self.build_dir.display().to_string(),
            "--config".to_string(),
            self.build_type.to_string(),
        ];

        args.push("-j".to_string());
        if let Some(jobs) = self.jobs {
            args.push(jobs.to_string());
        }

        args
    }

    /// Run the CMake build step
    pub fn run(&self) -> Result<()> {
        let cmake = find_cmake()?;

        let mut cmd = Command::new(&cmake);
        cmd.args(self.build_args());

        if self.verbose {
            eprintln!("Running: {:?}", cmd);
        }

        let status = cmd
            .stdin(Stdio::null())
            .status()
            .context("Failed to run CMake build")?;

        if !status.success() {
            return Err(CcdevError::tool_failure("CMake build", exit_message(status)).into());
        }

        Ok(())
    }
}

/// Composed configure-and-build entry used by the build, run and test
/// commands
///
/// `reconfigure` is a caller-supplied hint: the build command always
/// reconfigures, while run and test skip the configure step and rely on an
/// existing CMake cache. A clean build deletes that cache, so it always
/// reconfigures regardless of the hint.
pub fn run_build(config: &CMakeConfig, build: &CMakeBuild, reconfigure: bool) -> Result<()> {
    if build.clean {
        remove_build_dir(&build.build_dir)?;
    }

    if reconfigure || build.clean {
        config.configure()?;
    }

    build.run()
}

/// Delete the build output directory; a missing directory is a no-op
fn remove_build_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove build directory {}", dir.display()))?;
    }
    Ok(())
}

/// Find the CMake executable
fn find_cmake() -> Result<PathBuf> {
    which::which("cmake").map_err(|_| {
        CcdevError::missing_tool("cmake", "configuring and building the project", hints::cmake())
            .into()
    })
}

/// Human-readable description of a child process exit
pub(crate) fn exit_message(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_type_display() {
        assert_eq!(BuildType::Debug.to_string(), "Debug");
        assert_eq!(BuildType::Release.to_string(), "Release");
        assert_eq!(BuildType::RelWithDebInfo.to_string(), "RelWithDebInfo");
        assert_eq!(BuildType::MinSizeRel.to_string(), "MinSizeRel");
    }

    #[test]
    fn test_build_type_default_is_debug() {
        assert_eq!(BuildType::default(), BuildType::Debug);
    }

    #[test]
    fn test_configure_args_policy_flags() {
        let config = CMakeConfig::new(PathBuf::from("/proj"), PathBuf::from("/proj/build"))
            .build_type(BuildType::Release)
            .generator("Ninja")
            .toolchain_file(PathBuf::from("/tc/vcpkg.cmake"))
            .target_triplet("x64-windows")
            .cxx_flag("-D_MD")
            .export_compile_commands(true)
            .no_warn_unused_cli(true);

        let args = config.configure_args();
        assert!(args.contains(&"--no-warn-unused-cli".to_string()));
        assert!(args.contains(&"-DCMAKE_EXPORT_COMPILE_COMMANDS=ON".to_string()));
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Release".to_string()));
        assert!(args.contains(&"-DCMAKE_TOOLCHAIN_FILE=/tc/vcpkg.cmake".to_string()));
        assert!(args.contains(&"-DVCPKG_TARGET_TRIPLET=x64-windows".to_string()));
        assert!(args.contains(&"-DCMAKE_CXX_FLAGS=-D_MD".to_string()));

        let gen_pos = args.iter().position(|a| a == "-G").unwrap();
        assert_eq!(args[gen_pos + 1], "Ninja");
    }

    #[test]
    fn test_configure_args_source_build_pair() {
        let config = CMakeConfig::new(PathBuf::from("/proj"), PathBuf::from("/proj/build"));
        let args = config.configure_args();
        assert_eq!(args[0], "-S");
        assert_eq!(args[1], "/proj");
        assert_eq!(args[2], "-B");
        assert_eq!(args[3], "/proj/build");
    }

    #[test]
    fn test_build_args() {
        let build = CMakeBuild::new(PathBuf::from("/proj/build"), BuildType::Debug).jobs(Some(8));
        let args = build.build_args();
        assert_eq!(args[0], "--build");
        assert_eq!(args[1], "/proj/build");
        assert!(args.contains(&"--config".to_string()));
        assert!(args.contains(&"Debug".to_string()));
        assert!(args.contains(&"8".to_string()));
    }

    #[test]
    fn test_remove_build_dir_missing_is_noop() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("build");
        assert!(remove_build_dir(&missing).is_ok());
    }

    #[test]
    fn test_remove_build_dir_deletes_contents() {
        let temp = tempfile::tempdir().unwrap();
        let build_dir = temp.path().join("build");
        std::fs::create_dir_all(build_dir.join("CMakeFiles")).unwrap();
        std::fs::write(build_dir.join("CMakeCache.txt"), "cache").unwrap();

        remove_build_dir(&build_dir).unwrap();
        assert!(!build_dir.exists());
    }
}
