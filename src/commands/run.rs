//! Run command implementation
//!
//! Builds the project and launches the produced application binary with the
//! dependency shared-library directory scoped onto PATH.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::build::cmake::{self, exit_message, CMakeBuild};
use crate::build::planner::ConfigPlanner;
use crate::config::ProjectConfig;
use crate::error::CcdevError;
use crate::utils::env_scope::EnvScope;
use crate::utils::paths::{self, ProjectLayout};

/// Run the application
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Delete the build directory and rebuild from scratch
    #[arg(short = 'r', long)]
    pub rebuild: bool,

    /// Arguments to pass to the application
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let config = ProjectConfig::load()?;
        let layout = ProjectLayout::from_current_dir()?;
        let build_type = config.build.build_type;

        let cmake_config = ConfigPlanner::new(&config, &layout)
            .verbose(verbose)
            .plan()?;
        let build = CMakeBuild::new(layout.build_dir.clone(), build_type)
            .clean(self.rebuild)
            .verbose(verbose);

        // Reconfigure only on a clean build; run relies on the existing cache
        cmake::run_build(&cmake_config, &build, false)?;

        let executable = self.find_executable(&config, &layout)?;

        let triplet = config.require_platform()?.triplet();
        let dll_dir = paths::dependency_bin_dir(&paths::tool_home()?, &triplet, build_type);
        if verbose {
            eprintln!("Prepending to PATH: {}", dll_dir.display());
        }
        let _path_scope = EnvScope::prepend_path(dll_dir)?;

        if verbose {
            eprintln!("Running: {} {}", executable.display(), self.args.join(" "));
        }

        let status = Command::new(&executable)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute {}", executable.display()))?;

        if !status.success() {
            return Err(CcdevError::tool_failure(
                config.project.name.clone(),
                exit_message(status),
            )
            .into());
        }

        Ok(())
    }

    /// Locate the produced application binary
    fn find_executable(&self, config: &ProjectConfig, layout: &ProjectLayout) -> Result<PathBuf> {
        let file_name = format!("{}{}", config.project.name, std::env::consts::EXE_SUFFIX);
        let candidates = [
            layout.bin_dir.join(&file_name),
            layout.build_dir.join(&file_name),
        ];

        for path in &candidates {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        bail!(
            "Executable not found after build. Searched:\n{}",
            candidates
                .iter()
                .map(|p| format!("  - {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}
