//! Build command implementation

use anyhow::Result;
use clap::Args;

use crate::build::cmake::{self, BuildType, CMakeBuild};
use crate::build::planner::ConfigPlanner;
use crate::config::ProjectConfig;
use crate::utils::paths::ProjectLayout;
use crate::utils::terminal::print_success;

/// Compile the application
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Delete the build directory and rebuild from scratch
    #[arg(short = 'r', long)]
    pub rebuild: bool,

    /// Build type
    #[arg(short = 't', long = "build-type", value_enum)]
    pub build_type: Option<BuildType>,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let config = ProjectConfig::load()?;
        let layout = ProjectLayout::from_current_dir()?;
        let build_type = self.build_type.unwrap_or(config.build.build_type);

        let cmake_config = ConfigPlanner::new(&config, &layout)
            .build_type(build_type)
            .verbose(verbose)
            .plan()?;
        let build = CMakeBuild::new(layout.build_dir.clone(), build_type)
            .clean(self.rebuild)
            .jobs(self.jobs)
            .verbose(verbose);

        // The build command always reconfigures
        cmake::run_build(&cmake_config, &build, true)?;

        print_success("Build successful!");
        Ok(())
    }
}
