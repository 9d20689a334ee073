//! Configure-step planning
//!
//! Merges the persisted project configuration with CLI overrides into the
//! descriptor handed to the CMake engine. Fixed policy lives here:
//! compile-commands export is always on (clangd and similar tooling read
//! it), unused-CLI-variable warnings are always suppressed, and Windows
//! targets get the dynamic C-runtime define appended.

use anyhow::Result;

use crate::build::cmake::{BuildType, CMakeConfig};
use crate::config::ProjectConfig;
use crate::utils::paths::ProjectLayout;

/// Compiler define forcing dynamic C-runtime linkage on Windows toolchains
const WINDOWS_CRT_DEFINE: &str = "-D_MD";

/// Assembles the configure descriptor for one command invocation
pub struct ConfigPlanner<'a> {
    config: &'a ProjectConfig,
    layout: &'a ProjectLayout,
    build_type: BuildType,
    verbose: bool,
}

impl<'a> ConfigPlanner<'a> {
    pub fn new(config: &'a ProjectConfig, layout: &'a ProjectLayout) -> Self {
        Self {
            config,
            layout,
            build_type: config.build.build_type,
            verbose: false,
        }
    }

    /// Override the persisted build type (the build command's -t flag)
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Assemble the configure descriptor
    ///
    /// A missing toolchain or platform in CCDEV.toml is a configuration
    /// error; no defaults are guessed for either.
    pub fn plan(&self) -> Result<CMakeConfig> {
        let toolchain = self.config.require_toolchain()?;
        let platform = self.config.require_platform()?;
        let triplet = platform.triplet();

        let toolchain_file = if toolchain.is_absolute() {
            toolchain.clone()
        } else {
            self.layout.root.join(toolchain)
        };

        let mut cmake = CMakeConfig::new(self.layout.root.clone(), self.layout.build_dir.clone())
            .build_type(self.build_type)
            .generator(self.config.generator())
            .toolchain_file(toolchain_file)
            .target_triplet(triplet.clone())
            .export_compile_commands(true)
            .no_warn_unused_cli(true)
            .verbose(self.verbose);

        if needs_crt_define(&triplet) {
            cmake = cmake.cxx_flag(WINDOWS_CRT_DEFINE);
        }

        Ok(cmake)
    }
}

/// Windows triplets link against the dynamic C runtime
fn needs_crt_define(triplet: &str) -> bool {
    triplet.ends_with("-windows")
}
