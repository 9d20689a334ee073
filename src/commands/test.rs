//! Test command implementation
//!
//! With no argument, enumerates every compiled test suite and case as a
//! tree. With a suite or suite.case identifier, rebuilds the project and
//! runs the matching tests.

use anyhow::Result;
use clap::Args;

use crate::build::cmake::{self, CMakeBuild};
use crate::build::planner::ConfigPlanner;
use crate::config::ProjectConfig;
use crate::testing::{TestDiscovery, TestRunner, TestSelection, TestTree};
use crate::utils::env_scope::EnvScope;
use crate::utils::paths::{self, ProjectLayout};
use crate::utils::terminal::{create_spinner, print_version_banner};

/// Build and run GoogleTest unit tests
#[derive(Args, Debug)]
pub struct TestCommand {
    /// Suite or Suite.Case identifier; omit to list all tests
    pub name: Option<String>,

    /// Delete the build directory and rebuild from scratch
    #[arg(short = 'r', long)]
    pub rebuild: bool,

    /// Write a GoogleTest XML report into the build directory
    #[arg(long)]
    pub report: bool,
}

impl TestCommand {
    /// Execute the test command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let config = ProjectConfig::load()?;
        let layout = ProjectLayout::from_current_dir()?;

        match &self.name {
            None => self.show_tests(&config, &layout, verbose),
            Some(name) => self.run_selected(name, &config, &layout, verbose),
        }
    }

    /// Enumerate every discovered suite and case
    ///
    /// Listing runs each test binary with the self-listing flag, so the
    /// dependency search path must be scoped onto PATH here too.
    fn show_tests(
        &self,
        config: &ProjectConfig,
        layout: &ProjectLayout,
        verbose: bool,
    ) -> Result<()> {
        print_version_banner();
        println!();

        let triplet = config.require_platform()?.triplet();
        let dll_dir =
            paths::dependency_bin_dir(&paths::tool_home()?, &triplet, config.build.build_type);
        let _path_scope = EnvScope::prepend_path(dll_dir)?;

        let discovery = TestDiscovery::new(layout.test_bin_dir.clone());
        let records = discovery.list_all()?;
        if verbose {
            for record in &records {
                eprintln!("Discovered {}", record.artifact);
            }
        }

        let spinner = create_spinner("Enumerating tests...");
        let enumerated: Result<Vec<TestTree>> = records
            .iter()
            .map(|record| {
                spinner.set_message(format!("Enumerating {} tests...", record.suite));
                discovery
                    .list_cases(record)
                    .map(|raw| TestTree::parse(&raw))
            })
            .collect();
        spinner.finish_and_clear();
        let trees = enumerated?;

        if trees.iter().all(|t| t.is_empty()) {
            println!("No tests discovered.");
            return Ok(());
        }

        for tree in &trees {
            tree.print();
        }
        println!();

        Ok(())
    }

    /// Resolve the identifier, rebuild, and run the matching tests
    fn run_selected(
        &self,
        name: &str,
        config: &ProjectConfig,
        layout: &ProjectLayout,
        verbose: bool,
    ) -> Result<()> {
        let selection = TestSelection::resolve(name);
        let build_type = config.build.build_type;

        let cmake_config = ConfigPlanner::new(config, layout).verbose(verbose).plan()?;
        let build = CMakeBuild::new(layout.build_dir.clone(), build_type)
            .clean(self.rebuild)
            .verbose(verbose);

        // Reconfigure only on a clean build; test relies on the existing cache
        cmake::run_build(&cmake_config, &build, false)?;

        let triplet = config.require_platform()?.triplet();
        TestRunner::new(layout, triplet, build_type)
            .verbose(verbose)
            .run(&selection, self.report)
    }
}
