//! Test selection and filtered execution
//!
//! A user-typed identifier is either a bare suite name ("MyCool") or a
//! dotted suite.case pair ("MyCool.ParsesInput"). The suite part locates
//! the owning binary through the artifact naming convention; the identifier
//! becomes a GoogleTest filter expression.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::build::cmake::{exit_message, BuildType};
use crate::error::CcdevError;
use crate::testing::codec::{artifact_base_name, TEST_SUFFIX};
use crate::utils::env_scope::EnvScope;
use crate::utils::paths::{self, ProjectLayout};

/// Flag selecting a subset of a binary's compiled test cases
const FILTER_FLAG: &str = "--gtest_filter";

/// Flag writing an XML report of the run
const XML_OUTPUT_FLAG: &str = "--gtest_output";

/// A resolved test identifier: the owning artifact and a filter pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSelection {
    /// Artifact file stem of the owning binary (e.g. "my-cool-test")
    pub artifact: String,
    /// GoogleTest filter pattern ("MyCool*" or "MyCool.ParsesInput")
    pub pattern: String,
}

impl TestSelection {
    /// Resolve a bare or dotted test identifier
    ///
    /// The portion before the first "." (or the whole string) names the
    /// suite and is mapped to the artifact base name. A bare suite selects
    /// all of its cases with a trailing wildcard; a dotted identifier is
    /// used verbatim as the filter.
    pub fn resolve(name: &str) -> Self {
        match name.split_once('.') {
            Some((suite, _)) => Self {
                artifact: format!("{}{}", artifact_base_name(suite), TEST_SUFFIX),
                pattern: name.to_string(),
            },
            None => Self {
                artifact: format!("{}{}", artifact_base_name(name), TEST_SUFFIX),
                pattern: format!("{}*", name),
            },
        }
    }

    /// On-disk file name of the owning binary
    pub fn artifact_file_name(&self) -> String {
        format!("{}{}", self.artifact, std::env::consts::EXE_SUFFIX)
    }
}

/// Executes a resolved test selection against its compiled binary
pub struct TestRunner<'a> {
    layout: &'a ProjectLayout,
    triplet: String,
    build_type: BuildType,
    verbose: bool,
}

impl<'a> TestRunner<'a> {
    pub fn new(layout: &'a ProjectLayout, triplet: String, build_type: BuildType) -> Self {
        Self {
            layout,
            triplet,
            build_type,
            verbose: false,
        }
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the selected tests, streaming their output
    ///
    /// The dependency shared-library directory is prepended to PATH for the
    /// duration of the run so the binary can resolve its runtime
    /// dependencies; the prior PATH is restored on every exit path. A
    /// non-zero exit from the test binary is a command failure: test
    /// failures are signal, not transient errors.
    pub fn run(&self, selection: &TestSelection, report: bool) -> Result<()> {
        let exe = self.layout.test_bin_dir.join(selection.artifact_file_name());
        if !exe.exists() {
            return Err(CcdevError::discovery(format!(
                "test binary not found: {}",
                exe.display()
            ))
            .into());
        }

        let dll_dir =
            paths::dependency_bin_dir(&paths::tool_home()?, &self.triplet, self.build_type);
        if self.verbose {
            eprintln!("Prepending to PATH: {}", dll_dir.display());
        }
        let _path_scope = EnvScope::prepend_path(dll_dir)?;

        let mut cmd = Command::new(&exe);
        cmd.arg(format!("{}={}", FILTER_FLAG, selection.pattern));

        if report {
            let xml = report_path(&self.layout.build_dir);
            cmd.arg(format!("{}=xml:{}", XML_OUTPUT_FLAG, xml.display()));
        }

        if self.verbose {
            eprintln!("Running: {:?}", cmd);
        }

        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to run test executable {}", exe.display()))?;

        if !status.success() {
            return Err(CcdevError::tool_failure(
                format!("Test {}", selection.pattern),
                exit_message(status),
            )
            .into());
        }

        Ok(())
    }
}

/// Timestamped XML report path inside the build directory
fn report_path(build_dir: &std::path::Path) -> PathBuf {
    let now = chrono::Local::now();
    let timestamp = now.format("%Y%m%d_%H%M%S_%6f");
    build_dir.join(format!(
        "tests_on_{}_result_{}.xml",
        std::env::consts::OS,
        timestamp
    ))
}
