//! Test binary discovery
//!
//! Walks the project test output directory for compiled test executables
//! and enumerates their tests via the GoogleTest self-listing flag. Records
//! are rebuilt on every walk; the artifact set changes with every build.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use walkdir::WalkDir;

use crate::error::{hints, CcdevError};
use crate::testing::codec::{suite_display_name, TEST_SUFFIX};

/// Flag asking a GoogleTest binary to list its tests without running them
const LIST_TESTS_FLAG: &str = "--gtest_list_tests";

/// A compiled test binary discovered on disk
#[derive(Debug, Clone)]
pub struct TestBinaryRecord {
    /// Human-facing suite name (e.g. "MyCool")
    pub suite: String,
    /// Artifact file stem (e.g. "my-cool-test")
    pub artifact: String,
    /// Path to the executable
    pub path: PathBuf,
}

/// Test discovery over the project test output directory
pub struct TestDiscovery {
    test_bin_dir: PathBuf,
}

impl TestDiscovery {
    pub fn new(test_bin_dir: PathBuf) -> Self {
        Self { test_bin_dir }
    }

    /// Walk the test directory and record every test executable
    ///
    /// The walk is recursive and sorted by file name so the rendered tree is
    /// deterministic. A missing directory or an unreadable entry aborts
    /// discovery: both indicate a build inconsistency the user must see.
    pub fn list_all(&self) -> Result<Vec<TestBinaryRecord>> {
        if !self.test_bin_dir.exists() {
            return Err(CcdevError::discovery_with_hint(
                format!(
                    "test directory not found: {}",
                    self.test_bin_dir.display()
                ),
                hints::no_test_binaries(),
            )
            .into());
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(&self.test_bin_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                CcdevError::discovery_with_source("failed to walk test directory", e.into())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(record) = record_for(entry.path()) {
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Enumerate the tests compiled into one binary
    ///
    /// Invokes the binary with the self-listing flag and captures its stdout
    /// as raw text. A binary that cannot be executed, or that exits
    /// non-zero, aborts discovery.
    pub fn list_cases(&self, record: &TestBinaryRecord) -> Result<String> {
        let output = Command::new(&record.path)
            .arg(LIST_TESTS_FLAG)
            .output()
            .map_err(|e| {
                CcdevError::discovery_with_source(
                    format!("failed to execute {}", record.path.display()),
                    e.into(),
                )
            })?;

        if !output.status.success() {
            return Err(CcdevError::discovery(format!(
                "{} {} failed with {}",
                record.path.display(),
                LIST_TESTS_FLAG,
                crate::build::cmake::exit_message(output.status),
            ))
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Build a record for a path when it names an executable test artifact
fn record_for(path: &Path) -> Option<TestBinaryRecord> {
    let stem = path.file_stem()?.to_string_lossy();
    let base = stem.strip_suffix(TEST_SUFFIX)?;
    if base.is_empty() || !is_executable(path) {
        return None;
    }

    Some(TestBinaryRecord {
        suite: suite_display_name(base),
        artifact: stem.into_owned(),
        path: path.to_path_buf(),
    })
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(path) {
            return metadata.permissions().mode() & 0o111 != 0;
        }
        false
    }

    #[cfg(windows)]
    {
        path.extension().map(|ext| ext == "exe").unwrap_or(false)
    }
}
