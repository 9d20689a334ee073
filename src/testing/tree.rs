//! GoogleTest enumeration output parsing and rendering
//!
//! `--gtest_list_tests` emits unindented suite header lines terminated by a
//! period, with two-space indented case lines beneath:
//!
//! ```text
//! Running main() from gtest_main.cc
//! MathTest.
//!   Add
//!   Subtract
//! ```
//!
//! Parsing is a single-pass line classifier whose only state is the current
//! suite. It never fails: malformed input simply yields fewer recorded
//! cases, since the tree is advisory display only.

use console::style;

/// One suite and its cases, in enumeration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuite {
    pub name: String,
    pub cases: Vec<String>,
}

/// Two-level suite/case tree parsed from enumeration output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestTree {
    pub suites: Vec<TestSuite>,
}

/// Classification of one enumeration output line
enum Line<'a> {
    /// Framework banner, discarded
    Informational,
    /// Unindented line containing a "." delimiter, trailing period stripped
    SuiteHeader(&'a str),
    /// Two-space indented line, indent stripped
    CaseEntry(&'a str),
    /// Anything else
    Ignored,
}

fn classify(line: &str) -> Line<'_> {
    if line.starts_with("Running") {
        return Line::Informational;
    }
    if let Some(case) = line.strip_prefix("  ") {
        return Line::CaseEntry(case);
    }
    if line.contains('.') {
        return Line::SuiteHeader(line.strip_suffix('.').unwrap_or(line));
    }
    Line::Ignored
}

impl TestTree {
    /// Parse raw enumeration text into a suite/case tree
    pub fn parse(raw: &str) -> Self {
        let mut tree = TestTree::default();
        let mut current: Option<TestSuite> = None;

        for line in raw.lines() {
            match classify(line) {
                Line::Informational | Line::Ignored => {}
                Line::SuiteHeader(name) => {
                    if let Some(done) = current.take() {
                        tree.suites.push(done);
                    }
                    current = Some(TestSuite {
                        name: name.to_string(),
                        cases: Vec::new(),
                    });
                }
                // A case line before any suite header has no owner; drop it
                Line::CaseEntry(case) => {
                    if let Some(suite) = current.as_mut() {
                        suite.cases.push(case.to_string());
                    }
                }
            }
        }

        if let Some(done) = current.take() {
            tree.suites.push(done);
        }

        tree
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    /// Print the tree with suite names highlighted
    pub fn print(&self) {
        for suite in &self.suites {
            println!("    ├── {}", style(&suite.name).red().bold());
            for case in &suite.cases {
                println!("    │    └── {}", case);
            }
        }
    }
}
