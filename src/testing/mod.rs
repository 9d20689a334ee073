//! Test discovery, selection, and execution
//!
//! Compiled GoogleTest binaries live under `bin/test`, one per suite, named
//! after the suite via the hyphenation convention in `codec`.
//!
//! - `codec` - suite-name to artifact-name mapping
//! - `discovery` - filesystem walk and per-binary test enumeration
//! - `tree` - enumeration output parsing and rendering
//! - `runner` - dotted-identifier resolution and filtered execution

pub mod codec;
pub mod discovery;
pub mod runner;
pub mod tree;

pub use discovery::{TestBinaryRecord, TestDiscovery};
pub use runner::{TestRunner, TestSelection};
pub use tree::TestTree;
