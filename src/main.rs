//! CCDEV CLI - configure, build, run and test C++ projects
//!
//! ccdev drives a CMake-based C++ project through its development loop:
//! the configure and build phases, launching the produced application, and
//! discovering and running GoogleTest unit tests.
//!
//! ## Architecture
//!
//! ```text
//! Rust CLI → build/ modules → CMake (configure + build)
//!          → testing/ modules → GoogleTest binaries (list + run)
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod testing;
mod utils;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        error::report(&err);
        std::process::exit(1);
    }
}
