//! Shared utilities

pub mod env_scope;
pub mod paths;
pub mod terminal;
