//! Error types and helpers for user-friendly error messages
//!
//! This module provides custom error types with actionable hints to help
//! users quickly resolve common issues.

use thiserror::Error;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum CcdevError {
    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Tool/executable not found or misconfigured
    #[error("Missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// Non-zero exit from an external step (configure, build, run, test)
    #[error("{step} failed: {message}")]
    ToolFailure { step: String, message: String },

    /// Test discovery failure
    #[error("Test discovery error: {message}")]
    Discovery {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Environment variable scope failure
    #[error("Environment scope error for '{variable}': {message}")]
    EnvScope { variable: String, message: String },
}

impl CcdevError {
    /// Create a configuration error with a hint
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create an external-step failure error
    pub fn tool_failure(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailure {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Create a test discovery error
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a test discovery error with a hint
    pub fn discovery_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Create a test discovery error wrapping an underlying cause
    pub fn discovery_with_source(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Discovery {
            message: message.into(),
            source: Some(source),
            hint: None,
        }
    }

    /// Create an environment scope error
    pub fn env_scope(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EnvScope {
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            CcdevError::Config { hint, .. } | CcdevError::Discovery { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            CcdevError::MissingTool { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            CcdevError::ToolFailure { .. } | CcdevError::EnvScope { .. } => {}
        }

        eprintln!();
    }
}

/// Report an error to stderr; the caller decides process termination
pub fn report(err: &anyhow::Error) {
    use console::style;

    if let Some(known) = err.downcast_ref::<CcdevError>() {
        known.display_with_hints();
    } else {
        eprintln!("\n{} {:#}\n", style("ERROR:").red().bold(), err);
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for missing CMake
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake\n\
         • Windows: winget install Kitware.CMake"
    }

    /// Get hint for CCDEV.toml not found
    pub fn config_not_found() -> &'static str {
        "Could not find CCDEV.toml in the current directory.\n\
         \n\
         ccdev must be run from the project root. A minimal CCDEV.toml:\n\
         \n\
         [project]\n\
         name = \"my-app\"\n\
         \n\
         [build]\n\
         toolchain = \"path/to/toolchain.cmake\"\n\
         platform = \"x64\""
    }

    /// Get hint for incomplete [build] configuration
    pub fn build_config() -> &'static str {
        "The [build] section of CCDEV.toml must name the CMake toolchain file\n\
         and the target platform:\n\
         \n\
         [build]\n\
         toolchain = \"path/to/toolchain.cmake\"\n\
         platform = \"x64\"        # or \"x86\"\n\
         build_type = \"Debug\"    # optional, defaults to Debug\n\
         generator = \"Ninja\"     # optional, defaults to Ninja"
    }

    /// Get hint for an empty or missing test output directory
    pub fn no_test_binaries() -> &'static str {
        "No compiled test binaries were found under bin/test.\n\
         \n\
         Build the project first:\n\
         • Run: ccdev build\n\
         \n\
         Test executables are expected to be named <suite>-test, e.g. the\n\
         MyCool suite builds bin/test/my-cool-test."
    }
}
