//! Scoped environment variable overrides
//!
//! Launching built binaries requires a temporary, process-wide PATH override
//! so they can resolve their shared-library dependencies. `EnvScope` records
//! the prior state of a variable, applies the override, and restores the
//! prior state exactly on drop, including when the wrapped operation fails.
//!
//! Acquisition is serialized per variable name: two scopes for the same
//! variable cannot be live at once, so one operation's restore can never
//! clobber another's override.

use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

use anyhow::Result;

use crate::error::CcdevError;

static LOCKS: OnceLock<Mutex<HashMap<String, &'static Mutex<()>>>> = OnceLock::new();

/// One mutex per variable name, allocated on first use and kept for the
/// process lifetime so guards can borrow it as 'static.
fn variable_lock(name: &str) -> &'static Mutex<()> {
    let registry = LOCKS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut map = registry.lock().unwrap_or_else(|e| e.into_inner());
    *map.entry(name.to_string())
        .or_insert_with(|| Box::leak(Box::new(Mutex::new(()))))
}

/// A live environment variable override, restored on drop
#[derive(Debug)]
pub struct EnvScope {
    name: String,
    previous: Option<OsString>,
    _serial: MutexGuard<'static, ()>,
}

impl EnvScope {
    /// Override `name` with `value` until the returned scope is dropped
    pub fn acquire(name: &str, value: impl AsRef<OsStr>) -> Result<Self> {
        let serial = variable_lock(name)
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let previous = env::var_os(name);
        env::set_var(name, value);
        Ok(Self {
            name: name.to_string(),
            previous,
            _serial: serial,
        })
    }

    /// Override PATH with `dir` prepended to the current search path
    pub fn prepend_path(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let serial = variable_lock("PATH")
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let previous = env::var_os("PATH");

        let mut parts = vec![dir];
        if let Some(current) = &previous {
            parts.extend(env::split_paths(current));
        }
        let joined = env::join_paths(parts)
            .map_err(|e| CcdevError::env_scope("PATH", e.to_string()))?;
        env::set_var("PATH", &joined);

        Ok(Self {
            name: "PATH".to_string(),
            previous,
            _serial: serial,
        })
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Runs while the per-variable lock is still held; the variable was
        // absent before acquisition iff previous is None.
        match &self.previous {
            Some(value) => env::set_var(&self.name, value),
            None => env::remove_var(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_restores_previous_value() {
        env::set_var("CCDEV_SCOPE_TEST", "before");
        {
            let _scope = EnvScope::acquire("CCDEV_SCOPE_TEST", "after").unwrap();
            assert_eq!(env::var("CCDEV_SCOPE_TEST").unwrap(), "after");
        }
        assert_eq!(env::var("CCDEV_SCOPE_TEST").unwrap(), "before");
        env::remove_var("CCDEV_SCOPE_TEST");
    }

    #[test]
    #[serial]
    fn test_restores_unset_state() {
        env::remove_var("CCDEV_SCOPE_UNSET");
        {
            let _scope = EnvScope::acquire("CCDEV_SCOPE_UNSET", "value").unwrap();
            assert_eq!(env::var("CCDEV_SCOPE_UNSET").unwrap(), "value");
        }
        assert!(env::var_os("CCDEV_SCOPE_UNSET").is_none());
    }

    #[test]
    #[serial]
    fn test_restores_empty_string() {
        env::set_var("CCDEV_SCOPE_EMPTY", "");
        {
            let _scope = EnvScope::acquire("CCDEV_SCOPE_EMPTY", "value").unwrap();
        }
        assert_eq!(env::var("CCDEV_SCOPE_EMPTY").unwrap(), "");
        env::remove_var("CCDEV_SCOPE_EMPTY");
    }

    #[test]
    #[serial]
    fn test_restores_on_error_path() {
        env::set_var("CCDEV_SCOPE_ERR", "original");

        let failing = || -> Result<()> {
            let _scope = EnvScope::acquire("CCDEV_SCOPE_ERR", "override")?;
            anyhow::bail!("nested operation failed");
        };
        assert!(failing().is_err());

        assert_eq!(env::var("CCDEV_SCOPE_ERR").unwrap(), "original");
        env::remove_var("CCDEV_SCOPE_ERR");
    }

    #[test]
    #[serial]
    fn test_prepend_path_puts_dir_first() {
        let original = env::var_os("PATH");
        {
            let _scope = EnvScope::prepend_path("/ccdev/fake/bin").unwrap();
            let path = env::var_os("PATH").unwrap();
            let first = env::split_paths(&path).next().unwrap();
            assert_eq!(first, PathBuf::from("/ccdev/fake/bin"));
        }
        assert_eq!(env::var_os("PATH"), original);
    }
}
