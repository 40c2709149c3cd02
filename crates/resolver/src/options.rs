// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Options for a resolution run.

use indexmap::IndexMap;
use std::path::PathBuf;
use std::time::Duration;

/// Per-run settings handed to [`crate::resolve`].
///
/// `new()` picks up the `ENVSPEC_*` environment defaults; every setter
/// consumes and returns the builder.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Values that take precedence over the document, like a process
    /// environment layered on top of a `.env` file.
    pub overrides: IndexMap<String, String>,
    pub exec_timeout: Duration,
    pub shell: String,
    /// Treat `ref()` to a key that is neither defined nor overridden as an error.
    pub strict_refs: bool,
    /// Stop at the first invalid item instead of collecting errors.
    pub fail_fast: bool,
    /// Working directory for `exec` commands; inherits when unset.
    pub cwd: Option<PathBuf>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self {
            overrides: IndexMap::new(),
            exec_timeout: crate::env::exec_timeout(),
            shell: crate::env::shell(),
            strict_refs: false,
            fail_fast: false,
            cwd: None,
        }
    }

    pub fn overrides<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn override_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Layer the current process environment over the document.
    pub fn process_env(self) -> Self {
        self.overrides(std::env::vars())
    }

    pub fn exec_timeout(mut self, timeout: Duration) -> Self {
        self.exec_timeout = timeout;
        self
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn strict_refs(mut self, strict: bool) -> Self {
        self.strict_refs = strict;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
