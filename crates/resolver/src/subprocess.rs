// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use indexmap::IndexMap;
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("{description} failed: {source}")]
    Spawn {
        description: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{description} timed out after {timeout:?}")]
    TimedOut {
        description: String,
        timeout: Duration,
    },
}

/// Run a subprocess command with a timeout.
///
/// Wraps `Command::output()` with `tokio::time::timeout`. The child is
/// killed when the timeout elapses.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, SubprocessError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(SubprocessError::Spawn {
            description: description.to_string(),
            source,
        }),
        Err(_elapsed) => Err(SubprocessError::TimedOut {
            description: description.to_string(),
            timeout,
        }),
    }
}

/// `shell -c script` with `vars` added to the inherited environment.
pub fn shell_command(
    shell: &str,
    script: &str,
    vars: &IndexMap<String, String>,
    cwd: Option<&Path>,
) -> Command {
    let mut cmd = Command::new(shell);
    cmd.arg("-c").arg(script).envs(vars);
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    cmd
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
