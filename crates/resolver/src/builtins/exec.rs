// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `exec(cmd)`, also registered as `eval` for `$(cmd)`.

use crate::error::{ResolutionError, SchemaError};
use crate::expr::CallContext;
use crate::registry::{no_state, ArgsView, ProcessedState, Resolver};
use crate::subprocess::{run_with_timeout, shell_command, SubprocessError};
use crate::value::ResolvedValue;
use async_trait::async_trait;

/// Runs the command through the configured shell and returns its stdout
/// with trailing whitespace trimmed.
///
/// The child sees the values resolved so far plus the overrides. Every
/// evaluation spawns a new process; results are never cached.
pub struct Exec;

#[async_trait]
impl Resolver for Exec {
    fn name(&self) -> &str {
        "exec"
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.positional()?;
        args.expect_count(1, Some(1))?;
        Ok(no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        let script = ctx.arg(0).await?.to_string();
        let scope = ctx.scope();
        let options = scope.options();
        let cmd = shell_command(
            &options.shell,
            &script,
            &scope.env_vars(),
            options.cwd.as_deref(),
        );

        tracing::debug!(key = scope.key().unwrap_or(""), "running exec command");
        let output = run_with_timeout(cmd, options.exec_timeout, "exec")
            .await
            .map_err(|e| match e {
                SubprocessError::TimedOut { timeout, .. } => {
                    ResolutionError::ExecTimedOut(timeout)
                }
                SubprocessError::Spawn { source, .. } => {
                    ResolutionError::ExecSpawn(source.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(ResolutionError::ExecFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(ResolvedValue::string(stdout.trim_end()))
    }

    fn dependencies(&self, _state: &ProcessedState) -> Option<Vec<String>> {
        None
    }
}
