//! Running scripts through `osascript`.
//!
//! One call is one blocking subprocess. There is no retry and no timeout;
//! a failure is reported as soon as the process exits.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

pub const DEFAULT_OSASCRIPT: &str = "osascript";

/// Raw result of one script invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ScriptOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(1),
        }
    }

    /// Failed when the exit code is non-zero or anything was written to stderr.
    pub fn is_failure(&self) -> bool {
        self.code != Some(0) || !self.stderr.is_empty()
    }
}

/// Executes one AppleScript source text and hands back its raw output.
pub trait ScriptExecutor {
    fn execute(&self, script: &str) -> Result<ScriptOutput>;
}

impl<T: ScriptExecutor + ?Sized> ScriptExecutor for &T {
    fn execute(&self, script: &str) -> Result<ScriptOutput> {
        (**self).execute(script)
    }
}

impl<T: ScriptExecutor + ?Sized> ScriptExecutor for Box<T> {
    fn execute(&self, script: &str) -> Result<ScriptOutput> {
        (**self).execute(script)
    }
}

/// Production executor: `osascript -e <script>`.
#[derive(Debug, Clone)]
pub struct Osascript {
    program: PathBuf,
}

impl Osascript {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new(DEFAULT_OSASCRIPT)
    }
}

impl ScriptExecutor for Osascript {
    fn execute(&self, script: &str) -> Result<ScriptOutput> {
        tracing::trace!(script, "running applescript");
        let output = Command::new(&self.program)
            .arg("-e")
            .arg(script)
            .output()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;

        let result = ScriptOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        };
        tracing::debug!(
            program = %self.program.display(),
            script_len = script.len(),
            code = ?result.code,
            "osascript finished"
        );
        Ok(result)
    }
}

/// Run `script` and return its trimmed stdout, or the classified failure.
pub fn run<E: ScriptExecutor + ?Sized>(executor: &E, script: &str) -> Result<String> {
    let output = executor.execute(script)?;
    if output.is_failure() {
        return Err(classify_failure(&output));
    }
    Ok(output.stdout.trim().to_string())
}

/// Map osascript diagnostics onto stable errors.
pub fn classify_failure(output: &ScriptOutput) -> Error {
    let message = output.stderr.trim();
    if message.contains("get to do id") {
        return Error::TodoNotFound;
    }
    if message.contains("get project id")
        || message.contains("get project whose")
        || message.contains("get project 1 whose")
    {
        return Error::ProjectNotFound;
    }
    if message.is_empty() {
        return Error::AppleScript(match output.code {
            Some(code) => format!("osascript exited with status {code}"),
            None => "osascript terminated by signal".to_string(),
        });
    }
    tracing::debug!(stderr = message, "unclassified applescript failure");
    Error::AppleScript(message.to_string())
}
