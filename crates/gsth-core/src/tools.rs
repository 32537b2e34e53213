//! External program execution.
//!
//! Every operation reaches the outside world through [`ToolRunner`]: it
//! resolves program names on `PATH` and runs them to completion, capturing
//! both output streams. [`SystemRunner`] is the real implementation; the unit
//! tests substitute a scripted runner.

use crate::error::ThemeError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved through `PATH`.
    pub program: String,
    /// Arguments, passed through as raw OS strings.
    pub args: Vec<OsString>,
    /// Working directory, or the current one when `None`.
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Run in `dir` instead of the current directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for Invocation {
    /// Shell-like rendering used in logs and manual-retry hints.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a finished invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Whether the program exited with status zero.
    pub success: bool,
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Raw standard error.
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Both streams decoded lossily, stdout first. Used for error reports.
    pub fn combined_text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&self.stderr);
        if !stderr.trim().is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }
        text
    }
}

/// Resolves and runs external programs.
pub trait ToolRunner {
    /// Full path of `program` if it can be found.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run to completion. A non-zero exit is reported through
    /// [`ToolOutput::success`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Spawn`] if the process cannot be started.
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ThemeError>;
}

/// Runs programs with [`std::process::Command`], blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ThemeError> {
        tracing::debug!(
            cwd = ?invocation.cwd,
            "Running {invocation}"
        );

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| ThemeError::Spawn {
            tool: invocation.program.clone(),
            source,
        })?;

        if !output.status.success() {
            tracing::debug!("{} exited with {}", invocation.program, output.status);
        }

        Ok(ToolOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Fail with [`ThemeError::MissingTool`] unless `program` resolves.
///
/// # Errors
///
/// Returns [`ThemeError::MissingTool`] carrying `hint` when the lookup fails.
pub fn require(
    runner: &dyn ToolRunner,
    program: &str,
    hint: Option<&'static str>,
) -> Result<PathBuf, ThemeError> {
    match runner.locate(program) {
        Some(path) => {
            tracing::trace!("Found {program} at {}", path.display());
            Ok(path)
        }
        None => Err(ThemeError::MissingTool {
            tool: program.to_string(),
            hint,
        }),
    }
}
