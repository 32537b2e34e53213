//! Error type shared by all operations.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an operation.
///
/// `Display` is the headline printed after the `! ` marker; [`ThemeError::details`]
/// supplies the indented lines that follow it.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The archive `init` extracts from is absent.
    #[error("The source template does not exist or is not accessible:")]
    MissingSource {
        /// Configured source archive.
        path: PathBuf,
    },

    /// A required external program is not on `PATH`.
    #[error("The \"{tool}\" command is not found.")]
    MissingTool {
        /// Program name.
        tool: String,
        /// Where to get it, if known.
        hint: Option<&'static str>,
    },

    /// `compile` was pointed at a folder that does not exist.
    #[error("The folder of project is not found:")]
    MissingProjectFolder {
        /// Absolute form of the requested folder.
        path: PathBuf,
    },

    /// Neither effective root nor running under sudo.
    #[error("Root is required for this action.")]
    PrivilegeRequired,

    /// An external program exited with a non-zero status.
    #[error("{message}")]
    ToolFailed {
        /// Headline for the failed step.
        message: &'static str,
        /// Captured program output.
        output: String,
        /// Equivalent command the user can rerun by hand.
        retry: Option<String>,
    },

    /// An external program could not be started at all.
    #[error("Failed to run \"{tool}\": {source}")]
    Spawn {
        /// Program name.
        tool: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The path is not a registered candidate of the alternative group.
    #[error("The theme is not installed as alternative:")]
    NotRegistered {
        /// Path that was looked up.
        path: PathBuf,
        /// Query command for manual inspection.
        query: String,
    },

    /// A path has no usable file name: none at all, or no UTF-8 form to put
    /// in the manifest.
    #[error("The file name is not usable:")]
    InvalidFileName {
        /// Offending file.
        path: PathBuf,
    },

    /// Filesystem failure.
    #[error("{context}: {source}")]
    Io {
        /// The step that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ThemeError {
    /// Wrap an I/O error with a short description of the step that failed.
    ///
    /// Meant for `map_err(ThemeError::io("..."))`.
    pub fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| Self::Io { context, source }
    }

    /// Follow-up lines shown under the headline, without indentation.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::MissingSource { path }
            | Self::MissingProjectFolder { path }
            | Self::InvalidFileName { path } => vec![path.display().to_string()],
            Self::MissingTool { hint, .. } => hint.iter().map(|h| (*h).to_string()).collect(),
            Self::ToolFailed { output, retry, .. } => {
                let mut lines: Vec<String> = output
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(str::to_string)
                    .collect();
                if let Some(cmd) = retry {
                    lines.push("For more info execute this command:".to_string());
                    lines.push(cmd.clone());
                }
                lines
            }
            Self::NotRegistered { path, query } => vec![
                path.display().to_string(),
                "For more info execute this command:".to_string(),
                query.clone(),
            ],
            Self::PrivilegeRequired | Self::Spawn { .. } | Self::Io { .. } => Vec::new(),
        }
    }

    /// Process exit status for this failure, following `sysexits.h`.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::PrivilegeRequired => 77,
            Self::MissingTool { .. } => 69,
            Self::MissingSource { .. } | Self::MissingProjectFolder { .. } => 66,
            Self::ToolFailed { .. } | Self::Spawn { .. } => 70,
            Self::InvalidFileName { .. } => 65,
            Self::Io { .. } => 74,
            Self::NotRegistered { .. } => 1,
        }
    }
}
