//! Shared operation context.
//!
//! Groups the configuration and the two injected seams so every operation
//! takes a single argument besides its path.

use crate::alternatives::Alternatives;
use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::privilege;
use crate::reporter::Reporter;
use crate::tools::ToolRunner;
use std::fmt;

/// Groups common state used by the theme operations.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Locations and names.
    pub config: &'a ThemeConfig,
    /// External program runner.
    pub runner: &'a dyn ToolRunner,
    /// Progress output.
    pub reporter: &'a dyn Reporter,
    /// Whether system-wide changes are allowed.
    pub elevated: bool,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("elevated", &self.elevated)
            .finish_non_exhaustive()
    }
}

impl<'a> Context<'a> {
    /// Context for the current process, with privilege probed from the OS.
    pub fn new(
        config: &'a ThemeConfig,
        runner: &'a dyn ToolRunner,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            config,
            runner,
            reporter,
            elevated: privilege::is_elevated(),
        }
    }

    /// Override the probed privilege.
    #[must_use]
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    pub(crate) fn require_elevated(&self) -> Result<(), ThemeError> {
        if self.elevated {
            Ok(())
        } else {
            Err(ThemeError::PrivilegeRequired)
        }
    }

    pub(crate) fn alternatives(&self) -> Alternatives<'a> {
        Alternatives::new(self.runner, self.config)
    }
}
