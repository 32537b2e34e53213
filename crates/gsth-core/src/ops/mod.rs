//! The four theme operations.
//!
//! Each one is a short, fixed sequence of fallible steps. The first failing
//! step ends the operation; earlier filesystem changes are left in place.

pub mod compile;
pub mod context;
pub mod init;
pub mod install;
pub mod uninstall;

pub use compile::{CompileSummary, compile_project};
pub use context::Context;
pub use init::{InitSummary, init_project};
pub use install::install_archive;
pub use uninstall::uninstall_archive;

use crate::error::ThemeError;
use std::path::Path;

/// Delete `path` if it is a regular file.
fn remove_stale(path: &Path) -> Result<(), ThemeError> {
    if path.is_file() {
        tracing::debug!("Removing {}", path.display());
        std::fs::remove_file(path)
            .map_err(ThemeError::io(format!("Failed to remove {}", path.display())))?;
    }
    Ok(())
}
