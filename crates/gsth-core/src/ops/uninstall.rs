//! `--uninstall`: drop an installed archive from the alternative group and
//! delete it.

use super::{Context, remove_stale};
use crate::error::ThemeError;
use crate::tools::require;
use std::path::Path;

/// Remove `path` from the alternatives and delete the file.
///
/// `path` is matched exactly as given against the registered candidates, so
/// it must be the installed location, not the archive it was copied from.
///
/// # Errors
///
/// Returns [`ThemeError::PrivilegeRequired`], [`ThemeError::MissingTool`],
/// [`ThemeError::NotRegistered`] when `path` is not a candidate,
/// [`ThemeError::ToolFailed`] if removal fails, or [`ThemeError::Io`].
pub fn uninstall_archive(ctx: &Context<'_>, path: &Path) -> Result<(), ThemeError> {
    ctx.require_elevated()?;
    require(ctx.runner, &ctx.config.tools.alternatives, None)?;

    ctx.reporter.section("Uninstalling theme ...");

    let alternatives = ctx.alternatives();
    let state = alternatives.query()?;
    if !state.is_registered(path) {
        return Err(ThemeError::NotRegistered {
            path: path.to_path_buf(),
            query: ctx.config.query_command(),
        });
    }
    if state.is_active(path) {
        tracing::debug!("{} is the active alternative", path.display());
    }

    ctx.reporter.step("Uninstalling alternative ...");
    alternatives.remove(path)?;

    ctx.reporter.step("Deleting gresource file ...");
    remove_stale(path)?;

    ctx.reporter.success("Theme is uninstalled.");
    ctx.reporter.success("For more info execute this command:");
    ctx.reporter.detail(&ctx.config.query_command());
    Ok(())
}
