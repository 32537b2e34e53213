//! `--install`: copy an archive into the system theme directory and make it
//! the active `gdm3-theme.gresource` alternative.

use super::{Context, remove_stale};
use crate::error::ThemeError;
use crate::tools::require;
use std::fs;
use std::path::{Path, PathBuf};

/// Install `archive` system-wide and activate it.
///
/// Registration is skipped when the destination is already a candidate, but
/// activation always runs, so installing the same archive twice is harmless.
///
/// A missing `archive` only produces a warning here; the copy step is what
/// fails in that case.
///
/// Returns the installed path.
///
/// # Errors
///
/// Returns [`ThemeError::PrivilegeRequired`], [`ThemeError::MissingTool`],
/// [`ThemeError::InvalidFileName`] for a path without a file name,
/// [`ThemeError::ToolFailed`] if registration or activation fails, or
/// [`ThemeError::Io`].
pub fn install_archive(ctx: &Context<'_>, archive: &Path) -> Result<PathBuf, ThemeError> {
    ctx.require_elevated()?;
    require(ctx.runner, &ctx.config.tools.alternatives, None)?;

    let file_name = archive
        .file_name()
        .ok_or_else(|| ThemeError::InvalidFileName {
            path: archive.to_path_buf(),
        })?;
    let source = archive
        .canonicalize()
        .or_else(|_| std::path::absolute(archive))
        .unwrap_or_else(|_| archive.to_path_buf());

    if !source.is_file() {
        ctx.reporter.warning("The gresource file is not found:");
        ctx.reporter.detail(&source.display().to_string());
    }

    ctx.reporter.section("Installing compiled theme ...");

    let system_dir = &ctx.config.system_theme_dir;
    fs::create_dir_all(system_dir)
        .map_err(ThemeError::io(format!("Failed to create {}", system_dir.display())))?;
    let destination = ctx.config.system_path_for(file_name);

    if is_same_file(&source, &destination) {
        tracing::debug!("{} is already in place", destination.display());
    } else {
        remove_stale(&destination)?;
        ctx.reporter.step("Copying gresource file ...");
        fs::copy(&source, &destination).map_err(ThemeError::io(format!(
            "Failed to copy {} to {}",
            source.display(),
            destination.display()
        )))?;
    }

    let alternatives = ctx.alternatives();
    if alternatives.query()?.is_registered(&destination) {
        tracing::debug!("{} is already registered", destination.display());
    } else {
        ctx.reporter.step("Installing alternative ...");
        alternatives.register(&destination)?;
    }

    ctx.reporter.step("Applying alternative ...");
    alternatives.set(&destination)?;

    ctx.reporter.success("Theme is installed!");
    Ok(destination)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
