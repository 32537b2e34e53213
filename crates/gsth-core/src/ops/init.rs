//! `--init`: unpack the source archive into an editable project tree.

use super::Context;
use crate::error::ThemeError;
use crate::resource::parse_listing;
use crate::tools::{Invocation, require};
use std::fs;
use std::path::{Path, PathBuf};

/// What an init run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSummary {
    /// Canonical project folder.
    pub root: PathBuf,
    /// Entries written to disk.
    pub extracted: usize,
    /// Entries skipped (unsafe path or failed extraction).
    pub skipped: usize,
}

/// Extract every entry of the configured source archive under `folder`.
///
/// Preconditions are checked before anything is touched: the source archive
/// must exist and `gresource` must be on `PATH`. Entries are extracted one by
/// one; a failed extraction is reported and skipped.
///
/// # Errors
///
/// Returns [`ThemeError::MissingSource`], [`ThemeError::MissingTool`],
/// [`ThemeError::ToolFailed`] if the archive cannot be listed, or
/// [`ThemeError::Io`] if a directory or file cannot be written.
pub fn init_project(ctx: &Context<'_>, folder: &Path) -> Result<InitSummary, ThemeError> {
    let source = &ctx.config.source_archive;
    if !source.is_file() {
        return Err(ThemeError::MissingSource {
            path: source.clone(),
        });
    }
    let gresource = &ctx.config.tools.gresource;
    require(ctx.runner, gresource, None)?;

    ctx.reporter.section("Reading gresource compiled content ...");
    let list = Invocation::new(gresource).arg("list").arg(source);
    let listing = ctx.runner.run(&list)?;
    if !listing.success {
        return Err(ThemeError::ToolFailed {
            message: "Unable to read the source template.",
            output: listing.combined_text(),
            retry: Some(list.to_string()),
        });
    }
    let entries = parse_listing(&listing.stdout, &ctx.config.resource_prefix);
    tracing::debug!("{} entries in {}", entries.len(), source.display());

    fs::create_dir_all(folder)
        .map_err(ThemeError::io(format!("Failed to create {}", folder.display())))?;
    let root = folder
        .canonicalize()
        .map_err(ThemeError::io(format!("Failed to resolve {}", folder.display())))?;

    let mut summary = InitSummary {
        root,
        extracted: 0,
        skipped: 0,
    };

    for entry in &entries {
        let Some(local) = entry.local_path(&summary.root) else {
            tracing::warn!("Refusing to extract {:?}", entry.raw());
            ctx.reporter
                .warning(&format!("Skipping {} ...", entry.raw().to_string_lossy()));
            summary.skipped += 1;
            continue;
        };

        ctx.reporter
            .item(&format!("Extracting {} ...", entry.display_name()));

        let output = ctx.runner.run(
            &Invocation::new(gresource)
                .arg("extract")
                .arg(source)
                .arg(entry.raw()),
        )?;
        if !output.success {
            ctx.reporter.warning(&format!(
                "Unable to extract {}: {}",
                entry.display_name(),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
            summary.skipped += 1;
            continue;
        }

        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent)
                .map_err(ThemeError::io(format!("Failed to create {}", parent.display())))?;
        }
        fs::write(&local, &output.stdout)
            .map_err(ThemeError::io(format!("Failed to write {}", local.display())))?;
        tracing::trace!("Wrote {} bytes to {}", output.stdout.len(), local.display());
        summary.extracted += 1;
    }

    ctx.reporter.success("Project created.");
    ctx.reporter
        .detail(&format!("{} files extracted.", summary.extracted));
    Ok(summary)
}
