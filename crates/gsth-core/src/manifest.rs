//! `<name>.gresource.xml` generation.
//!
//! The manifest lists every regular file of a project tree under a single
//! `<gresource>` element, which is all `glib-compile-resources` needs to pack
//! the tree back into an archive.

use crate::error::ThemeError;
use std::fmt::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Ordered list of project files, relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectManifest {
    files: Vec<String>,
}

impl ProjectManifest {
    /// Walk `root` and collect every regular file except `exclude`.
    ///
    /// Symlinks to files are listed under their own name; symlinked
    /// directories are not descended into.
    ///
    /// Entries come out in file-name order within each directory, so repeated
    /// compiles of the same tree produce byte-identical manifests.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Io`] if the walk fails and
    /// [`ThemeError::InvalidFileName`] for a path with no UTF-8 form.
    pub fn collect(root: &Path, exclude: &Path) -> Result<Self, ThemeError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ThemeError::Io {
                context: format!("Failed to read {}", root.display()),
                source: e.into(),
            })?;

            if !entry.path().is_file() || entry.path() == exclude {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| ThemeError::InvalidFileName {
                    path: entry.path().to_path_buf(),
                })?;
            files.push(slash_path(relative).ok_or_else(|| ThemeError::InvalidFileName {
                path: entry.path().to_path_buf(),
            })?);
        }

        tracing::debug!("Collected {} files from {}", files.len(), root.display());
        Ok(Self { files })
    }

    /// Relative paths in manifest order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of listed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when the project holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Render the XML document with every file under `prefix`.
    pub fn render(&self, prefix: &str) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<gresources>\n");
        let _ = writeln!(xml, "    <gresource prefix=\"{}\">", escape(prefix));
        for file in &self.files {
            let _ = writeln!(xml, "        <file>{}</file>", escape(file));
        }
        xml.push_str("    </gresource>\n");
        xml.push_str("</gresources>\n");
        xml
    }
}

/// Manifest file name for a project folder: `<folder>.gresource.xml`.
pub fn manifest_file_name(project_name: &str) -> String {
    format!("{project_name}.gresource.xml")
}

/// Compiled archive file name for a project folder: `<folder>.gresource`.
pub fn archive_file_name(project_name: &str) -> String {
    format!("{project_name}.gresource")
}

/// Manifest location inside a project folder.
pub fn manifest_path(project: &Path, project_name: &str) -> PathBuf {
    project.join(manifest_file_name(project_name))
}

fn slash_path(relative: &Path) -> Option<String> {
    let parts = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
