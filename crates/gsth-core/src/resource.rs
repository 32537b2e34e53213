//! Resource entries as listed by `gresource list`.
//!
//! Entry names are handled as raw bytes end to end. Theme archives may carry
//! names that are not valid in the local encoding, so nothing here decodes
//! them except for display.

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Component, Path, PathBuf};

/// One entry of a resource archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    raw: Vec<u8>,
    relative: Vec<u8>,
}

impl ResourceEntry {
    /// Build an entry from its listed name, stripping `prefix` and any
    /// surrounding `/`. Names outside the prefix keep their full path.
    pub fn new(raw: &[u8], prefix: &str) -> Self {
        let rest = raw.strip_prefix(prefix.as_bytes()).unwrap_or(raw);
        Self {
            raw: raw.to_vec(),
            relative: trim_slashes(rest).to_vec(),
        }
    }

    /// The name exactly as the archive lists it.
    pub fn raw(&self) -> &OsStr {
        OsStr::from_bytes(&self.raw)
    }

    /// Path inside the project tree, without leading or trailing separators.
    pub fn relative_path(&self) -> &Path {
        Path::new(OsStr::from_bytes(&self.relative))
    }

    /// Lossy text form of [`Self::relative_path`] for progress output.
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.relative).into_owned()
    }

    /// Where this entry is written under `root`.
    ///
    /// Returns `None` for entries that would land outside `root` (`..`
    /// components) or that name the root itself.
    pub fn local_path(&self, root: &Path) -> Option<PathBuf> {
        let relative = self.relative_path();
        let mut saw_file = false;
        for component in relative.components() {
            match component {
                Component::Normal(_) => saw_file = true,
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return None;
                }
            }
        }
        saw_file.then(|| root.join(relative))
    }
}

/// Split `gresource list` output into entries, one per non-empty line.
pub fn parse_listing(stdout: &[u8], prefix: &str) -> Vec<ResourceEntry> {
    stdout
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| ResourceEntry::new(line, prefix))
        .collect()
}

fn trim_slashes(mut bytes: &[u8]) -> &[u8] {
    while let [b'/', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b'/'] = bytes {
        bytes = rest;
    }
    bytes
}
