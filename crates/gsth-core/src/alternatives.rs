//! `update-alternatives` client.
//!
//! Registration state lives entirely in the alternatives database; this module
//! only observes it through `--query` and issues the matching transition
//! (`--install`, `--set`, `--remove`).
//!
//! The query output is line oriented (`Value: <path>`, `Alternative: <path>`).
//! It is not a versioned format, so parsing is kept here behind
//! [`AlternativeQuery`] and nothing else looks at the raw text.

use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::tools::{Invocation, ToolOutput, ToolRunner};
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

const ALTERNATIVE_FIELD: &[u8] = b"Alternative: ";
const VALUE_FIELD: &[u8] = b"Value: ";

/// Registered candidates of one alternative group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternativeQuery {
    /// Every registered candidate path, in query order.
    pub alternatives: Vec<PathBuf>,
    /// The candidate the link currently points at.
    pub active: Option<PathBuf>,
}

impl AlternativeQuery {
    /// Parse `update-alternatives --query` output.
    ///
    /// Candidates must match a whole `Alternative: <path>` line byte for byte.
    pub fn parse(stdout: &[u8]) -> Self {
        let mut query = Self::default();
        for line in stdout.split(|b| *b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if let Some(path) = line.strip_prefix(ALTERNATIVE_FIELD) {
                query.alternatives.push(bytes_to_path(path));
            } else if let Some(path) = line.strip_prefix(VALUE_FIELD) {
                if !path.is_empty() && path != b"none" {
                    query.active = Some(bytes_to_path(path));
                }
            }
        }
        query
    }

    /// True when `path` is one of the registered candidates.
    ///
    /// Paths are compared byte for byte, so `/a//b` or `/a/b/` do not match a
    /// registered `/a/b`.
    pub fn is_registered(&self, path: &Path) -> bool {
        self.alternatives.iter().any(|p| same_bytes(p, path))
    }

    /// True when `path` is the active candidate.
    pub fn is_active(&self, path: &Path) -> bool {
        self.active.as_deref().is_some_and(|p| same_bytes(p, path))
    }
}

fn same_bytes(a: &Path, b: &Path) -> bool {
    a.as_os_str().as_bytes() == b.as_os_str().as_bytes()
}

fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(OsStr::from_bytes(bytes))
}

/// Operations on the configured alternative group.
pub struct Alternatives<'a> {
    runner: &'a dyn ToolRunner,
    config: &'a ThemeConfig,
}

impl std::fmt::Debug for Alternatives<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alternatives")
            .field("name", &self.config.alternative_name)
            .finish_non_exhaustive()
    }
}

impl<'a> Alternatives<'a> {
    /// Client for `config.alternative_name`, run through `runner`.
    pub fn new(runner: &'a dyn ToolRunner, config: &'a ThemeConfig) -> Self {
        Self { runner, config }
    }

    fn command(&self) -> Invocation {
        Invocation::new(&self.config.tools.alternatives)
    }

    /// Current registrations.
    ///
    /// A group with no candidates makes the tool exit non-zero; that is
    /// reported as an empty query, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Spawn`] if the tool cannot be started.
    pub fn query(&self) -> Result<AlternativeQuery, ThemeError> {
        let output = self.runner.run(
            &self
                .command()
                .arg("--query")
                .arg(&self.config.alternative_name),
        )?;
        if !output.success {
            tracing::debug!(
                "No registrations for {}: {}",
                self.config.alternative_name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(AlternativeQuery::parse(&output.stdout))
    }

    /// Register `path` as a candidate at the configured priority.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ToolFailed`] on a non-zero exit.
    pub fn register(&self, path: &Path) -> Result<(), ThemeError> {
        let inv = self
            .command()
            .arg("--quiet")
            .arg("--install")
            .arg(&self.config.alternative_link)
            .arg(&self.config.alternative_name)
            .arg(path)
            .arg(self.config.alternative_priority.to_string());
        let output = self.runner.run(&inv)?;
        check(output, "Unable register alternative for theme.", &inv)
    }

    /// Point the group's link at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ToolFailed`] on a non-zero exit.
    pub fn set(&self, path: &Path) -> Result<(), ThemeError> {
        let inv = self
            .command()
            .arg("--quiet")
            .arg("--set")
            .arg(&self.config.alternative_name)
            .arg(path);
        let output = self.runner.run(&inv)?;
        check(output, "Unable install alternative for theme.", &inv)
    }

    /// Drop `path` from the group.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ToolFailed`] on a non-zero exit.
    pub fn remove(&self, path: &Path) -> Result<(), ThemeError> {
        let inv = self
            .command()
            .arg("--remove")
            .arg(&self.config.alternative_name)
            .arg(path);
        let output = self.runner.run(&inv)?;
        check(output, "Unable uninstall the alternative.", &inv)
    }
}

fn check(output: ToolOutput, message: &'static str, inv: &Invocation) -> Result<(), ThemeError> {
    if output.success {
        return Ok(());
    }
    // --quiet only affects our invocation, the manual hint should be chatty.
    let mut retry = inv.clone();
    retry.args.retain(|a| a != "--quiet");
    Err(ThemeError::ToolFailed {
        message,
        output: output.combined_text(),
        retry: Some(retry.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRunner;

    const QUERY: &[u8] = b"Name: gdm3-theme.gresource
Link: /usr/share/gnome-shell/gdm3-theme.gresource
Status: manual
Best: /usr/share/gnome-shell/theme/Yaru/gnome-shell-theme.gresource
Value: /usr/local/share/gnome-shell/theme/dark.gresource

Alternative: /usr/local/share/gnome-shell/theme/dark.gresource
Priority: 0

Alternative: /usr/share/gnome-shell/theme/Yaru/gnome-shell-theme.gresource
Priority: 10
";

    #[test]
    fn test_parse_query() {
        let q = AlternativeQuery::parse(QUERY);
        assert_eq!(q.alternatives.len(), 2);
        assert!(q.is_registered(Path::new(
            "/usr/local/share/gnome-shell/theme/dark.gresource"
        )));
        assert!(q.is_active(Path::new(
            "/usr/local/share/gnome-shell/theme/dark.gresource"
        )));
        assert!(!q.is_registered(Path::new("/usr/local/share/gnome-shell/theme/dark")));
    }

    #[test]
    fn test_parse_requires_exact_line() {
        let q = AlternativeQuery::parse(b"  Alternative: /x\nAlternative: /y \nValue: none\n");
        assert!(!q.is_registered(Path::new("/x")));
        assert!(!q.is_registered(Path::new("/y")));
        assert!(q.is_registered(Path::new("/y ")));
        assert_eq!(q.active, None);
    }

    #[test]
    fn test_differently_spelled_path_is_not_registered() {
        let q = AlternativeQuery::parse(QUERY);
        for spelling in [
            "/usr/local/share/gnome-shell/theme/dark.gresource/",
            "//usr/local/share/gnome-shell/theme/dark.gresource",
            "/usr/local/share/gnome-shell/./theme/dark.gresource",
        ] {
            assert!(!q.is_registered(Path::new(spelling)), "{spelling}");
            assert!(!q.is_active(Path::new(spelling)), "{spelling}");
        }
    }

    #[test]
    fn test_query_failure_is_empty() {
        let config = ThemeConfig::default();
        let runner = FakeRunner::new();
        runner.respond("--query", ToolOutput {
            success: false,
            stdout: Vec::new(),
            stderr: b"update-alternatives: error: no alternatives for gdm3-theme.gresource"
                .to_vec(),
        });
        let q = Alternatives::new(&runner, &config).query().unwrap();
        assert_eq!(q, AlternativeQuery::default());
    }

    #[test]
    fn test_register_passes_link_name_path_priority() {
        let config = ThemeConfig::default();
        let runner = FakeRunner::new();
        Alternatives::new(&runner, &config)
            .register(Path::new("/usr/local/share/gnome-shell/theme/t.gresource"))
            .unwrap();
        assert_eq!(
            runner.commands(),
            vec![
                "update-alternatives --quiet --install /usr/share/gnome-shell/gdm3-theme.gresource \
                 gdm3-theme.gresource /usr/local/share/gnome-shell/theme/t.gresource 0"
            ]
        );
    }

    #[test]
    fn test_set_failure_carries_manual_command() {
        let config = ThemeConfig::default();
        let runner = FakeRunner::new();
        runner.fail("--set", "update-alternatives: error: alternative path not found");
        let err = Alternatives::new(&runner, &config)
            .set(Path::new("/t.gresource"))
            .unwrap_err();
        match err {
            ThemeError::ToolFailed { retry, output, .. } => {
                assert_eq!(
                    retry.as_deref(),
                    Some("update-alternatives --set gdm3-theme.gresource /t.gresource")
                );
                assert!(output.contains("alternative path not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
