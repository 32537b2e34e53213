//! Fixed locations and names used by every operation.
//!
//! Defaults mirror a stock Ubuntu GNOME install. `ThemeConfig::from_env` lets
//! the two filesystem locations be redirected, which is what the integration
//! tests rely on.

use std::path::PathBuf;

/// Logical mount prefix of the shell theme inside a resource archive.
pub const DEFAULT_RESOURCE_PREFIX: &str = "/org/gnome/shell/theme";

/// Archive that `init` extracts from.
pub const DEFAULT_SOURCE_ARCHIVE: &str =
    "/usr/share/gnome-shell/theme/Yaru/gnome-shell-theme.gresource";

/// Directory installed archives are copied into.
pub const DEFAULT_SYSTEM_THEME_DIR: &str = "/usr/local/share/gnome-shell/theme";

/// Alternative group name managed by `update-alternatives`.
pub const DEFAULT_ALTERNATIVE_NAME: &str = "gdm3-theme.gresource";

/// Symlink the display manager reads its theme from.
pub const DEFAULT_ALTERNATIVE_LINK: &str = "/usr/share/gnome-shell/gdm3-theme.gresource";

/// Overrides `source_archive`.
pub const ENV_SOURCE_ARCHIVE: &str = "GSTH_SOURCE_GRESOURCE";

/// Overrides `system_theme_dir`.
pub const ENV_SYSTEM_THEME_DIR: &str = "GSTH_SYSTEM_THEME_DIR";

/// Names of the external programs the operations shell out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolNames {
    /// Lists and extracts archive entries.
    pub gresource: String,
    /// Packs a manifest into an archive.
    pub compiler: String,
    /// Registers, activates and removes alternatives.
    pub alternatives: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            gresource: "gresource".to_string(),
            compiler: "glib-compile-resources".to_string(),
            alternatives: "update-alternatives".to_string(),
        }
    }
}

/// Configuration injected into every operation through [`crate::ops::Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Prefix stripped from listed entries and declared in generated manifests.
    pub resource_prefix: String,
    /// Archive read by `init`.
    pub source_archive: PathBuf,
    /// Destination directory for installed archives.
    pub system_theme_dir: PathBuf,
    /// Alternative group name.
    pub alternative_name: String,
    /// Symlink path owned by the alternative group.
    pub alternative_link: PathBuf,
    /// Priority passed when registering a new candidate.
    pub alternative_priority: i32,
    /// External program names.
    pub tools: ToolNames,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            resource_prefix: DEFAULT_RESOURCE_PREFIX.to_string(),
            source_archive: PathBuf::from(DEFAULT_SOURCE_ARCHIVE),
            system_theme_dir: PathBuf::from(DEFAULT_SYSTEM_THEME_DIR),
            alternative_name: DEFAULT_ALTERNATIVE_NAME.to_string(),
            alternative_link: PathBuf::from(DEFAULT_ALTERNATIVE_LINK),
            alternative_priority: 0,
            tools: ToolNames::default(),
        }
    }
}

impl ThemeConfig {
    /// Defaults with the `GSTH_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::with_overrides(|key| std::env::var_os(key))
    }

    fn with_overrides(lookup: impl Fn(&str) -> Option<std::ffi::OsString>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_SOURCE_ARCHIVE).filter(|v| !v.is_empty()) {
            config.source_archive = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_SYSTEM_THEME_DIR).filter(|v| !v.is_empty()) {
            config.system_theme_dir = PathBuf::from(path);
        }
        config
    }

    /// Where an archive with the given file name lands once installed.
    pub fn system_path_for(&self, file_name: &std::ffi::OsStr) -> PathBuf {
        self.system_theme_dir.join(file_name)
    }

    /// The query command users are pointed at for manual inspection.
    pub fn query_command(&self) -> String {
        format!(
            "{} --query {}",
            self.tools.alternatives, self.alternative_name
        )
    }
}
