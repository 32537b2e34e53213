//! gsth - GNOME Shell theme helper
//!
//! Flag parsing and dispatch for the `gsth` binary. The work itself lives in
//! `gsth-core`.
#![allow(missing_docs)]

pub mod ui;

use clap::Parser;
use gsth_core::{Context, ThemeError, ops};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Static usage text, printed for `-h` and when no action is given.
pub const HELP: &str = "\
Gnome Shell Theme Helper - v{version}
Use: gsth [option] [arguments]
Options:
  -h, --help                Print the help message.
      --init [folder]       Initialize project in the specific folder.
      --compile [folder]    Compile project from specific folder.
      --install [gresource] Install specific gresource file.
      --uninstall [alternative path]
                            Uninstall specific alternative gresource path.
                            For show all alternatives execute this command:
                            update-alternatives --query gdm3-theme.gresource";

/// Help text with the crate version filled in.
pub fn help_text() -> String {
    HELP.replace("{version}", env!("CARGO_PKG_VERSION"))
}

const SWITCHES: &[&str] = &["-h", "--help"];
const VALUED: &[&str] = &["--init", "--compile", "--install", "--uninstall"];

#[derive(Debug, Default, Parser)]
#[command(name = "gsth")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Print the help message
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Initialize a project in the given folder
    #[arg(long, num_args = 0..=1, value_name = "FOLDER")]
    pub init: Option<Option<PathBuf>>,

    /// Compile the project in the given folder
    #[arg(long, num_args = 0..=1, value_name = "FOLDER")]
    pub compile: Option<Option<PathBuf>>,

    /// Install a compiled gresource file
    #[arg(long, num_args = 0..=1, value_name = "GRESOURCE")]
    pub install: Option<Option<PathBuf>>,

    /// Uninstall an installed gresource path
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub uninstall: Option<Option<PathBuf>>,
}

/// The single thing a run does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Init(PathBuf),
    Compile(PathBuf),
    Install(PathBuf),
    Uninstall(PathBuf),
}

impl Cli {
    /// Parse an argument vector, silently dropping anything unrecognised.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(retain_known_flags(args)).unwrap_or_else(|e| {
            tracing::debug!("Falling back to help: {e}");
            Self::default()
        })
    }

    /// Pick the action: help first, then init > compile > install > uninstall.
    /// A flag without a value does not count.
    pub fn action(&self) -> Action {
        if self.help {
            return Action::Help;
        }
        if let Some(path) = value(self.init.as_ref()) {
            return Action::Init(path.to_path_buf());
        }
        if let Some(path) = value(self.compile.as_ref()) {
            return Action::Compile(path.to_path_buf());
        }
        if let Some(path) = value(self.install.as_ref()) {
            return Action::Install(path.to_path_buf());
        }
        if let Some(path) = value(self.uninstall.as_ref()) {
            return Action::Uninstall(path.to_path_buf());
        }
        Action::Help
    }
}

fn value(flag: Option<&Option<PathBuf>>) -> Option<&Path> {
    flag.and_then(Option::as_deref)
        .filter(|p| !p.as_os_str().is_empty())
}

/// Keep the program name, recognised flags and their values; drop the rest.
///
/// A valued flag takes the next argument only when that argument does not
/// look like a flag itself. `--flag=value` is kept as one argument.
pub fn retain_known_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            tracing::debug!("Ignoring argument {arg:?}");
            continue;
        };

        if SWITCHES.contains(&text) {
            kept.push(arg);
        } else if VALUED.contains(&text) {
            let takes_next = args
                .peek()
                .is_some_and(|next| !next.to_string_lossy().starts_with('-'));
            if !takes_next {
                kept.push(arg);
                continue;
            }
            match args.next() {
                // An empty value selects nothing, same as no value.
                Some(value) if value.is_empty() => kept.push(arg),
                value => {
                    kept.push(arg);
                    kept.extend(value);
                }
            }
        } else if let Some(flag) = VALUED
            .iter()
            .find(|flag| text.strip_prefix(**flag).is_some_and(|rest| rest.starts_with('=')))
        {
            if text.len() == flag.len() + 1 {
                kept.push(OsString::from(*flag));
            } else {
                kept.push(arg);
            }
        } else {
            tracing::debug!("Ignoring argument {text:?}");
        }
    }

    kept
}

/// Run `action` against `ctx`. Help is printed to stdout.
///
/// # Errors
///
/// Propagates the operation's [`ThemeError`].
pub fn dispatch(action: &Action, ctx: &Context<'_>) -> Result<(), ThemeError> {
    match action {
        Action::Help => {
            println!("{}", help_text());
            Ok(())
        }
        Action::Init(folder) => ops::init_project(ctx, folder).map(|summary| {
            tracing::info!(
                "Extracted {} entries into {} ({} skipped)",
                summary.extracted,
                summary.root.display(),
                summary.skipped
            );
        }),
        Action::Compile(folder) => ops::compile_project(ctx, folder).map(|summary| {
            tracing::info!(
                "Compiled {} files into {}",
                summary.files,
                summary.archive.display()
            );
        }),
        Action::Install(archive) => ops::install_archive(ctx, archive).map(|installed| {
            tracing::info!("Installed {}", installed.display());
        }),
        Action::Uninstall(path) => ops::uninstall_archive(ctx, path),
    }
}
