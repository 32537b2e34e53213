//! gsth - GNOME Shell theme helper CLI

use anyhow::{Context as _, Result};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use gsth_cli::ui::Output;
use gsth_cli::{Cli, dispatch};
use gsth_core::{Context, SystemRunner, ThemeConfig};

fn main() -> Result<ExitCode> {
    // Initialize logging. Diagnostics go to stderr so stdout stays the
    // user-facing transcript.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_lenient(std::env::args_os());
    let action = cli.action();
    tracing::debug!(?action, "Dispatching");

    let config = ThemeConfig::from_env();
    let runner = SystemRunner;
    let output = Output::new();
    let ctx = Context::new(&config, &runner, &output);

    let code = match dispatch(&action, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("{action:?} failed: {err:?}");
            output.error(&err);
            ExitCode::from(err.exit_code())
        }
    };

    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    Ok(code)
}
