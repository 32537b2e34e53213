//! gsth-core - GNOME Shell theme resource handling
//!
//! Extracts a compiled `.gresource` theme into an editable tree, compiles a
//! tree back into an archive, and installs or removes archives as the
//! display manager's `gdm3-theme.gresource` alternative.
//!
//! All heavy lifting is done by external programs (`gresource`,
//! `glib-compile-resources`, `update-alternatives`). This crate sequences
//! them, checks their exit status, and keeps the path bookkeeping straight.
//!
//! # Seams
//!
//! - [`tools::ToolRunner`]: how programs are located and run.
//! - [`reporter::Reporter`]: where progress messages go.
//! - [`config::ThemeConfig`]: every fixed path and name.
//!
//! All three are bundled in [`ops::Context`] and passed to the operations in
//! [`ops`].

pub mod alternatives;
pub mod config;
pub mod error;
pub mod manifest;
pub mod ops;
pub mod privilege;
pub mod reporter;
pub mod resource;
pub mod tools;

#[cfg(test)]
mod testing;

pub use config::ThemeConfig;
pub use error::ThemeError;
pub use ops::Context;
pub use reporter::{NullReporter, Reporter};
pub use tools::{SystemRunner, ToolRunner};
