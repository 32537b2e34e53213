//! `--compile`: pack a project tree back into a resource archive.

use super::{Context, remove_stale};
use crate::error::ThemeError;
use crate::manifest::{ProjectManifest, archive_file_name, manifest_file_name, manifest_path};
use crate::tools::{Invocation, require};
use std::fs;
use std::path::{Path, PathBuf};

const COMPILER_HINT: &str = "If use Debian or Ubuntu try install \"libglib2.0-dev-bin\".";

/// What a compile run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSummary {
    /// Generated `<name>.gresource.xml`.
    pub manifest: PathBuf,
    /// Compiled `<name>.gresource`, next to the project folder.
    pub archive: PathBuf,
    /// Number of files listed in the manifest.
    pub files: usize,
}

/// Regenerate the manifest for `folder` and compile it.
///
/// The archive is written one level above the project, named after the
/// project folder. Previous manifest and archive files are removed first.
///
/// # Errors
///
/// Returns [`ThemeError::MissingProjectFolder`], [`ThemeError::MissingTool`],
/// [`ThemeError::InvalidFileName`] for names the manifest cannot carry,
/// [`ThemeError::ToolFailed`] if the compiler rejects the project, or
/// [`ThemeError::Io`].
pub fn compile_project(ctx: &Context<'_>, folder: &Path) -> Result<CompileSummary, ThemeError> {
    let absolute = std::path::absolute(folder).unwrap_or_else(|_| folder.to_path_buf());
    if !absolute.is_dir() {
        return Err(ThemeError::MissingProjectFolder { path: absolute });
    }
    let compiler = &ctx.config.tools.compiler;
    require(ctx.runner, compiler, Some(COMPILER_HINT))?;

    let root = absolute
        .canonicalize()
        .map_err(ThemeError::io(format!("Failed to resolve {}", absolute.display())))?;
    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ThemeError::InvalidFileName { path: root.clone() })?
        .to_string();

    ctx.reporter.section("Creating resources XML ...");
    let manifest_file = manifest_path(&root, &name);
    let manifest = ProjectManifest::collect(&root, &manifest_file)?;
    if manifest.is_empty() {
        ctx.reporter.warning("The project has no files.");
    }

    remove_stale(&manifest_file)?;
    fs::write(&manifest_file, manifest.render(&ctx.config.resource_prefix)).map_err(
        ThemeError::io(format!("Failed to write {}", manifest_file.display())),
    )?;
    tracing::debug!(
        "Wrote {} with {} files",
        manifest_file.display(),
        manifest.len()
    );

    let archive_name = archive_file_name(&name);
    let archive = root.with_file_name(&archive_name);
    remove_stale(&archive)?;
    remove_stale(Path::new(&archive_name))?;

    ctx.reporter.section("Compiling all resources ...");
    let output = ctx.runner.run(
        &Invocation::new(compiler)
            .arg(manifest_file_name(&name))
            .arg("--target")
            .arg(format!("../{archive_name}"))
            .current_dir(&root),
    )?;
    if !output.success {
        return Err(ThemeError::ToolFailed {
            message: "Unable compile the theme:",
            output: output.combined_text(),
            retry: None,
        });
    }

    ctx.reporter.success("Project compiled.");
    ctx.reporter.detail(&archive.display().to_string());

    Ok(CompileSummary {
        manifest: manifest_file,
        archive,
        files: manifest.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use crate::ops::init_project;
    use crate::reporter::NullReporter;
    use crate::testing::{FakeRunner, RecordingReporter};
    use tempfile::tempdir;

    fn project() -> (tempfile::TempDir, PathBuf) {
        let tmp = tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap().join("mytheme");
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a"), "a").unwrap();
        fs::write(root.join("b/c"), "c").unwrap();
        (tmp, root)
    }

    #[test]
    fn test_writes_manifest_and_invokes_compiler() {
        let (_tmp, root) = project();
        let config = ThemeConfig::default();
        let runner = FakeRunner::new();
        let reporter = RecordingReporter::new();
        let ctx = Context::new(&config, &runner, &reporter);

        let summary = compile_project(&ctx, &root).unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.manifest, root.join("mytheme.gresource.xml"));
        assert_eq!(summary.archive, root.with_file_name("mytheme.gresource"));

        let xml = fs::read_to_string(&summary.manifest).unwrap();
        assert!(xml.contains("<gresource prefix=\"/org/gnome/shell/theme\">"));
        assert!(xml.contains("        <file>a</file>\n        <file>b/c</file>\n"));

        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].to_string(),
            "glib-compile-resources mytheme.gresource.xml --target ../mytheme.gresource"
        );
        assert_eq!(calls[0].cwd.as_deref(), Some(root.as_path()));
        assert!(reporter.contains("success: Project compiled."));
    }

    #[test]
    fn test_replaces_previous_manifest_and_archive() {
        let (_tmp, root) = project();
        let manifest = root.join("mytheme.gresource.xml");
        let archive = root.with_file_name("mytheme.gresource");
        fs::write(&manifest, "<stale/>").unwrap();
        fs::write(&archive, "stale").unwrap();

        let config = ThemeConfig::default();
        let runner = FakeRunner::new();
        let reporter = RecordingReporter::new();
        let ctx = Context::new(&config, &runner, &reporter);
        compile_project(&ctx, &root).unwrap();

        let xml = fs::read_to_string(&manifest).unwrap();
        assert!(!xml.contains("stale"));
        assert!(!xml.contains("mytheme.gresource.xml"));
        // The fake compiler writes nothing, so the old archive must be gone.
        assert!(!archive.exists());
    }

    #[test]
    fn test_missing_folder() {
        let tmp = tempdir().unwrap();
        let config = ThemeConfig::default();
        let runner = FakeRunner::new();
        let ctx = Context::new(&config, &runner, &NullReporter);

        let err = compile_project(&ctx, &tmp.path().join("nope")).unwrap_err();
        match err {
            ThemeError::MissingProjectFolder { path } => assert!(path.is_absolute()),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_missing_compiler_writes_nothing() {
        let (_tmp, root) = project();
        let config = ThemeConfig::default();
        let runner = FakeRunner::new();
        runner.without("glib-compile-resources");
        let reporter = RecordingReporter::new();
        let ctx = Context::new(&config, &runner, &reporter);

        let err = compile_project(&ctx, &root).unwrap_err();
        assert!(matches!(err, ThemeError::MissingTool { hint: Some(_), .. }));
        assert!(!root.join("mytheme.gresource.xml").exists());
    }

    #[test]
    fn test_compiler_failure_reports_output() {
        let (_tmp, root) = project();
        let config = ThemeConfig::default();
        let runner = FakeRunner::new();
        runner.fail("glib-compile-resources", "mytheme.gresource.xml: Failed to locate “x”");
        let reporter = RecordingReporter::new();
        let ctx = Context::new(&config, &runner, &reporter);

        let err = compile_project(&ctx, &root).unwrap_err();
        assert_eq!(err.to_string(), "Unable compile the theme:");
        assert!(err.details()[0].contains("Failed to locate"));
        assert!(!reporter.contains("Project compiled."));
    }

    #[test]
    fn test_extract_then_compile_lists_same_files() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("src.gresource");
        fs::write(&source, "GVariant").unwrap();
        let config = ThemeConfig {
            source_archive: source,
            ..ThemeConfig::default()
        };
        let runner = FakeRunner::new();
        runner.stdout(
            " list ",
            b"/org/gnome/shell/theme/gdm.css\n/org/gnome/shell/theme/icons/x.svg\n",
        );
        runner.stdout("extract", b"content");
        let reporter = RecordingReporter::new();
        let ctx = Context::new(&config, &runner, &reporter);

        let target = tmp.path().join("roundtrip");
        init_project(&ctx, &target).unwrap();
        let summary = compile_project(&ctx, &target).unwrap();

        assert_eq!(summary.files, 2);
        let xml = fs::read_to_string(&summary.manifest).unwrap();
        assert!(xml.contains("<file>gdm.css</file>"));
        assert!(xml.contains("<file>icons/x.svg</file>"));
        assert_eq!(fs::read(target.join("icons/x.svg")).unwrap(), b"content");
    }
}
