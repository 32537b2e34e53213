//! Test doubles for the runner and reporter seams.

use crate::error::ThemeError;
use crate::reporter::Reporter;
use crate::tools::{Invocation, ToolOutput, ToolRunner};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

/// Scripted [`ToolRunner`].
///
/// Invocations are matched against rules by substring of their rendered
/// command line; the most recently added matching rule wins. Anything
/// unmatched succeeds with empty output.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    rules: RefCell<Vec<(String, ToolOutput)>>,
    missing: RefCell<HashSet<String>>,
    log: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, needle: &str, output: ToolOutput) {
        self.rules.borrow_mut().push((needle.to_string(), output));
    }

    pub(crate) fn stdout(&self, needle: &str, stdout: &[u8]) {
        self.respond(
            needle,
            ToolOutput {
                success: true,
                stdout: stdout.to_vec(),
                stderr: Vec::new(),
            },
        );
    }

    pub(crate) fn fail(&self, needle: &str, stderr: &str) {
        self.respond(
            needle,
            ToolOutput {
                success: false,
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
            },
        );
    }

    pub(crate) fn without(&self, program: &str) {
        self.missing.borrow_mut().insert(program.to_string());
    }

    pub(crate) fn invocations(&self) -> Vec<Invocation> {
        self.log.borrow().clone()
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.log.borrow().iter().map(ToString::to_string).collect()
    }
}

impl ToolRunner for FakeRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        if self.missing.borrow().contains(program) {
            None
        } else {
            Some(PathBuf::from("/usr/bin").join(program))
        }
    }

    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ThemeError> {
        self.log.borrow_mut().push(invocation.clone());
        let rendered = invocation.to_string();
        let output = self
            .rules
            .borrow()
            .iter()
            .rev()
            .find(|(needle, _)| rendered.contains(needle.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or(ToolOutput {
                success: true,
                ..ToolOutput::default()
            });
        Ok(output)
    }
}

/// [`Reporter`] that keeps every message, tagged by kind.
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l.contains(needle))
    }

    fn push(&self, kind: &str, msg: &str) {
        self.lines.lock().unwrap().push(format!("{kind}: {msg}"));
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, title: &str) {
        self.push("section", title);
    }
    fn step(&self, msg: &str) {
        self.push("step", msg);
    }
    fn item(&self, msg: &str) {
        self.push("item", msg);
    }
    fn detail(&self, msg: &str) {
        self.push("detail", msg);
    }
    fn success(&self, msg: &str) {
        self.push("success", msg);
    }
    fn warning(&self, msg: &str) {
        self.push("warning", msg);
    }
}
