//! In-memory fakes for the process and filesystem capabilities.

use crate::process::{Invocation, ProcessOutput, ProcessRunner};
use crate::store::FileStore;
use anyhow::{Result, anyhow, bail};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    executables: RefCell<BTreeSet<PathBuf>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.into(), contents.to_string());
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.dirs.borrow_mut().insert(path.into());
        self
    }

    /// A default `.venv` under `root`, interpreter included.
    pub fn with_venv(self, root: impl AsRef<Path>) -> Self {
        let venv = root.as_ref().join(".venv");
        let python = crate::project::venv_interpreter(&venv);
        self.with_dir(venv).with_file(python, "")
    }

    pub fn fail_writes(&self) {
        self.fail_writes.set(true);
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        self.executables.borrow().contains(path.as_ref())
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        if self.fail_writes.get() {
            bail!("Failed to write {}: read-only filesystem", path.display());
        }
        Ok(())
    }
}

impl FileStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.contents(path)
            .ok_or_else(|| anyhow!("Failed to read {}: not found", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.check_writable(path)?;
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn append(&self, path: &Path, contents: &str) -> Result<()> {
        self.check_writable(path)?;
        self.files
            .borrow_mut()
            .entry(path.to_path_buf())
            .or_default()
            .push_str(contents);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.check_writable(path)?;
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| anyhow!("Failed to remove {}: not found", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if !self.dirs.borrow().contains(path) {
            bail!("Failed to remove {}: not found", path.display());
        }
        self.dirs.borrow_mut().retain(|d| !d.starts_with(path));
        self.files.borrow_mut().retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn list_by_extension(&self, dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir) && p.extension().is_some_and(|e| e == ext))
            .cloned()
            .collect())
    }

    fn set_executable(&self, path: &Path) -> Result<()> {
        if !self.files.borrow().contains_key(path) {
            bail!("Failed to chmod {}: not found", path.display());
        }
        self.executables.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }
}

/// Records every invocation and succeeds unless told otherwise.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<Invocation>>,
    failing: RefCell<Vec<String>>,
    unspawnable: RefCell<Vec<String>>,
    stdout: RefCell<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invocations whose command line contains `pattern` exit with status 1.
    pub fn fail_when(self, pattern: &str) -> Self {
        self.failing.borrow_mut().push(pattern.to_string());
        self
    }

    /// Invocations whose command line contains `pattern` cannot be spawned.
    pub fn missing_when(self, pattern: &str) -> Self {
        self.unspawnable.borrow_mut().push(pattern.to_string());
        self
    }

    pub fn with_stdout(self, stdout: &str) -> Self {
        *self.stdout.borrow_mut() = stdout.to_string();
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Command lines with the program reduced to its file name.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|inv| {
                let program = inv
                    .program
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                std::iter::once(program)
                    .chain(inv.args.iter().cloned())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        let line = invocation.to_string();

        if self.unspawnable.borrow().iter().any(|p| line.contains(p)) {
            bail!("Failed to execute {}", invocation.program.display());
        }

        if self.failing.borrow().iter().any(|p| line.contains(p)) {
            return Ok(ProcessOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: format!("ERROR: {} failed\n", line),
            });
        }

        Ok(ProcessOutput {
            success: true,
            code: Some(0),
            stdout: self.stdout.borrow().clone(),
            stderr: String::new(),
        })
    }
}
