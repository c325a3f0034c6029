//! CLI command handlers.
//!
//! Each handler takes a [`Session`]: the project plus the process and file
//! capabilities it is allowed to use. Handlers print their own progress and
//! return `Err` only for failures that abort the whole command.

pub mod add;
pub mod clean;
pub mod create;
pub mod doctor;
pub mod init;
pub mod install;
pub mod list;
pub mod remove;
pub mod run;

use crate::manifest::Manifest;
use crate::process::ProcessRunner;
use crate::project::Project;
use crate::python::Python;
use crate::store::FileStore;

pub struct Session<'a> {
    pub project: &'a Project,
    pub runner: &'a dyn ProcessRunner,
    pub store: &'a dyn FileStore,
}

impl<'a> Session<'a> {
    pub fn new(
        project: &'a Project,
        runner: &'a dyn ProcessRunner,
        store: &'a dyn FileStore,
    ) -> Self {
        Self {
            project,
            runner,
            store,
        }
    }

    pub fn manifest(&self) -> Manifest<'a> {
        Manifest::new(self.store, self.project.manifest_path())
    }

    /// A venv counts only once its interpreter exists; a failed
    /// `python -m venv` can leave the directory behind without one.
    pub fn has_venv(&self) -> bool {
        self.store.exists(&self.project.venv_python())
    }

    pub fn system_python(&self) -> Python<'a> {
        Python::new(
            self.runner,
            self.project.system_python(),
            self.project.root(),
        )
    }

    pub fn venv_python(&self) -> Python<'a> {
        Python::new(self.runner, self.project.venv_python(), self.project.root())
    }

    /// The venv interpreter if the venv exists, the system one otherwise.
    pub fn active_python(&self) -> Python<'a> {
        if self.has_venv() {
            self.venv_python()
        } else {
            self.system_python()
        }
    }
}

/// Prints the stderr tail of a failed process, indented under its status line.
pub(crate) fn print_failure_detail(output: &crate::process::ProcessOutput) {
    if let Some(line) = output.last_error_line() {
        println!("     {}", line);
    }
}
