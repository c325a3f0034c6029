//! `malo install`
//!
//! Installs everything the manifest lists with `pip install -r`.

use super::{Session, print_failure_detail};
use crate::manifest::Manifest;
use crate::python::Python;
use crate::ui;
use anyhow::{Result, bail};
use colored::*;

pub fn install_requirements(session: &Session) -> Result<()> {
    let manifest = session.manifest();
    if !manifest.exists() {
        bail!(
            "{} not found. Run 'malo init' to create one.",
            manifest.file_name()
        );
    }
    install_from(&session.active_python(), &manifest)
}

/// Runs `pip install -r` against `manifest`. A failing pip is reported, not
/// returned.
pub(crate) fn install_from(python: &Python, manifest: &Manifest) -> Result<()> {
    let name = manifest.file_name();

    let out = ui::with_spinner(format!("Installing packages from {}...", name), || {
        python.pip_install_requirements(manifest.path())
    })?;

    if out.success {
        println!("{} Installed packages from {}", "✓".green(), name);
    } else {
        println!(
            "{} Failed to install packages from {} ({})",
            "x".red(),
            name,
            out.status_text()
        );
        print_failure_detail(&out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaloConfig;
    use crate::project::Project;
    use crate::testing::{FakeRunner, MemoryStore};

    #[test]
    fn test_install_requires_manifest() {
        let project = Project::new("/proj", MaloConfig::default());
        let runner = FakeRunner::new();
        let store = MemoryStore::new().with_venv("/proj");
        let session = Session::new(&project, &runner, &store);

        let err = install_requirements(&session).unwrap_err();
        assert!(err.to_string().contains("requirements.txt not found"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_install_uses_venv_when_present() {
        let project = Project::new("/proj", MaloConfig::default());
        let runner = FakeRunner::new();
        let store = MemoryStore::new()
            .with_venv("/proj")
            .with_file("/proj/requirements.txt", "flask\n");
        let session = Session::new(&project, &runner, &store);

        install_requirements(&session).unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["python -m pip install -r /proj/requirements.txt"]
        );
        assert!(runner.calls()[0].program.starts_with("/proj/.venv"));
    }

    #[test]
    fn test_install_falls_back_to_system_interpreter() {
        let project = Project::new("/proj", MaloConfig::default());
        let runner = FakeRunner::new().fail_when("pip install");
        let store = MemoryStore::new().with_file("/proj/requirements.txt", "flask\n");
        let session = Session::new(&project, &runner, &store);

        install_requirements(&session).unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["python3 -m pip install -r /proj/requirements.txt"]
        );
    }
}
