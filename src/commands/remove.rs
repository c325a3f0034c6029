//! `malo remove <pkg...>`
//!
//! Uninstalls each package, then drops the lines naming it exactly from the
//! manifest.

use super::{Session, print_failure_detail};
use crate::manifest::contains_entry;
use anyhow::Result;
use colored::*;

pub fn remove_packages(session: &Session, packages: &[String]) -> Result<()> {
    let python = session.active_python();

    for pkg in packages {
        match python.pip_uninstall(pkg) {
            Ok(out) if out.success => println!("{} Uninstalled {}", "🗑️".red(), pkg.bold()),
            Ok(out) => {
                println!(
                    "{} Failed to uninstall {} ({})",
                    "x".red(),
                    pkg,
                    out.status_text()
                );
                print_failure_detail(&out);
            }
            Err(e) => println!("{} Failed to uninstall {}: {:#}", "x".red(), pkg, e),
        }
    }

    let manifest = session.manifest();
    if !manifest.exists() {
        return Ok(());
    }

    let before = manifest.read()?;
    for pkg in packages {
        if !contains_entry(&before, pkg) {
            println!(
                "{} {} was not listed in {}",
                "!".yellow(),
                pkg,
                manifest.file_name()
            );
        }
    }
    manifest.remove_all(packages)?;
    println!("{} Updated {}", "✓".green(), manifest.file_name());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaloConfig;
    use crate::project::Project;
    use crate::testing::{FakeRunner, MemoryStore};

    const MANIFEST: &str = "/proj/requirements.txt";

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_remove_uninstalls_and_filters_manifest() {
        let project = Project::new("/proj", MaloConfig::default());
        let runner = FakeRunner::new();
        let store = MemoryStore::new()
            .with_venv("/proj")
            .with_file(MANIFEST, "fastapi\n  uvicorn  \n\nrequests\n");
        let session = Session::new(&project, &runner, &store);

        remove_packages(&session, &names(&["uvicorn"])).unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["python -m pip uninstall -y uvicorn"]
        );
        assert_eq!(store.contents(MANIFEST).unwrap(), "fastapi\nrequests\n");
    }

    #[test]
    fn test_remove_keeps_going_after_uninstall_failure() {
        let project = Project::new("/proj", MaloConfig::default());
        let runner = FakeRunner::new().fail_when("uninstall -y ghost");
        let store = MemoryStore::new()
            .with_venv("/proj")
            .with_file(MANIFEST, "ghost\nflask\nnumpy\n");
        let session = Session::new(&project, &runner, &store);

        remove_packages(&session, &names(&["ghost", "flask"])).unwrap();

        assert_eq!(runner.calls().len(), 2);
        assert_eq!(store.contents(MANIFEST).unwrap(), "numpy\n");
    }

    #[test]
    fn test_remove_without_venv_uses_system_pip_uninstall() {
        let project = Project::new("/proj", MaloConfig::default());
        let runner = FakeRunner::new();
        let store = MemoryStore::new().with_file(MANIFEST, "flask\n");
        let session = Session::new(&project, &runner, &store);

        remove_packages(&session, &names(&["flask"])).unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["python3 -m pip uninstall -y flask"]
        );
        assert_eq!(store.contents(MANIFEST).unwrap(), "\n");
    }

    #[test]
    fn test_remove_without_manifest_only_uninstalls() {
        let project = Project::new("/proj", MaloConfig::default());
        let runner = FakeRunner::new();
        let store = MemoryStore::new().with_venv("/proj");
        let session = Session::new(&project, &runner, &store);

        remove_packages(&session, &names(&["flask"])).unwrap();

        assert_eq!(runner.calls().len(), 1);
        assert!(store.contents(MANIFEST).is_none());
    }
}
