//! `malo init`
//!
//! Brings an existing directory under malo: makes sure there is a manifest
//! and a venv, rebuilds the manifest from the entry file's imports and
//! installs it.

use super::install::install_from;
use super::{Session, print_failure_detail};
use crate::manifest::{derive_from_source, packages_from_imports};
use anyhow::{Context, Result};
use colored::*;

pub fn init_project(session: &Session) -> Result<()> {
    let project = session.project;
    let manifest = session.manifest();

    if manifest.ensure_exists()? {
        println!("{} Created {}", "✓".green(), manifest.file_name());
    }

    let venv_ready = session.has_venv() || create_venv(session);
    let python = if venv_ready {
        session.venv_python()
    } else {
        session.system_python()
    };

    let entry = project.entry_path();
    let entry_name = &project.config().project.entry;
    let imports = if session.store.exists(&entry) {
        let source = session
            .store
            .read_to_string(&entry)
            .with_context(|| format!("Failed to read {}", entry_name))?;
        derive_from_source(&source)
    } else {
        println!(
            "{} {} not found, no imports to scan.",
            "!".yellow(),
            entry_name
        );
        Vec::new()
    };

    let packages: Vec<String> = packages_from_imports(&imports)
        .into_iter()
        .filter(|pkg| !is_local_module(session, pkg))
        .collect();
    manifest.rewrite(&packages)?;
    println!(
        "{} Wrote {} package(s) from {} to {}",
        "✓".green(),
        packages.len(),
        entry_name,
        manifest.file_name()
    );

    if packages.is_empty() {
        println!("{} Nothing to install.", "!".yellow());
        return Ok(());
    }
    install_from(&python, &manifest)
}

/// `name.py` or a `name/` package in the project root.
fn is_local_module(session: &Session, name: &str) -> bool {
    let root = session.project.root();
    session.store.exists(&root.join(format!("{}.py", name)))
        || session.store.exists(&root.join(name))
}

fn create_venv(session: &Session) -> bool {
    let venv = &session.project.config().python.venv;
    match session.system_python().create_venv(venv) {
        Ok(out) if out.success => {
            println!("{} Created virtual environment ({})", "✓".green(), venv);
            true
        }
        Ok(out) => {
            println!(
                "{} Failed to create virtual environment ({})",
                "x".red(),
                out.status_text()
            );
            print_failure_detail(&out);
            false
        }
        Err(e) => {
            println!("{} Failed to create virtual environment: {:#}", "x".red(), e);
            false
        }
    }
}
