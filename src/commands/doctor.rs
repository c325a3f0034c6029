//! `malo doctor`
//!
//! Reports whether the pieces malo relies on are in place: the system
//! interpreter, pip, the project venv, the manifest and the entry file.

use super::Session;
use crate::process::ProcessOutput;
use crate::python::Python;
use crate::ui;
use anyhow::Result;
use colored::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

impl Check {
    fn new(name: &str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            ok,
            detail: detail.into(),
        }
    }
}

pub fn run_doctor(session: &Session) -> Result<()> {
    println!("{} Checking Python setup...", "🚑".red());
    println!(
        "   {} ({})",
        std::env::consts::OS.green(),
        std::env::consts::ARCH.cyan()
    );

    let mut table = ui::Table::new(&["Status", "Check", "Details"]);
    for check in collect_checks(session) {
        let status = if check.ok {
            "✓".green().to_string()
        } else {
            "x".red().to_string()
        };
        table.add_row(vec![status, check.name, check.detail]);
    }
    table.print();
    Ok(())
}

pub fn collect_checks(session: &Session) -> Vec<Check> {
    let project = session.project;
    let system = session.system_python();
    let mut checks = vec![
        probe("Interpreter", &system, system.version()),
        probe("pip", &system, system.pip_version()),
    ];

    let venv = &project.config().python.venv;
    if session.has_venv() {
        let venv_python = session.venv_python();
        let mut check = probe("Virtual environment", &venv_python, venv_python.version());
        check.detail = format!("{} ({})", venv, check.detail);
        checks.push(check);
    } else if session.store.exists(&project.venv_dir()) {
        checks.push(Check::new(
            "Virtual environment",
            false,
            format!("{} has no interpreter (run 'malo init')", venv),
        ));
    } else {
        checks.push(Check::new(
            "Virtual environment",
            false,
            format!("{} missing (run 'malo init')", venv),
        ));
    }

    let manifest = session.manifest();
    let manifest_check = if manifest.exists() {
        match manifest.entries() {
            Ok(entries) => Check::new(
                "Manifest",
                true,
                format!("{} ({} packages)", manifest.file_name(), entries.len()),
            ),
            Err(e) => Check::new("Manifest", false, format!("{:#}", e)),
        }
    } else {
        Check::new(
            "Manifest",
            false,
            format!("{} missing", manifest.file_name()),
        )
    };
    checks.push(manifest_check);

    let entry = &project.config().project.entry;
    checks.push(if session.store.exists(&project.entry_path()) {
        Check::new("Entry file", true, entry.as_str())
    } else {
        Check::new("Entry file", false, format!("{} missing", entry))
    });

    checks
}

/// Turns a `--version` style probe into a check, keeping the first line of
/// its output.
fn probe(name: &str, python: &Python, result: Result<ProcessOutput>) -> Check {
    match result {
        Ok(out) if out.success => {
            let text = if out.stdout.trim().is_empty() {
                &out.stderr
            } else {
                &out.stdout
            };
            let first = text.lines().next().unwrap_or("found").trim().to_string();
            Check::new(name, true, first)
        }
        Ok(out) => Check::new(name, false, out.status_text()),
        Err(_) => Check::new(
            name,
            false,
            format!("{} not found", python.program().display()),
        ),
    }
}
