//! `malo run [file] [args...]`
//!
//! Runs one script, or every `.py` file in the project root in name order
//! when no file is given. Uses the venv interpreter when there is a venv.

use super::Session;
use crate::python::Python;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

pub fn run_scripts(session: &Session, file: Option<&str>, args: &[String]) -> Result<()> {
    let python = session.active_python();
    let root = session.project.root();

    if let Some(file) = file {
        return run_one(&python, &root.join(file), args);
    }

    println!(
        "{} No file given, running every .py file in {}",
        "!".yellow(),
        session.project.display_name()
    );

    let scripts = session
        .store
        .list_by_extension(root, "py")
        .context("Failed to read the project directory")?;
    if scripts.is_empty() {
        println!("{} No .py files found.", "!".yellow());
        return Ok(());
    }

    for script in scripts {
        if let Err(e) = run_one(&python, &script, args) {
            println!("{} {:#}", "x".red(), e);
        }
    }
    Ok(())
}

/// Echoes the script's output; a non-zero exit is reported, not returned.
fn run_one(python: &Python, script: &Path, args: &[String]) -> Result<()> {
    let name = script
        .file_name()
        .unwrap_or(script.as_os_str())
        .to_string_lossy();
    let out = python.run_script(script, args)?;

    print!("{}", out.stdout);
    if !out.success {
        println!("{} {} failed ({})", "x".red(), name, out.status_text());
        eprint!("{}", out.stderr);
    } else if !out.stderr.is_empty() {
        eprint!("{}", out.stderr);
    }
    Ok(())
}
