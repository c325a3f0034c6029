//! `malo create <name> [--api]`
//!
//! Creates the project directory, a venv inside it, `main.py` and a
//! `.gitignore`. With `--api` it also installs FastAPI and uvicorn into the
//! venv and writes `run.sh` and `requirements.txt`. A project whose venv
//! cannot be created is still scaffolded, as a plain project.

use super::{Session, print_failure_detail};
use crate::project::Project;
use crate::python::Python;
use crate::templates;
use crate::ui;
use anyhow::{Context, Result};
use colored::*;

pub fn create_project(session: &Session, name: &str, api: bool) -> Result<()> {
    let project = session.project.child(name);
    let store = session.store;

    store
        .create_dir_all(project.root())
        .with_context(|| format!("Failed to create project directory '{}'", name))?;

    let venv = &project.config().python.venv;
    let system = Python::new(session.runner, project.system_python(), project.root());
    let mut api = api;

    if create_venv(&system, venv) {
        println!("{} Created virtual environment ({})", "✓".green(), venv);
    } else {
        println!(
            "{} Could not create a virtual environment. Create it later with: {} -m venv {}",
            "!".yellow(),
            system.program().display(),
            venv
        );
        if api {
            println!(
                "{} An API project needs a virtual environment; creating a plain project instead.",
                "!".yellow()
            );
            api = false;
        }
    }

    let main_code = if api {
        if let Err(e) = scaffold_api(session, &project) {
            println!("{} API scaffolding incomplete: {:#}", "x".red(), e);
        }
        templates::api_main()
    } else {
        templates::plain_main()
    };

    let main_path = project.root().join("main.py");
    store
        .write(&main_path, main_code)
        .context("Failed to write main.py")?;

    let gitignore = project.root().join(".gitignore");
    if !store.exists(&gitignore) {
        store.write(
            &gitignore,
            &templates::gitignore(venv, &project.config().project.cache_dir),
        )?;
    }

    println!(
        "{} Created new project: {} (template: {})",
        "✓".green(),
        name.bold(),
        if api { "api" } else { "plain" }.cyan()
    );
    println!("  cd {}\n  malo run", name);
    Ok(())
}

fn create_venv(system: &Python, venv: &str) -> bool {
    match ui::with_spinner("Creating virtual environment...", || system.create_venv(venv)) {
        Ok(out) if out.success => true,
        Ok(out) => {
            println!("{} venv failed ({})", "x".red(), out.status_text());
            print_failure_detail(&out);
            false
        }
        Err(e) => {
            println!("{} {:#}", "x".red(), e);
            false
        }
    }
}

/// Installs the API packages and writes `run.sh` and the manifest.
/// A failed install is reported but does not stop the scaffolding.
fn scaffold_api(session: &Session, project: &Project) -> Result<()> {
    let store = session.store;
    let venv_python = Python::new(session.runner, project.venv_python(), project.root());

    let install = ui::with_spinner("Installing fastapi and uvicorn...", || {
        venv_python.pip_install(templates::API_PACKAGES)
    });
    match install {
        Ok(out) if out.success => println!("{} Installed fastapi and uvicorn", "✓".green()),
        Ok(out) => {
            println!(
                "{} Failed to install fastapi and uvicorn ({})",
                "x".red(),
                out.status_text()
            );
            print_failure_detail(&out);
        }
        Err(e) => println!("{} {:#}", "x".red(), e),
    }

    let run_sh = project.root().join("run.sh");
    store
        .write(&run_sh, &templates::api_run_script(&project.config().python.venv))
        .context("Failed to write run.sh")?;
    store.set_executable(&run_sh)?;
    println!("{} Created run.sh. Start the server with ./run.sh", "✓".green());

    let manifest = project.manifest_path();
    store
        .write(&manifest, &templates::api_requirements())
        .with_context(|| format!("Failed to write {}", project.config().manifest.file))?;

    Ok(())
}
