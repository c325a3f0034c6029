//! `malo add <pkg...>`
//!
//! Installs each package with pip, into the venv when there is one. When the
//! project has a manifest, packages it already lists are skipped and newly
//! installed ones are appended to it.

use super::{Session, print_failure_detail};
use crate::manifest::{self, is_listed};
use crate::ui;
use anyhow::Result;
use colored::*;

pub fn add_packages(session: &Session, packages: &[String]) -> Result<()> {
    let check = session.project.config().manifest.duplicate_check;
    let manifest = session.manifest();
    let python = session.active_python();

    if !session.has_venv() {
        println!(
            "{} No virtual environment found, installing with {}",
            "!".yellow(),
            python.program().display()
        );
    }

    let mut listed = if manifest.exists() {
        Some(manifest.read()?)
    } else {
        None
    };

    for pkg in packages {
        if !manifest::is_valid_requirement(pkg) {
            println!("{} '{}' is not a valid package name, skipping", "x".red(), pkg);
            continue;
        }

        if let Some(text) = &listed
            && is_listed(text, pkg, check)
        {
            println!(
                "{} {} is already in {}",
                "!".yellow(),
                pkg.bold(),
                manifest.file_name()
            );
            continue;
        }

        println!("{} Adding package: {}...", "📦".blue(), pkg.bold());
        let install = ui::with_spinner(format!("Installing {}...", pkg), || {
            python.pip_install(&[pkg])
        });
        match install {
            Ok(out) if out.success => println!("{} Installed {}", "✓".green(), pkg),
            Ok(out) => {
                println!(
                    "{} Failed to install {} ({})",
                    "x".red(),
                    pkg,
                    out.status_text()
                );
                print_failure_detail(&out);
                continue;
            }
            Err(e) => {
                println!("{} Failed to install {}: {:#}", "x".red(), pkg, e);
                continue;
            }
        }

        if let Some(text) = &mut listed {
            manifest.append(pkg)?;
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(pkg);
            text.push('\n');
            println!("{} Added {} to {}", "✓".green(), pkg, manifest.file_name());
        }
    }

    Ok(())
}
