//! `malo clean`
//!
//! Removes the bytecode cache directory and any stray `.pyc` files in the
//! project root.

use super::Session;
use anyhow::{Context, Result};
use colored::*;

pub const BYTECODE_EXTENSION: &str = "pyc";

pub fn clean(session: &Session) -> Result<()> {
    let project = session.project;
    let store = session.store;
    let mut cleaned = false;

    let cache_dir = project.cache_dir();
    if store.exists(&cache_dir) {
        match store.remove_dir_all(&cache_dir) {
            Ok(()) => {
                println!(
                    "{} Removed {}/",
                    "🗑️".red(),
                    project.config().project.cache_dir
                );
                cleaned = true;
            }
            Err(e) => println!("{} {:#}", "x".red(), e),
        }
    }

    let bytecode = store
        .list_by_extension(project.root(), BYTECODE_EXTENSION)
        .context("Failed to read the project directory")?;
    for file in bytecode {
        let name = file
            .file_name()
            .unwrap_or(file.as_os_str())
            .to_string_lossy()
            .to_string();
        match store.remove_file(&file) {
            Ok(()) => {
                println!("{} Removed {}", "🗑️".red(), name);
                cleaned = true;
            }
            Err(e) => println!("{} {:#}", "x".red(), e),
        }
    }

    if cleaned {
        println!("{} Clean complete.", "✓".green());
    } else {
        println!("{} Nothing to clean", "!".yellow());
    }
    Ok(())
}
