//! `malo list [--json]`

use super::Session;
use crate::ui;
use anyhow::{Result, bail};
use colored::*;
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq)]
pub struct ManifestListing {
    pub manifest: String,
    pub packages: Vec<String>,
}

pub fn manifest_listing(session: &Session) -> Result<ManifestListing> {
    let manifest = session.manifest();
    if !manifest.exists() {
        bail!(
            "{} not found. Run 'malo init' to create one.",
            manifest.file_name()
        );
    }
    Ok(ManifestListing {
        manifest: manifest.file_name(),
        packages: manifest.entries()?,
    })
}

pub fn list_packages(session: &Session, json: bool) -> Result<()> {
    let listing = manifest_listing(session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.packages.is_empty() {
        println!("{} {} is empty.", "ℹ".blue(), listing.manifest);
        return Ok(());
    }

    let mut table = ui::Table::new(&["#", "Package"]);
    for (i, pkg) in listing.packages.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string().dimmed().to_string(), pkg.green().to_string()]);
    }
    table.print();
    Ok(())
}
