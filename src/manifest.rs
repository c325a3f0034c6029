//! Requirements manifest reconciler.
//!
//! The manifest is a plain text file with one requirement per line
//! (`requirements.txt` by default). The free functions here are pure text
//! operations; [`Manifest`] applies them to a file through a [`FileStore`].
//!
//! Two matching rules coexist:
//!
//! - `add` asks [`contains`], a raw substring test, unless the project opts
//!   into [`DuplicateCheck::Exact`]. With the substring rule `requests` counts
//!   as present when only `python-requests` is listed.
//! - `remove` always drops lines whose trimmed value equals the name exactly.

use crate::config::DuplicateCheck;
use crate::python;
use crate::store::FileStore;
use anyhow::Result;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?(?:\[[A-Za-z0-9._,\s-]*\])?(?:\s*[<>=!~].*)?$",
    )
    .expect("requirement pattern is valid")
});

/// True iff `pkg` occurs anywhere in `text`.
pub fn contains(text: &str, pkg: &str) -> bool {
    text.contains(pkg)
}

/// True iff some line of `text`, trimmed, equals `pkg`.
pub fn contains_entry(text: &str, pkg: &str) -> bool {
    text.lines().any(|line| line.trim() == pkg)
}

pub fn is_listed(text: &str, pkg: &str, check: DuplicateCheck) -> bool {
    match check {
        DuplicateCheck::Substring => contains(text, pkg),
        DuplicateCheck::Exact => contains_entry(text, pkg),
    }
}

/// Keeps every non-empty line whose trimmed value is not one of `names`.
/// The result always ends with a newline.
pub fn remove_lines<S: AsRef<str>>(text: &str, names: &[S]) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !line.is_empty())
        .filter(|line| !names.iter().any(|name| line.trim() == name.as_ref()))
        .collect();
    format!("{}\n", kept.join("\n"))
}

/// Module names from `import X` and `from X import Y` lines, in source order.
///
/// Only the first token after the keyword is taken, so `import numpy as np`
/// yields `numpy`. Duplicates are kept.
pub fn derive_from_source(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            if let Some(rest) = line.strip_prefix("import ") {
                rest.split_whitespace()
                    .next()
                    .map(|module| module.trim_end_matches(','))
            } else if let Some(rest) = line.strip_prefix("from ") {
                rest.split(' ').next()
            } else {
                None
            }
        })
        .filter(|module| !module.is_empty())
        .map(String::from)
        .collect()
}

/// Turns raw import names into installable package names: top-level segment
/// only, no relative imports, no standard library, first occurrence wins.
///
/// A raw name still carrying `import a,b` or `a;b` residue is split at the
/// separator. Names pip would not accept as a requirement are dropped.
pub fn packages_from_imports(imports: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    imports
        .iter()
        .filter_map(|module| module.split(';').next())
        .flat_map(|module| module.split(','))
        .map(str::trim)
        .filter(|module| !module.starts_with('.'))
        .filter_map(|module| module.split('.').next())
        .filter(|top| is_valid_requirement(top) && !python::is_stdlib_module(top))
        .filter(|top| seen.insert(top.to_string()))
        .map(String::from)
        .collect()
}

/// Whether `spec` looks like something pip accepts as a requirement:
/// a project name, optional `[extras]`, optional version clause.
pub fn is_valid_requirement(spec: &str) -> bool {
    REQUIREMENT_RE.is_match(spec)
}

/// The manifest file of one project.
pub struct Manifest<'a> {
    store: &'a dyn FileStore,
    path: PathBuf,
}

impl<'a> Manifest<'a> {
    pub fn new(store: &'a dyn FileStore, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .to_string()
    }

    pub fn exists(&self) -> bool {
        self.store.exists(&self.path)
    }

    pub fn read(&self) -> Result<String> {
        self.store.read_to_string(&self.path)
    }

    /// Creates an empty manifest if there is none. Returns whether it did.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.store.write(&self.path, "")?;
        Ok(true)
    }

    /// Trimmed, non-empty lines.
    pub fn entries(&self) -> Result<Vec<String>> {
        Ok(self
            .read()?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Appends `pkg` on its own line, creating the file if needed.
    ///
    /// A manifest last written by [`Manifest::rewrite`] has no trailing
    /// newline; one is inserted first so the new entry never fuses with the
    /// last existing one.
    pub fn append(&self, pkg: &str) -> Result<()> {
        let needs_break = self.exists() && {
            let text = self.read()?;
            !text.is_empty() && !text.ends_with('\n')
        };
        let line = if needs_break {
            format!("\n{}\n", pkg)
        } else {
            format!("{}\n", pkg)
        };
        self.store.append(&self.path, &line)
    }

    /// Drops the lines exactly matching `names` and writes the rest back.
    pub fn remove_all<S: AsRef<str>>(&self, names: &[S]) -> Result<String> {
        let kept = remove_lines(&self.read()?, names);
        self.store.write(&self.path, &kept)?;
        Ok(kept)
    }

    /// Replaces the manifest with `pkgs`, one per line.
    pub fn rewrite<S: AsRef<str>>(&self, pkgs: &[S]) -> Result<()> {
        let body = pkgs
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        self.store.write(&self.path, &body)
    }
}
