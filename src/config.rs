//! Configuration parsing.
//!
//! Settings come from the first file found of:
//!
//! 1. `<project>/malo.toml`
//! 2. `~/.malo/config.toml`
//!
//! and fall back to built-in defaults otherwise. Every key is optional.
//!
//! ```toml
//! [python]
//! interpreter = "python3"
//! venv = ".venv"
//!
//! [project]
//! entry = "main.py"
//! cache_dir = "__pycache__"
//!
//! [manifest]
//! file = "requirements.txt"
//! duplicate_check = "substring" # or "exact"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "malo.toml";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct MaloConfig {
    pub python: PythonConfig,
    pub project: ProjectConfig,
    pub manifest: ManifestConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PythonConfig {
    /// Interpreter used when no venv exists, and to create one.
    pub interpreter: String,
    /// Venv directory, relative to the project root.
    pub venv: String,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            venv: ".venv".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Entry-point file scanned by `malo init`.
    pub entry: String,
    pub cache_dir: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            entry: "main.py".to_string(),
            cache_dir: "__pycache__".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ManifestConfig {
    pub file: String,
    pub duplicate_check: DuplicateCheck,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            file: "requirements.txt".to_string(),
            duplicate_check: DuplicateCheck::default(),
        }
    }
}

/// How `malo add` decides a package is already listed.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateCheck {
    /// The name appears anywhere in the manifest text.
    #[default]
    Substring,
    /// Some manifest line equals the name once trimmed.
    Exact,
}

pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".malo").join("config.toml"))
}

pub fn load_config(root: &Path) -> Result<MaloConfig> {
    let local = root.join(CONFIG_FILE);
    if local.exists() {
        return parse_config_file(&local);
    }

    if let Some(global) = global_config_path()
        && global.exists()
    {
        return parse_config_file(&global);
    }

    Ok(MaloConfig::default())
}

pub fn parse_config_file(path: &Path) -> Result<MaloConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse {} - check for syntax errors (missing quotes, brackets)",
            path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MaloConfig::default();
        assert_eq!(config.python.interpreter, "python3");
        assert_eq!(config.python.venv, ".venv");
        assert_eq!(config.project.entry, "main.py");
        assert_eq!(config.project.cache_dir, "__pycache__");
        assert_eq!(config.manifest.file, "requirements.txt");
        assert_eq!(config.manifest.duplicate_check, DuplicateCheck::Substring);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: MaloConfig = toml::from_str(
            r#"
[python]
interpreter = "python3.12"

[manifest]
duplicate_check = "exact"
"#,
        )
        .unwrap();
        assert_eq!(config.python.interpreter, "python3.12");
        assert_eq!(config.python.venv, ".venv");
        assert_eq!(config.manifest.file, "requirements.txt");
        assert_eq!(config.manifest.duplicate_check, DuplicateCheck::Exact);
    }

    #[test]
    fn test_unknown_duplicate_check_is_rejected() {
        let parsed: Result<MaloConfig, _> = toml::from_str(
            r#"
[manifest]
duplicate_check = "fuzzy"
"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_load_project_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[project]\nentry = \"app.py\"\n",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.project.entry, "app.py");
    }

    #[test]
    fn test_malformed_project_config_names_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[python\n").unwrap();

        let err = load_config(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("malo.toml"));
    }
}
