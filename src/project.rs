//! Project root and the paths derived from it.
//!
//! Nothing in malo reads the process working directory after startup: the
//! CLI resolves a root once and every manifest, venv and script path hangs
//! off a [`Project`].

use crate::config::{self, MaloConfig};
use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: MaloConfig,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: MaloConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Opens the project at `root`, reading `malo.toml` if present.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = config::load_config(&root)?;
        Ok(Self::new(root, config))
    }

    /// A new project in a subdirectory, sharing this project's settings.
    pub fn child(&self, name: &str) -> Self {
        Self::new(self.root.join(name), self.config.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &MaloConfig {
        &self.config
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.config.manifest.file)
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(&self.config.python.venv)
    }

    pub fn venv_python(&self) -> PathBuf {
        venv_interpreter(&self.venv_dir())
    }

    pub fn system_python(&self) -> PathBuf {
        PathBuf::from(&self.config.python.interpreter)
    }

    pub fn entry_path(&self) -> PathBuf {
        self.root.join(&self.config.project.entry)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.config.project.cache_dir)
    }

    /// Directory name used in user-facing messages.
    pub fn display_name(&self) -> String {
        self.root
            .file_name()
            .unwrap_or(self.root.as_os_str())
            .to_string_lossy()
            .to_string()
    }
}

/// Interpreter inside a venv directory.
pub fn venv_interpreter(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts").join("python.exe")
    } else {
        venv_dir.join("bin").join("python")
    }
}
