//! Global context for Rigging operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::manifest::find_manifest_in;
use crate::util::config::{global_config_dir, load_config, project_config_path, Config};

/// Manifest lookup failure.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no manifest found in `{}` or any parent directory (looked for Rigging.toml)", dir.display())]
    NotFound { dir: PathBuf },
}

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global Rigging data (~/.rigging/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        // RIGGING_HOME overrides ~/.rigging
        let home = std::env::var_os("RIGGING_HOME")
            .map(PathBuf::from)
            .or_else(global_config_dir)
            .unwrap_or_else(|| PathBuf::from(".rigging"));

        GlobalContext {
            cwd,
            home,
        }
    }

    /// Override the home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Rigging home directory (~/.rigging/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Find Rigging.toml starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        self.cwd
            .ancestors()
            .find_map(find_manifest_in)
            .ok_or_else(|| ManifestError::NotFound {
                dir: self.cwd.clone(),
            })
    }

    /// Find the project root (directory containing Rigging.toml).
    pub fn find_project_root(&self) -> Result<PathBuf, ManifestError> {
        let manifest = self.find_manifest()?;
        Ok(manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone()))
    }

    /// Load global and project config for a project root.
    pub fn load_config(&self, project_root: &Path) -> Config {
        load_config(&self.config_path(), &project_config_path(project_root))
    }
}
