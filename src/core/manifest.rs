//! Rigging.toml manifest parsing and schema.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigurationFault;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Rigging.toml";

/// The project manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Dependency references (`name/version`), in declaration order.
    /// Must stay ahead of the table fields for TOML serialization.
    #[serde(default)]
    pub requires: Vec<String>,

    pub package: PackageSection,

    #[serde(default)]
    pub toolchain: ToolchainSection,
}

/// The `[package]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The `[toolchain]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainSection {
    /// Promote warnings to errors. `None` defers to config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings_as_errors: Option<bool>,

    /// CMake generator name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// Flags appended after the curated warnings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_cxxflags: Vec<String>,

    /// `NAME` or `NAME=value`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defines: Vec<String>,
}

impl Manifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigurationFault> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigurationFault::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Manifest::parse(&contents, path)
    }

    /// Parse manifest text; `path` is only used for error reporting.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigurationFault> {
        let manifest: Manifest =
            toml::from_str(contents).map_err(|e| ConfigurationFault::Manifest {
                path: path.to_path_buf(),
                message: e.message().to_string(),
            })?;

        if manifest.package.name.trim().is_empty() {
            return Err(ConfigurationFault::Manifest {
                path: path.to_path_buf(),
                message: "`package.name` must not be empty".to_string(),
            });
        }

        Ok(manifest)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Find the manifest in `dir`.
pub fn find_manifest_in(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(MANIFEST_NAME);
    path.is_file().then_some(path)
}
