//! Configuration file support for Rigging.
//!
//! Rigging supports two configuration file locations:
//! - Global: `~/.rigging/config.toml` - User-wide defaults
//! - Project: `.rigging/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. The `[settings]`
//! section acts as a profile: any value set there replaces host detection.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::toolchain::GeneratorKind;
use crate::core::errors::ConfigurationFault;
use crate::core::settings::{Arch, BuildType, Compiler, Os, Settings};

/// Rigging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings profile
    pub settings: SettingsConfig,

    /// Toolchain defaults
    pub toolchain: ToolchainDefaults,
}

/// Settings values that override host detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub os: Option<String>,
    pub compiler: Option<String>,
    pub build_type: Option<String>,
    pub arch: Option<String>,
}

/// Toolchain defaults applied when the manifest is silent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainDefaults {
    /// Promote warnings to errors
    pub warnings_as_errors: Option<bool>,

    /// Default CMake generator
    pub generator: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Settings profile
        if other.settings.os.is_some() {
            self.settings.os = other.settings.os;
        }
        if other.settings.compiler.is_some() {
            self.settings.compiler = other.settings.compiler;
        }
        if other.settings.build_type.is_some() {
            self.settings.build_type = other.settings.build_type;
        }
        if other.settings.arch.is_some() {
            self.settings.arch = other.settings.arch;
        }

        // Toolchain defaults
        if other.toolchain.warnings_as_errors.is_some() {
            self.toolchain.warnings_as_errors = other.toolchain.warnings_as_errors;
        }
        if other.toolchain.generator.is_some() {
            self.toolchain.generator = other.toolchain.generator;
        }
    }

    /// Whether warnings should be errors by default. Off unless configured.
    pub fn warnings_as_errors(&self) -> bool {
        self.toolchain.warnings_as_errors.unwrap_or(false)
    }

    /// Parse the configured generator.
    pub fn generator(&self) -> Result<Option<GeneratorKind>, ConfigurationFault> {
        self.toolchain
            .generator
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}

/// Where a setting's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    CommandLine,
    Manifest,
    Config,
    Detected,
}

impl SettingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingSource::CommandLine => "command line",
            SettingSource::Manifest => "manifest",
            SettingSource::Config => "config",
            SettingSource::Detected => "detected",
        }
    }
}

/// A settings tuple with the origin of each value.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSettings {
    pub settings: Settings,
    pub os: SettingSource,
    pub compiler: SettingSource,
    pub build_type: SettingSource,
    pub arch: SettingSource,
}

impl SettingsConfig {
    /// Layer `overrides` (typically CLI flags) over this profile and fill
    /// the gaps from host detection.
    pub fn resolve(&self, overrides: &SettingsConfig) -> Result<ResolvedSettings, ConfigurationFault> {
        fn pick<T: std::str::FromStr<Err = ConfigurationFault>>(
            cli: &Option<String>,
            config: &Option<String>,
            detect: impl FnOnce() -> T,
        ) -> Result<(T, SettingSource), ConfigurationFault> {
            if let Some(value) = cli {
                return Ok((value.parse()?, SettingSource::CommandLine));
            }
            if let Some(value) = config {
                return Ok((value.parse()?, SettingSource::Config));
            }
            Ok((detect(), SettingSource::Detected))
        }

        let (os, os_source) = pick(&overrides.os, &self.os, Os::host)?;
        let (compiler, compiler_source) =
            pick(&overrides.compiler, &self.compiler, || Compiler::host(os))?;
        let (build_type, build_type_source) =
            pick(&overrides.build_type, &self.build_type, BuildType::default)?;
        let (arch, arch_source) = pick(&overrides.arch, &self.arch, Arch::host)?;

        Ok(ResolvedSettings {
            settings: Settings::new(os, compiler, build_type, arch),
            os: os_source,
            compiler: compiler_source,
            build_type: build_type_source,
            arch: arch_source,
        })
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.rigging/config.toml)
/// 2. Global config (~/.rigging/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global rigging config directory (~/.rigging).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".rigging"))
}

/// Get the project config path (.rigging/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".rigging").join("config.toml")
}

/// Pick the generator: command line, then manifest, then config, then the
/// default for the settings tuple.
pub fn resolve_generator(
    cli: Option<GeneratorKind>,
    manifest: Option<GeneratorKind>,
    config: Option<GeneratorKind>,
    settings: &Settings,
) -> (GeneratorKind, SettingSource) {
    [
        (cli, SettingSource::CommandLine),
        (manifest, SettingSource::Manifest),
        (config, SettingSource::Config),
    ]
    .into_iter()
    .find_map(|(kind, source)| kind.map(|k| (k, source)))
    .unwrap_or_else(|| (GeneratorKind::for_settings(settings), SettingSource::Detected))
}
