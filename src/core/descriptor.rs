//! The build configuration descriptor.
//!
//! A descriptor answers three questions for a host, always asked in the
//! same order: what does the build require, where do its folders go, and
//! which toolchain does it compile with. Every answer is a pure function of
//! the descriptor and the settings tuple.

use std::path::Path;

use crate::builder::layout::{select_layout, Layout};
use crate::builder::toolchain::{
    generate_toolchain, Define, GeneratorKind, ToolchainConfig, ToolchainOptions,
};
use crate::core::errors::ConfigurationFault;
use crate::core::manifest::Manifest;
use crate::core::requirement::{DependencyPin, RequirementList};
use crate::core::settings::Settings;

/// Pins declared by the default descriptor, in declaration order.
pub fn default_requirements() -> RequirementList {
    RequirementList::from_unique(vec![
        DependencyPin::pinned("glfw", "3.3.8"),
        DependencyPin::pinned("glm", "cci.20230113"),
    ])
}

/// Trait for build configuration descriptors.
///
/// Hosts call the hooks in order: `requirements`, `layout`, `generate`.
/// None of them perform I/O.
pub trait BuildRecipe: Send + Sync {
    /// Human-readable descriptor name.
    fn name(&self) -> &str;

    /// The ordered dependency pins.
    fn requirements(&self) -> &RequirementList;

    /// Folder layout for the settings tuple.
    fn layout(&self, settings: &Settings) -> Layout;

    /// Toolchain description for the settings tuple.
    fn generate(&self, settings: &Settings) -> ToolchainConfig;
}

/// An immutable descriptor: pins plus toolchain options.
///
/// Constructed once, validated on construction, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDescriptor {
    name: String,
    requirements: RequirementList,
    toolchain: ToolchainOptions,
}

impl BuildDescriptor {
    /// Create a descriptor from already-validated parts.
    pub fn new(
        name: impl Into<String>,
        requirements: RequirementList,
        toolchain: ToolchainOptions,
    ) -> Self {
        BuildDescriptor {
            name: name.into(),
            requirements,
            toolchain,
        }
    }

    /// Build a descriptor from a manifest.
    ///
    /// `warnings_as_errors` applies when the manifest leaves the switch unset.
    pub fn from_manifest(
        manifest: &Manifest,
        warnings_as_errors: bool,
    ) -> Result<Self, ConfigurationFault> {
        let requirements = RequirementList::parse(&manifest.requires)?;

        let generator = manifest
            .toolchain
            .generator
            .as_deref()
            .map(str::parse::<GeneratorKind>)
            .transpose()?;

        let defines = manifest
            .toolchain
            .defines
            .iter()
            .map(|d| d.parse::<Define>())
            .collect::<Result<Vec<_>, _>>()?;

        let toolchain = ToolchainOptions {
            warnings_as_errors: manifest
                .toolchain
                .warnings_as_errors
                .unwrap_or(warnings_as_errors),
            generator,
            extra_cxxflags: manifest.toolchain.extra_cxxflags.clone(),
            defines,
        };

        Ok(BuildDescriptor::new(
            manifest.package.name.clone(),
            requirements,
            toolchain,
        ))
    }

    /// Load a manifest from disk and build a descriptor from it.
    pub fn load(path: &Path, warnings_as_errors: bool) -> Result<Self, ConfigurationFault> {
        let manifest = Manifest::load(path)?;
        BuildDescriptor::from_manifest(&manifest, warnings_as_errors)
    }

    /// A copy with the warnings-as-errors switch forced on.
    pub fn with_warnings_as_errors(mut self) -> Self {
        self.toolchain.warnings_as_errors = true;
        self
    }

    /// A copy with an explicit generator.
    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.toolchain.generator = Some(generator);
        self
    }

    pub fn toolchain_options(&self) -> &ToolchainOptions {
        &self.toolchain
    }

    /// A manifest equivalent to this descriptor.
    pub fn to_manifest(&self) -> Manifest {
        let mut manifest = Manifest::default();
        manifest.package.name = self.name.clone();
        manifest.package.version = Some("0.1.0".to_string());
        manifest.requires = self.requirements.iter().map(|p| p.to_string()).collect();
        // Left unset when off so config and the command line can still turn it on.
        manifest.toolchain.warnings_as_errors = self.toolchain.warnings_as_errors.then_some(true);
        manifest.toolchain.generator = self.toolchain.generator.map(|g| g.as_str().to_string());
        manifest.toolchain.extra_cxxflags = self.toolchain.extra_cxxflags.clone();
        manifest.toolchain.defines = self
            .toolchain
            .defines
            .iter()
            .map(|d| d.as_definition())
            .collect();
        manifest
    }
}

impl Default for BuildDescriptor {
    fn default() -> Self {
        BuildDescriptor {
            name: "vulkan-tutorial".to_string(),
            requirements: default_requirements(),
            toolchain: ToolchainOptions::default(),
        }
    }
}

impl BuildRecipe for BuildDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> &RequirementList {
        &self.requirements
    }

    fn layout(&self, settings: &Settings) -> Layout {
        select_layout(settings, self.toolchain.generator)
    }

    fn generate(&self, settings: &Settings) -> ToolchainConfig {
        generate_toolchain(settings, &self.toolchain)
    }
}
