//! Toolchain generation for CMake builds.
//!
//! This module maps a settings tuple to a `ToolchainConfig`: the CMake
//! generator to drive, the build type (single-config generators only), the
//! target architecture and the ordered compile flags injected into every
//! translation unit.
//!
//! Generator selection priority:
//! 1. An explicit generator from the manifest or config
//! 2. `msvc` compilers use Visual Studio
//! 3. `gcc` on Windows uses MinGW Makefiles
//! 4. Unix Makefiles otherwise

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::errors::ConfigurationFault;
use crate::core::settings::{Arch, BuildType, Compiler, Os, Settings};
use crate::util::hash::Fingerprint;

mod arch;
pub mod cmake;
mod warnings;

pub use arch::ArchitectureBlock;
pub use warnings::{WarningFlag, WarningSeverity, CURATED_WARNINGS};

/// A CMake generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    UnixMakefiles,
    MinGwMakefiles,
    Ninja,
    NinjaMultiConfig,
    VisualStudio17,
    Xcode,
}

impl GeneratorKind {
    /// The generator name as CMake spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::UnixMakefiles => "Unix Makefiles",
            GeneratorKind::MinGwMakefiles => "MinGW Makefiles",
            GeneratorKind::Ninja => "Ninja",
            GeneratorKind::NinjaMultiConfig => "Ninja Multi-Config",
            GeneratorKind::VisualStudio17 => "Visual Studio 17 2022",
            GeneratorKind::Xcode => "Xcode",
        }
    }

    /// Whether one build tree holds every build type.
    pub fn is_multi_config(&self) -> bool {
        matches!(
            self,
            GeneratorKind::NinjaMultiConfig | GeneratorKind::VisualStudio17 | GeneratorKind::Xcode
        )
    }

    /// The default generator for a settings tuple.
    pub fn for_settings(settings: &Settings) -> Self {
        match (settings.compiler, settings.os) {
            (Compiler::Msvc, _) => GeneratorKind::VisualStudio17,
            (Compiler::Gcc, Os::Windows) => GeneratorKind::MinGwMakefiles,
            _ => GeneratorKind::UnixMakefiles,
        }
    }

    /// Resolve the generator: an explicit override wins over settings.
    pub fn select(settings: &Settings, override_kind: Option<GeneratorKind>) -> Self {
        override_kind.unwrap_or_else(|| GeneratorKind::for_settings(settings))
    }
}

impl FromStr for GeneratorKind {
    type Err = ConfigurationFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unix makefiles" | "make" => Ok(GeneratorKind::UnixMakefiles),
            "mingw makefiles" | "mingw" => Ok(GeneratorKind::MinGwMakefiles),
            "ninja" => Ok(GeneratorKind::Ninja),
            "ninja multi-config" => Ok(GeneratorKind::NinjaMultiConfig),
            "visual studio 17 2022" | "visual studio" | "vs2022" => {
                Ok(GeneratorKind::VisualStudio17)
            }
            "xcode" => Ok(GeneratorKind::Xcode),
            _ => Err(ConfigurationFault::UnknownGenerator {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GeneratorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GeneratorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A preprocessor definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Define {
    /// Simple flag: -DFOO
    Flag(String),
    /// Key-value: -DFOO=bar
    KeyValue { name: String, value: String },
}

impl Define {
    /// Get the define name.
    pub fn name(&self) -> &str {
        match self {
            Define::Flag(n) => n,
            Define::KeyValue { name, .. } => name,
        }
    }

    /// Get the define value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Define::Flag(_) => None,
            Define::KeyValue { value, .. } => Some(value),
        }
    }

    /// `NAME` or `NAME=value`, as CMake's compile definitions take it.
    pub fn as_definition(&self) -> String {
        match self {
            Define::Flag(name) => name.clone(),
            Define::KeyValue { name, value } => format!("{}={}", name, value),
        }
    }
}

impl FromStr for Define {
    type Err = ConfigurationFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationFault::InvalidDefine {
            value: s.to_string(),
        };

        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };

        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid());
        }

        Ok(match value {
            Some(value) => Define::KeyValue {
                name: name.to_string(),
                value: value.to_string(),
            },
            None => Define::Flag(name.to_string()),
        })
    }
}

/// Descriptor-level toolchain choices that do not come from settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainOptions {
    /// Promote every enabled warning to an error. Off unless asked for.
    pub warnings_as_errors: bool,
    /// Explicit CMake generator
    pub generator: Option<GeneratorKind>,
    /// Extra flags appended after the curated warnings
    pub extra_cxxflags: Vec<String>,
    /// Preprocessor definitions, in declaration order
    pub defines: Vec<Define>,
}

/// The generated toolchain description.
///
/// Built once per configuration pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    extra_compile_flags: Vec<String>,
    generator: GeneratorKind,
    warnings_as_errors: bool,
    build_type: Option<BuildType>,
    configuration: BuildType,
    arch: Arch,
    architecture: ArchitectureBlock,
    defines: Vec<Define>,
}

impl ToolchainConfig {
    /// Compile flags in emission order.
    pub fn extra_compile_flags(&self) -> &[String] {
        &self.extra_compile_flags
    }

    pub fn generator(&self) -> GeneratorKind {
        self.generator
    }

    pub fn warnings_as_errors(&self) -> bool {
        self.warnings_as_errors
    }

    /// Build type baked into the toolchain; `None` for multi-config generators.
    pub fn build_type(&self) -> Option<BuildType> {
        self.build_type
    }

    /// The requested build type, also for multi-config generators where it
    /// is picked at build time rather than baked in.
    pub fn configuration(&self) -> BuildType {
        self.configuration
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn architecture(&self) -> ArchitectureBlock {
        self.architecture
    }

    pub fn defines(&self) -> &[Define] {
        &self.defines
    }

    /// How the enabled warnings are classified.
    pub fn warning_severity(&self) -> WarningSeverity {
        WarningSeverity::from_switch(self.warnings_as_errors)
    }

    /// Stable content hash of everything the toolchain injects.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        fp.update_str(self.generator.as_str());
        fp.update_opt(self.build_type.map(|b| b.as_str()));
        fp.update_bool(self.warnings_as_errors);
        fp.update_str(self.arch.as_str());
        fp.update_opt(self.architecture.machine_flag());
        fp.update_opt(self.architecture.generator_platform());
        fp.update_opt(self.architecture.osx_architectures());
        for flag in &self.extra_compile_flags {
            fp.update_str(flag);
        }
        for define in &self.defines {
            fp.update_str(&define.as_definition());
        }
        fp.finish()
    }
}

/// Generate the toolchain for a settings tuple.
///
/// Pure: the same settings and options always give the same config.
pub fn generate_toolchain(settings: &Settings, options: &ToolchainOptions) -> ToolchainConfig {
    let generator = GeneratorKind::select(settings, options.generator);

    let extra_compile_flags = CURATED_WARNINGS
        .iter()
        .map(|w| w.as_flag().to_string())
        .chain(options.extra_cxxflags.iter().cloned())
        .collect();

    let build_type = if generator.is_multi_config() {
        None
    } else {
        Some(settings.build_type)
    };

    let architecture = ArchitectureBlock::for_settings(settings, generator);

    tracing::debug!(
        "toolchain for {}: generator `{}`, architecture {:?}, warnings as errors: {}",
        settings,
        generator,
        architecture,
        options.warnings_as_errors
    );

    ToolchainConfig {
        extra_compile_flags,
        generator,
        warnings_as_errors: options.warnings_as_errors,
        build_type,
        configuration: settings.build_type,
        arch: settings.arch,
        architecture,
        defines: options.defines.clone(),
    }
}
