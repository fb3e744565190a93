//! How the target architecture reaches CMake.
//!
//! Kept apart from the curated warning flags: the architecture changes the
//! toolchain file but never the compile flag list.

use crate::core::settings::{Arch, Compiler, Os, Settings};

use super::GeneratorKind;

/// The CMake mechanism that selects the target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchitectureBlock {
    /// `-m32` or `-m64`, appended to the compile and link flags
    MachineFlag(&'static str),
    /// `CMAKE_GENERATOR_PLATFORM` for Visual Studio generators
    GeneratorPlatform(&'static str),
    /// `CMAKE_OSX_ARCHITECTURES` on macOS
    OsxArchitectures(&'static str),
    /// The compiler's own default target applies
    Native,
}

impl ArchitectureBlock {
    /// Pick the mechanism for a settings tuple and resolved generator.
    pub fn for_settings(settings: &Settings, generator: GeneratorKind) -> Self {
        if settings.os == Os::Macos {
            return ArchitectureBlock::OsxArchitectures(match settings.arch {
                Arch::X86 => "i386",
                Arch::X86_64 => "x86_64",
                Arch::Armv7 => "armv7",
                Arch::Armv8 => "arm64",
            });
        }

        if generator == GeneratorKind::VisualStudio17 {
            return ArchitectureBlock::GeneratorPlatform(match settings.arch {
                Arch::X86 => "Win32",
                Arch::X86_64 => "x64",
                Arch::Armv7 => "ARM",
                Arch::Armv8 => "ARM64",
            });
        }

        match (settings.compiler, settings.arch) {
            (Compiler::Msvc, _) => ArchitectureBlock::Native,
            (_, Arch::X86) => ArchitectureBlock::MachineFlag("-m32"),
            (_, Arch::X86_64) => ArchitectureBlock::MachineFlag("-m64"),
            _ => ArchitectureBlock::Native,
        }
    }

    pub fn machine_flag(&self) -> Option<&'static str> {
        match self {
            ArchitectureBlock::MachineFlag(flag) => Some(flag),
            _ => None,
        }
    }

    pub fn generator_platform(&self) -> Option<&'static str> {
        match self {
            ArchitectureBlock::GeneratorPlatform(platform) => Some(platform),
            _ => None,
        }
    }

    pub fn osx_architectures(&self) -> Option<&'static str> {
        match self {
            ArchitectureBlock::OsxArchitectures(archs) => Some(archs),
            _ => None,
        }
    }
}
