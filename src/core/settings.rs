//! Build settings: the `(os, compiler, build_type, arch)` tuple.
//!
//! Settings are supplied by the environment (CLI flags, config profiles or
//! host detection) and are never chosen by the descriptor itself.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigurationFault;

/// Operating system the build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Macos,
    Windows,
    Freebsd,
}

impl Os {
    pub const NAMES: &'static [&'static str] = &["linux", "macos", "windows", "freebsd"];

    /// Detect the host operating system.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "macos" => Os::Macos,
            "windows" => Os::Windows,
            "freebsd" => Os::Freebsd,
            _ => Os::Linux,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Macos => "macos",
            Os::Windows => "windows",
            Os::Freebsd => "freebsd",
        }
    }
}

impl FromStr for Os {
    type Err = ConfigurationFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Os::Linux),
            "macos" | "darwin" | "osx" => Ok(Os::Macos),
            "windows" | "win32" => Ok(Os::Windows),
            "freebsd" => Ok(Os::Freebsd),
            _ => Err(unknown("os", s, Os::NAMES)),
        }
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compiler {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl Compiler {
    pub const NAMES: &'static [&'static str] = &["gcc", "clang", "apple-clang", "msvc"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::AppleClang => "apple-clang",
            Compiler::Msvc => "msvc",
        }
    }

    /// Infer the compiler family from a compiler executable path.
    ///
    /// Handles common spellings:
    /// - gcc, g++, x86_64-linux-gnu-gcc -> gcc
    /// - clang, clang++, clang-17 -> clang (apple-clang on macOS)
    /// - cl, cl.exe -> msvc
    /// - cc, c++ -> platform default
    pub fn from_executable(path: &Path, os: Os) -> Option<Self> {
        let stem = path.file_stem()?.to_string_lossy().to_ascii_lowercase();

        if stem == "cl" {
            return Some(Compiler::Msvc);
        }

        if stem.contains("clang") {
            return Some(if os == Os::Macos {
                Compiler::AppleClang
            } else {
                Compiler::Clang
            });
        }

        if stem.ends_with("gcc") || stem.ends_with("g++") {
            return Some(Compiler::Gcc);
        }

        if stem == "cc" || stem == "c++" {
            return Some(Compiler::default_for(os));
        }

        None
    }

    /// The compiler a platform ships by default.
    pub fn default_for(os: Os) -> Self {
        match os {
            Os::Macos => Compiler::AppleClang,
            Os::Windows => Compiler::Msvc,
            Os::Freebsd => Compiler::Clang,
            Os::Linux => Compiler::Gcc,
        }
    }

    /// Detect the host compiler.
    ///
    /// Detection priority:
    /// 1. `CXX` then `CC` environment variables
    /// 2. Searching PATH for common compilers
    /// 3. The platform default
    pub fn host(os: Os) -> Self {
        for var in ["CXX", "CC"] {
            if let Ok(value) = std::env::var(var) {
                if let Some(compiler) = Compiler::from_executable(Path::new(&value), os) {
                    tracing::debug!("compiler `{}` from ${}", compiler, var);
                    return compiler;
                }
            }
        }

        let candidates: &[&str] = match os {
            Os::Windows => &["cl", "g++", "clang++"],
            Os::Macos => &["clang++", "g++"],
            _ => &["g++", "clang++"],
        };

        for candidate in candidates {
            if let Ok(path) = which::which(candidate) {
                if let Some(compiler) = Compiler::from_executable(&path, os) {
                    tracing::debug!("compiler `{}` from {}", compiler, path.display());
                    return compiler;
                }
            }
        }

        Compiler::default_for(os)
    }
}

impl FromStr for Compiler {
    type Err = ConfigurationFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcc" | "g++" => Ok(Compiler::Gcc),
            "clang" | "clang++" => Ok(Compiler::Clang),
            "apple-clang" | "appleclang" => Ok(Compiler::AppleClang),
            "msvc" | "cl" | "visual studio" => Ok(Compiler::Msvc),
            _ => Err(unknown("compiler", s, Compiler::NAMES)),
        }
    }
}

/// CMake build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const NAMES: &'static [&'static str] =
        &["Debug", "Release", "RelWithDebInfo", "MinSizeRel"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl FromStr for BuildType {
    type Err = ConfigurationFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(unknown("build type", s, BuildType::NAMES)),
        }
    }
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    Armv7,
    Armv8,
}

impl Arch {
    pub const NAMES: &'static [&'static str] = &["x86", "x86_64", "armv7", "armv8"];

    /// Detect the host architecture.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "arm" => Arch::Armv7,
            "aarch64" => Arch::Armv8,
            _ => Arch::X86_64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Armv7 => "armv7",
            Arch::Armv8 => "armv8",
        }
    }
}

impl FromStr for Arch {
    type Err = ConfigurationFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "i686" | "i386" => Ok(Arch::X86),
            "x86_64" | "amd64" | "x64" => Ok(Arch::X86_64),
            "armv7" | "arm" => Ok(Arch::Armv7),
            "armv8" | "aarch64" | "arm64" => Ok(Arch::Armv8),
            _ => Err(unknown("arch", s, Arch::NAMES)),
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(Os, Compiler, BuildType, Arch);

fn unknown(kind: &'static str, value: &str, expected: &'static [&'static str]) -> ConfigurationFault {
    ConfigurationFault::UnknownSetting {
        kind,
        value: value.to_string(),
        expected,
    }
}

/// The settings tuple a configuration pass runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    pub build_type: BuildType,
    pub arch: Arch,
}

impl Settings {
    pub fn new(os: Os, compiler: Compiler, build_type: BuildType, arch: Arch) -> Self {
        Settings {
            os,
            compiler,
            build_type,
            arch,
        }
    }

    /// Parse a settings tuple from its four string values.
    pub fn parse(
        os: &str,
        compiler: &str,
        build_type: &str,
        arch: &str,
    ) -> Result<Self, ConfigurationFault> {
        Ok(Settings {
            os: os.parse()?,
            compiler: compiler.parse()?,
            build_type: build_type.parse()?,
            arch: arch.parse()?,
        })
    }

    /// Detect the host settings. The build type defaults to Debug.
    pub fn host() -> Self {
        let os = Os::host();
        Settings {
            os,
            compiler: Compiler::host(os),
            build_type: BuildType::default(),
            arch: Arch::host(),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.arch, self.os, self.compiler, self.build_type
        )
    }
}
