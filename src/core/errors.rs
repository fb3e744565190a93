//! Fault types raised while configuring a build.
//!
//! There are only two classes of failure: the declared configuration cannot
//! be accepted (`ConfigurationFault`) or a generated artifact cannot be
//! written (`ToolchainEmissionFault`). Neither is retried.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// The declared configuration cannot be accepted.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigurationFault {
    #[error("invalid requirement `{reference}`: {reason}")]
    #[diagnostic(
        code(rigging::config::invalid_requirement),
        help("Requirements are written as `name/version`, e.g. `glfw/3.3.8`")
    )]
    InvalidRequirement { reference: String, reason: String },

    #[error("requirement `{name}` has an empty version")]
    #[diagnostic(code(rigging::config::empty_version))]
    EmptyVersion { name: String },

    #[error("requirement `{name}` is declared more than once")]
    #[diagnostic(
        code(rigging::config::duplicate_requirement),
        help("Keep a single pin per package")
    )]
    DuplicateRequirement {
        name: String,
        first: String,
        second: String,
    },

    #[error("unknown {kind} `{value}`")]
    #[diagnostic(code(rigging::config::unknown_setting))]
    UnknownSetting {
        kind: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    #[error("unknown CMake generator `{value}`")]
    #[diagnostic(code(rigging::config::unknown_generator))]
    UnknownGenerator { value: String },

    #[error("invalid define `{value}`")]
    #[diagnostic(code(rigging::config::invalid_define))]
    InvalidDefine { value: String },

    #[error("failed to load manifest {}: {message}", path.display())]
    #[diagnostic(code(rigging::config::manifest))]
    Manifest { path: PathBuf, message: String },
}

/// A generated artifact could not be persisted.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("failed to write {artifact} to {}", path.display())]
#[diagnostic(
    code(rigging::emit::write_failed),
    help("Check that the build folder is writable")
)]
pub struct ToolchainEmissionFault {
    pub artifact: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl ToolchainEmissionFault {
    pub fn new(artifact: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ToolchainEmissionFault {
            artifact,
            path: path.into(),
            source,
        }
    }
}

/// Any fault that aborts a configuration pass.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigureError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationFault),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Emission(#[from] ToolchainEmissionFault),
}

impl ConfigurationFault {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigurationFault::InvalidRequirement { reference, reason } => {
                Diagnostic::error(format!("invalid requirement `{}`", reference))
                    .with_context(reason.clone())
                    .with_suggestion("Write requirements as `name/version`, e.g. `glfw/3.3.8`")
            }

            ConfigurationFault::EmptyVersion { name } => {
                Diagnostic::error(format!("requirement `{}` has an empty version", name))
                    .with_suggestion(format!("Pin a version: `{}/<version>`", name))
            }

            ConfigurationFault::DuplicateRequirement {
                name,
                first,
                second,
            } => Diagnostic::error(format!("requirement `{}` is declared more than once", name))
                .with_context(format!("first declared as `{}`", first))
                .with_context(format!("declared again as `{}`", second))
                .with_suggestion(format!("Remove one of the `{}` pins", name)),

            ConfigurationFault::UnknownSetting {
                kind,
                value,
                expected,
            } => Diagnostic::error(format!("unknown {} `{}`", kind, value))
                .with_context(format!("expected one of: {}", expected.join(", ")))
                .with_suggestion(suggestions::UNKNOWN_SETTING),

            ConfigurationFault::UnknownGenerator { value } => {
                Diagnostic::error(format!("unknown CMake generator `{}`", value)).with_context(
                    "expected one of: Unix Makefiles, MinGW Makefiles, Ninja, \
                     Ninja Multi-Config, Visual Studio 17 2022, Xcode",
                )
            }

            ConfigurationFault::InvalidDefine { value } => {
                Diagnostic::error(format!("invalid define `{}`", value))
                    .with_suggestion("Write defines as `NAME` or `NAME=value`")
            }

            ConfigurationFault::Manifest { path, message } => {
                Diagnostic::error("failed to load manifest")
                    .with_location(path)
                    .with_context(message.clone())
                    .with_suggestion(suggestions::NO_MANIFEST)
            }
        }
    }
}

impl ConfigureError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigureError::Configuration(fault) => fault.to_diagnostic(),
            ConfigureError::Emission(fault) => {
                Diagnostic::error(format!("failed to write {}", fault.artifact))
                    .with_location(&fault.path)
                    .with_context(fault.source.to_string())
                    .with_suggestion(suggestions::EMIT_FAILED)
            }
        }
    }
}
