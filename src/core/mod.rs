//! Core data structures for Rigging.
//!
//! This module contains the foundational types used throughout Rigging:
//! - Settings tuples and their parsing
//! - Dependency pins and requirement lists
//! - The manifest and the build descriptor built from it

pub mod descriptor;
pub mod errors;
pub mod manifest;
pub mod requirement;
pub mod settings;

pub use descriptor::{BuildDescriptor, BuildRecipe};
pub use errors::{ConfigurationFault, ConfigureError, ToolchainEmissionFault};
pub use manifest::{Manifest, MANIFEST_NAME};
pub use requirement::{DependencyPin, PinVersion, RequirementList};
pub use settings::{Arch, BuildType, Compiler, Os, Settings};
