//! Rigging - build configuration for native C/C++ projects
//!
//! This crate provides the descriptor a CMake build is configured from:
//! pinned requirements, the folder layout and a warning-hardened toolchain.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use core::{
    descriptor::{BuildDescriptor, BuildRecipe},
    manifest::Manifest,
    requirement::{DependencyPin, RequirementList},
    settings::Settings,
};

pub use util::context::GlobalContext;
