//! CMake build configuration.
//!
//! This module maps settings to a folder layout and a toolchain description.

pub mod layout;
pub mod toolchain;

pub use layout::{select_layout, Layout, LayoutRole};
pub use toolchain::{generate_toolchain, GeneratorKind, ToolchainConfig, ToolchainOptions};
