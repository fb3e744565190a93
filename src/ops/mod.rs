//! High-level operations.
//!
//! This module contains the implementation of Rigging commands.

pub mod configure;
pub mod project;
pub mod rigging_init;

pub use configure::{configure, ConfigureOutcome, EmittedArtifact, REQUIREMENTS_FILE};
pub use project::{load_project, Project, ProjectOptions};
pub use rigging_init::{init_project, InitOptions};
