//! Command implementations

pub mod completions;
pub mod flags;
pub mod generate;
pub mod init;
pub mod layout;
pub mod requirements;
pub mod settings;
