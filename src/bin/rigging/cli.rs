//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use rigging::builder::toolchain::GeneratorKind;
use rigging::ops::ProjectOptions;
use rigging::util::config::SettingsConfig;

/// Rigging - build configuration descriptor for native C/C++ projects
#[derive(Parser)]
#[command(name = "rigging")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a Rigging.toml populated from the default descriptor
    Init(InitArgs),

    /// Print the pinned requirements in declaration order
    Requirements(RequirementsArgs),

    /// Print the folder layout for the active settings
    Layout(LayoutArgs),

    /// Print the curated compiler warning flags
    Flags(FlagsArgs),

    /// Run every hook and write the toolchain artifacts
    Generate(GenerateArgs),

    /// Print the effective settings and where each value came from
    Settings(SettingsCmdArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings flags shared by every command that depends on the target.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Target operating system (linux, macos, windows, freebsd)
    #[arg(long, env = "RIGGING_OS")]
    pub os: Option<String>,

    /// Compiler (gcc, clang, apple-clang, msvc)
    #[arg(long, env = "RIGGING_COMPILER")]
    pub compiler: Option<String>,

    /// Build type (Debug, Release, RelWithDebInfo, MinSizeRel)
    #[arg(long, env = "RIGGING_BUILD_TYPE", conflicts_with = "release")]
    pub build_type: Option<String>,

    /// Target architecture (x86, x86_64, armv7, armv8)
    #[arg(long, env = "RIGGING_ARCH")]
    pub arch: Option<String>,

    /// Shorthand for `--build-type Release`
    #[arg(short, long)]
    pub release: bool,

    /// CMake generator (e.g. "Ninja", "Ninja Multi-Config")
    #[arg(short = 'G', long)]
    pub generator: Option<GeneratorKind>,
}

impl SettingsArgs {
    /// Settings given on the command line.
    pub fn settings_config(&self) -> SettingsConfig {
        let build_type = if self.release {
            Some("Release".to_string())
        } else {
            self.build_type.clone()
        };

        SettingsConfig {
            os: self.os.clone(),
            compiler: self.compiler.clone(),
            build_type,
            arch: self.arch.clone(),
        }
    }

    /// Project options for these flags.
    pub fn project_options(&self, warnings_as_errors: bool) -> ProjectOptions {
        ProjectOptions {
            settings: self.settings_config(),
            warnings_as_errors,
            generator: self.generator,
        }
    }
}

#[derive(Args)]
pub struct InitArgs {
    /// Package name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing Rigging.toml
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct RequirementsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Treat compiler warnings as errors
    #[arg(long)]
    pub warnings_as_errors: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Treat compiler warnings as errors
    #[arg(long)]
    pub warnings_as_errors: bool,
}

#[derive(Args)]
pub struct SettingsCmdArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
