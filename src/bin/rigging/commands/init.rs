//! `rigging init` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InitArgs;
use rigging::core::MANIFEST_NAME;
use rigging::ops::{init_project, InitOptions};
use rigging::util::diagnostic::{emit, Diagnostic};

pub fn execute(args: InitArgs, color: bool) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));

    let existing = path.join(MANIFEST_NAME);
    if args.force && existing.exists() {
        emit(
            &Diagnostic::warning(format!("overwriting existing {}", MANIFEST_NAME))
                .with_location(&existing)
                .with_context("pins and toolchain options are reset to the defaults"),
            color,
        );
    }

    let opts = InitOptions {
        name: args.name,
        force: args.force,
    };

    let manifest_path = init_project(&path, &opts)?;
    eprintln!("     Created {}", manifest_path.display());

    Ok(())
}
