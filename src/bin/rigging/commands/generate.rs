//! `rigging generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use rigging::ops::{configure, load_project};
use rigging::util::GlobalContext;

pub fn execute(args: GenerateArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = load_project(&ctx, &args.settings.project_options(args.warnings_as_errors))?;

    let outcome = configure(&project.descriptor, &project.settings.settings, project.root())?;

    eprintln!(
        "   Generated {} for {} ({} pins, warnings as {})",
        outcome.layout.generators().display(),
        project.settings.settings,
        outcome.requirements.len(),
        outcome.toolchain.warning_severity().as_str()
    );
    if let Some(toolchain_file) = outcome.toolchain_file() {
        eprintln!(
            "        hint: cmake -DCMAKE_TOOLCHAIN_FILE={} -S . -B {}",
            toolchain_file.display(),
            outcome.layout.build().display()
        );
    }

    Ok(())
}
