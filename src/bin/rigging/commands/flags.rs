//! `rigging flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use rigging::builder::toolchain::CURATED_WARNINGS;
use rigging::core::descriptor::BuildRecipe;
use rigging::ops::load_project;
use rigging::util::GlobalContext;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = load_project(&ctx, &args.settings.project_options(args.warnings_as_errors))?;
    let toolchain = project.descriptor.generate(&project.settings.settings);
    let severity = toolchain.warning_severity().as_str();

    for flag in toolchain.extra_compile_flags() {
        let meaning = CURATED_WARNINGS
            .iter()
            .find(|w| w.as_flag() == flag.as_str())
            .map(|w| w.description())
            .unwrap_or("from Rigging.toml");
        println!("{:<24} # {} ({})", flag, meaning, severity);
    }

    Ok(())
}
