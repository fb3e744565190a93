//! `rigging requirements` command

use anyhow::{Context, Result};

use crate::cli::RequirementsArgs;
use rigging::core::descriptor::BuildRecipe;
use rigging::core::requirement::PinVersion;
use rigging::ops::{load_project, ProjectOptions};
use rigging::util::GlobalContext;

pub fn execute(args: RequirementsArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = load_project(&ctx, &ProjectOptions::default())?;
    let requirements = project.descriptor.requirements();

    if args.json {
        let json = serde_json::to_string_pretty(requirements)
            .context("failed to serialize requirements")?;
        println!("{}", json);
        return Ok(());
    }

    for pin in requirements {
        let kind = match pin.pin_version() {
            PinVersion::Exact(_) => "exact",
            PinVersion::Range(_) => "range",
            PinVersion::Opaque(_) => "opaque",
        };
        println!("{:<24} # {}", pin.to_string(), kind);
    }

    Ok(())
}
