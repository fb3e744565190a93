//! `rigging layout` command

use anyhow::{Context, Result};

use crate::cli::LayoutArgs;
use rigging::core::descriptor::BuildRecipe;
use rigging::ops::load_project;
use rigging::util::GlobalContext;

pub fn execute(args: LayoutArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = load_project(&ctx, &args.settings.project_options(false))?;
    let layout = project.descriptor.layout(&project.settings.settings);

    if args.json {
        let json = serde_json::to_string_pretty(&layout).context("failed to serialize layout")?;
        println!("{}", json);
        return Ok(());
    }

    println!("# Layout for {}", project.settings.settings);
    for (role, path) in layout.iter() {
        println!("{:<12} {}", role.as_str(), path.display());
    }

    Ok(())
}
