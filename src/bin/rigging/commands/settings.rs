//! `rigging settings` command
//!
//! Works outside a project; only the global config applies then. The
//! generator row shows the generator `rigging generate` would use.

use anyhow::Result;

use crate::cli::SettingsCmdArgs;
use rigging::builder::toolchain::GeneratorKind;
use rigging::core::manifest::Manifest;
use rigging::util::config::{load_config, project_config_path, resolve_generator, SettingSource};
use rigging::util::GlobalContext;

pub fn execute(args: SettingsCmdArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let (config, manifest_generator) = match ctx.find_project_root() {
        Ok(root) => {
            let manifest = Manifest::load(&ctx.find_manifest()?)?;
            let generator = manifest
                .toolchain
                .generator
                .as_deref()
                .map(str::parse::<GeneratorKind>)
                .transpose()?;
            (ctx.load_config(&root), generator)
        }
        Err(_) => (
            load_config(&ctx.config_path(), &project_config_path(ctx.cwd())),
            None,
        ),
    };

    let resolved = config.settings.resolve(&args.settings.settings_config())?;
    let settings = resolved.settings;

    let (generator, generator_source) = resolve_generator(
        args.settings.generator,
        manifest_generator,
        config.generator()?,
        &settings,
    );

    let rows: [(&str, &str, SettingSource); 5] = [
        ("os", settings.os.as_str(), resolved.os),
        ("compiler", settings.compiler.as_str(), resolved.compiler),
        ("build_type", settings.build_type.as_str(), resolved.build_type),
        ("arch", settings.arch.as_str(), resolved.arch),
        ("generator", generator.as_str(), generator_source),
    ];

    for (key, value, source) in rows {
        println!("{:<12} {:<16} # {}", key, value, source.as_str());
    }

    Ok(())
}
