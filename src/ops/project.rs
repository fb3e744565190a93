//! Project loading: manifest discovery, config layering, settings resolution.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::toolchain::GeneratorKind;
use crate::core::descriptor::BuildDescriptor;
use crate::util::config::{resolve_generator, ResolvedSettings, SettingSource, SettingsConfig};
use crate::util::context::GlobalContext;

/// Options that come from the command line.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Settings given explicitly; these beat every config file.
    pub settings: SettingsConfig,

    /// Force warnings-as-errors on.
    pub warnings_as_errors: bool,

    /// Explicit CMake generator.
    pub generator: Option<GeneratorKind>,
}

/// A loaded project, ready to be configured.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub descriptor: BuildDescriptor,
    pub settings: ResolvedSettings,
}

impl Project {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Locate and load the project containing the context's working directory.
///
/// Warnings-as-errors is on if the command line, the manifest or the config
/// asks for it. The generator comes from the command line, then the
/// manifest, then the config.
pub fn load_project(ctx: &GlobalContext, opts: &ProjectOptions) -> Result<Project> {
    let manifest_path = ctx.find_manifest()?;
    let root = ctx.find_project_root()?;
    let config = ctx.load_config(&root);

    tracing::debug!("loading manifest {}", manifest_path.display());

    let mut descriptor = BuildDescriptor::load(&manifest_path, config.warnings_as_errors())?;
    if opts.warnings_as_errors || config.warnings_as_errors() {
        descriptor = descriptor.with_warnings_as_errors();
    }

    let settings = config.settings.resolve(&opts.settings)?;
    tracing::debug!("settings: {}", settings.settings);

    let (generator, source) = resolve_generator(
        opts.generator,
        descriptor.toolchain_options().generator,
        config.generator()?,
        &settings.settings,
    );
    if source != SettingSource::Detected {
        descriptor = descriptor.with_generator(generator);
    }

    Ok(Project {
        root,
        manifest_path,
        descriptor,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::BuildRecipe;
    use crate::core::errors::ConfigurationFault;
    use crate::core::manifest::MANIFEST_NAME;
    use crate::core::settings::{BuildType, Compiler};
    use crate::ops::rigging_init::{init_project, InitOptions};
    use tempfile::TempDir;

    const MANIFEST: &str = r#"requires = ["glfw/3.3.8", "glm/cci.20230113"]

[package]
name = "demo"
"#;

    fn setup(manifest: &str) -> (TempDir, GlobalContext) {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join(MANIFEST_NAME), manifest).unwrap();
        let ctx = GlobalContext::with_cwd(project).with_home(tmp.path().join("home"));
        (tmp, ctx)
    }

    fn linux_gcc() -> SettingsConfig {
        SettingsConfig {
            os: Some("linux".to_string()),
            compiler: Some("gcc".to_string()),
            build_type: None,
            arch: Some("x86_64".to_string()),
        }
    }

    #[test]
    fn test_load_project_defaults() {
        let (_tmp, ctx) = setup(MANIFEST);
        let opts = ProjectOptions {
            settings: linux_gcc(),
            ..Default::default()
        };

        let project = load_project(&ctx, &opts).unwrap();
        assert_eq!(project.descriptor.name(), "demo");
        assert_eq!(project.descriptor.requirements().len(), 2);
        assert!(!project.descriptor.toolchain_options().warnings_as_errors);
        assert_eq!(project.settings.settings.build_type, BuildType::Debug);
        assert_eq!(project.settings.build_type, SettingSource::Detected);
        assert_eq!(project.settings.compiler, SettingSource::CommandLine);
    }

    #[test]
    fn test_project_config_profile() {
        let (_tmp, ctx) = setup(MANIFEST);
        let config_dir = ctx.cwd().join(".rigging");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[settings]\ncompiler = \"clang\"\nbuild_type = \"Release\"\n\n[toolchain]\nwarnings_as_errors = true\ngenerator = \"Ninja\"\n",
        )
        .unwrap();

        let opts = ProjectOptions {
            settings: SettingsConfig {
                compiler: None,
                ..linux_gcc()
            },
            ..Default::default()
        };

        let project = load_project(&ctx, &opts).unwrap();
        assert_eq!(project.settings.settings.compiler, Compiler::Clang);
        assert_eq!(project.settings.compiler, SettingSource::Config);
        assert_eq!(project.settings.settings.build_type, BuildType::Release);
        assert!(project.descriptor.toolchain_options().warnings_as_errors);
        assert_eq!(
            project.descriptor.toolchain_options().generator,
            Some(GeneratorKind::Ninja)
        );
    }

    #[test]
    fn test_config_werror_applies_to_initialized_project() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        init_project(&project, &InitOptions::default()).unwrap();
        let config_dir = project.join(".rigging");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[toolchain]\nwarnings_as_errors = true\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(project).with_home(tmp.path().join("home"));
        let opts = ProjectOptions {
            settings: linux_gcc(),
            ..Default::default()
        };

        let project = load_project(&ctx, &opts).unwrap();
        assert!(project.descriptor.toolchain_options().warnings_as_errors);
    }

    #[test]
    fn test_manifest_false_does_not_mask_config() {
        let (_tmp, ctx) = setup(&format!(
            "{}\n[toolchain]\nwarnings_as_errors = false\n",
            MANIFEST
        ));
        let config_dir = ctx.cwd().join(".rigging");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[toolchain]\nwarnings_as_errors = true\n",
        )
        .unwrap();
        let opts = ProjectOptions {
            settings: linux_gcc(),
            ..Default::default()
        };

        let project = load_project(&ctx, &opts).unwrap();
        assert!(project.descriptor.toolchain_options().warnings_as_errors);
    }

    #[test]
    fn test_cli_generator_wins() {
        let (_tmp, ctx) = setup(&format!("{}\n[toolchain]\ngenerator = \"Ninja\"\n", MANIFEST));
        let opts = ProjectOptions {
            settings: linux_gcc(),
            generator: Some(GeneratorKind::NinjaMultiConfig),
            ..Default::default()
        };

        let project = load_project(&ctx, &opts).unwrap();
        assert_eq!(
            project.descriptor.toolchain_options().generator,
            Some(GeneratorKind::NinjaMultiConfig)
        );
    }

    #[test]
    fn test_duplicate_pin_is_configuration_fault() {
        let (_tmp, ctx) = setup(
            "requires = [\"glfw/3.3.8\", \"glfw/3.4\"]\n\n[package]\nname = \"demo\"\n",
        );
        let opts = ProjectOptions {
            settings: linux_gcc(),
            ..Default::default()
        };

        let err = load_project(&ctx, &opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigurationFault>(),
            Some(ConfigurationFault::DuplicateRequirement { .. })
        ));
    }

    #[test]
    fn test_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_home(tmp.path().join("home"));

        let err = load_project(&ctx, &ProjectOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Rigging.toml"));
    }
}
