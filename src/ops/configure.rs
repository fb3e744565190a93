//! Host adapter: drives a descriptor's hooks and persists their results.
//!
//! Hooks run in a fixed order (requirements, layout, generate). All
//! artifacts are rendered and staged before any of them is moved into
//! place, so a failed pass never leaves a half-written generators folder.
//!
//! Besides the generators folder, a pass maintains `CMakeUserPresets.json`
//! in the source folder so `cmake --preset` finds the generated presets.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde_json::json;

use crate::builder::layout::{Layout, LayoutRole};
use crate::builder::toolchain::cmake::{
    render_presets, render_toolchain_file, render_user_presets, PRESETS_FILE, TOOLCHAIN_FILE,
    USER_PRESETS_FILE,
};
use crate::builder::toolchain::ToolchainConfig;
use crate::core::descriptor::BuildRecipe;
use crate::core::errors::{ConfigureError, ToolchainEmissionFault};
use crate::core::requirement::RequirementList;
use crate::core::settings::Settings;
use crate::util::fs::{ensure_dir, stage_file, StagedFile, WriteOutcome};

/// File name of the persisted requirement list.
pub const REQUIREMENTS_FILE: &str = "rigging_requirements.json";

/// A persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedArtifact {
    pub kind: &'static str,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Everything a configuration pass produced.
#[derive(Debug, Clone)]
pub struct ConfigureOutcome {
    pub requirements: RequirementList,
    pub layout: Layout,
    pub toolchain: ToolchainConfig,
    pub artifacts: Vec<EmittedArtifact>,
}

impl ConfigureOutcome {
    /// Path of the persisted toolchain file.
    pub fn toolchain_file(&self) -> Option<&Path> {
        self.artifacts
            .iter()
            .find(|a| a.kind == "toolchain file")
            .map(|a| a.path.as_path())
    }
}

/// Run one configuration pass for `recipe` under `root`.
pub fn configure(
    recipe: &dyn BuildRecipe,
    settings: &Settings,
    root: &Path,
) -> Result<ConfigureOutcome, ConfigureError> {
    tracing::debug!("configuring `{}` for {}", recipe.name(), settings);

    let requirements = recipe.requirements().clone();
    for pin in &requirements {
        tracing::debug!("requires {}", pin);
    }

    let layout = recipe.layout(settings);
    let toolchain = recipe.generate(settings);

    let source_dir = layout.resolve(root, LayoutRole::Source);
    let build_dir = layout.resolve(root, LayoutRole::Build);
    let generators_dir = layout.resolve(root, LayoutRole::Generators);
    ensure_dir(&generators_dir)
        .map_err(|e| ToolchainEmissionFault::new("generators folder", &generators_dir, e))?;

    let presets = render_presets(&toolchain, &build_dir, &generators_dir);
    let manifest = json!({
        "descriptor": recipe.name(),
        "settings": settings,
        "requires": &requirements,
    });

    let mut rendered = vec![
        (
            "toolchain file",
            generators_dir.join(TOOLCHAIN_FILE),
            render_toolchain_file(&toolchain),
        ),
        (
            "presets file",
            generators_dir.join(PRESETS_FILE),
            to_pretty_json(&presets),
        ),
        (
            "requirements file",
            generators_dir.join(REQUIREMENTS_FILE),
            to_pretty_json(&manifest),
        ),
    ];

    let user_presets_path = source_dir.join(USER_PRESETS_FILE);
    let existing = if user_presets_path.is_file() {
        let text = fs::read_to_string(&user_presets_path).map_err(|e| {
            ToolchainEmissionFault::new("user presets file", &user_presets_path, e)
        })?;
        Some(text)
    } else {
        None
    };
    let include = include_path(&source_dir, &generators_dir.join(PRESETS_FILE));
    match render_user_presets(existing.as_deref(), &include, |path| {
        source_dir.join(path).is_file()
    }) {
        Some(user_presets) => rendered.push((
            "user presets file",
            user_presets_path,
            to_pretty_json(&user_presets),
        )),
        None => tracing::warn!(
            "{} was not written by rigging; leaving it alone",
            user_presets_path.display()
        ),
    }

    let mut staged: Vec<(&'static str, StagedFile)> = Vec::with_capacity(rendered.len());
    for (kind, path, contents) in rendered {
        let file = stage_file(&path, &contents)
            .map_err(|e| ToolchainEmissionFault::new(kind, &path, e))?;
        staged.push((kind, file));
    }

    let mut artifacts = Vec::with_capacity(staged.len());
    for (kind, file) in staged {
        let path = file.target().to_path_buf();
        let outcome = file
            .commit()
            .map_err(|e| ToolchainEmissionFault::new(kind, &path, e))?;
        tracing::info!("{} {} ({})", kind, path.display(), outcome.as_str());
        artifacts.push(EmittedArtifact {
            kind,
            path,
            outcome,
        });
    }

    Ok(ConfigureOutcome {
        requirements,
        layout,
        toolchain,
        artifacts,
    })
}

/// `target` relative to `base` when it lies below it, with `/` separators.
fn include_path(base: &Path, target: &Path) -> String {
    let relative = target.strip_prefix(base).unwrap_or(target);
    if relative.is_absolute() {
        return relative.display().to_string();
    }
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn to_pretty_json(value: &serde_json::Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::BuildDescriptor;
    use tempfile::TempDir;

    fn linux_release() -> Settings {
        Settings::parse("linux", "gcc", "Release", "x86_64").unwrap()
    }

    #[test]
    fn test_configure_writes_artifacts() {
        let tmp = TempDir::new().unwrap();
        let descriptor = BuildDescriptor::default();

        let outcome = configure(&descriptor, &linux_release(), tmp.path()).unwrap();

        let generators = tmp.path().join("build").join("Release").join("generators");
        assert!(generators.join(TOOLCHAIN_FILE).is_file());
        assert!(generators.join(PRESETS_FILE).is_file());
        assert!(generators.join(REQUIREMENTS_FILE).is_file());
        assert!(tmp.path().join(USER_PRESETS_FILE).is_file());
        assert_eq!(outcome.artifacts.len(), 4);
        assert!(outcome
            .artifacts
            .iter()
            .all(|a| a.outcome == WriteOutcome::Written));
        assert_eq!(
            outcome.toolchain_file(),
            Some(generators.join(TOOLCHAIN_FILE).as_path())
        );

        let toolchain = std::fs::read_to_string(generators.join(TOOLCHAIN_FILE)).unwrap();
        assert!(toolchain.contains("\" -Wall\""));
        assert!(toolchain.contains("\" -Wimplicit-fallthrough\""));
    }

    #[test]
    fn test_requirements_file_preserves_order() {
        let tmp = TempDir::new().unwrap();
        let outcome = configure(&BuildDescriptor::default(), &linux_release(), tmp.path()).unwrap();

        let path = outcome
            .artifacts
            .iter()
            .find(|a| a.kind == "requirements file")
            .map(|a| a.path.clone())
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(value["descriptor"], "vulkan-tutorial");
        assert_eq!(value["settings"]["build_type"], "Release");
        assert_eq!(value["requires"][0]["ref"], "glfw/3.3.8");
        assert_eq!(value["requires"][1]["ref"], "glm/cci.20230113");
    }

    #[test]
    fn test_second_pass_is_unchanged() {
        let tmp = TempDir::new().unwrap();
        let descriptor = BuildDescriptor::default();

        configure(&descriptor, &linux_release(), tmp.path()).unwrap();
        let second = configure(&descriptor, &linux_release(), tmp.path()).unwrap();

        assert!(second
            .artifacts
            .iter()
            .all(|a| a.outcome == WriteOutcome::Unchanged));
    }

    #[test]
    fn test_build_types_do_not_collide() {
        let tmp = TempDir::new().unwrap();
        let descriptor = BuildDescriptor::default();
        let debug = Settings::parse("linux", "gcc", "Debug", "x86_64").unwrap();

        let release_out = configure(&descriptor, &linux_release(), tmp.path()).unwrap();
        let debug_out = configure(&descriptor, &debug, tmp.path()).unwrap();

        assert_ne!(release_out.toolchain_file(), debug_out.toolchain_file());
    }

    #[test]
    fn test_user_presets_include_every_build_type() {
        let tmp = TempDir::new().unwrap();
        let descriptor = BuildDescriptor::default();
        let debug = Settings::parse("linux", "gcc", "Debug", "x86_64").unwrap();

        configure(&descriptor, &linux_release(), tmp.path()).unwrap();
        configure(&descriptor, &debug, tmp.path()).unwrap();
        let again = configure(&descriptor, &linux_release(), tmp.path()).unwrap();
        assert!(again
            .artifacts
            .iter()
            .all(|a| a.outcome == WriteOutcome::Unchanged));

        let text = std::fs::read_to_string(tmp.path().join(USER_PRESETS_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], 4);
        assert_eq!(
            value["include"],
            json!([
                "build/Release/generators/CMakePresets.json",
                "build/Debug/generators/CMakePresets.json",
            ])
        );
    }

    #[test]
    fn test_foreign_user_presets_left_alone() {
        let tmp = TempDir::new().unwrap();
        let foreign = "{\n  \"version\": 4\n}\n";
        std::fs::write(tmp.path().join(USER_PRESETS_FILE), foreign).unwrap();

        let outcome = configure(&BuildDescriptor::default(), &linux_release(), tmp.path()).unwrap();

        assert_eq!(outcome.artifacts.len(), 3);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(USER_PRESETS_FILE)).unwrap(),
            foreign
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_root_is_emission_fault() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the build folder should go
        std::fs::write(tmp.path().join("build"), "not a directory").unwrap();

        let err = configure(&BuildDescriptor::default(), &linux_release(), tmp.path()).unwrap_err();
        match err {
            ConfigureError::Emission(fault) => assert_eq!(fault.artifact, "generators folder"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
