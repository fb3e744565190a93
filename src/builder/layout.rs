//! Folder layout for out-of-source CMake builds.
//!
//! Single-config generators get one build tree per build type
//! (`build/Release`); multi-config generators share `build`. Generated
//! files always land in `<build>/generators`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::toolchain::GeneratorKind;
use crate::core::settings::Settings;

/// Root folder of all build trees.
pub const BUILD_ROOT: &str = "build";

/// Folder inside a build tree that holds generated toolchain files.
pub const GENERATORS_DIR: &str = "generators";

/// A conventional folder role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutRole {
    Source,
    Build,
    Generators,
}

impl LayoutRole {
    pub const ALL: [LayoutRole; 3] = [LayoutRole::Source, LayoutRole::Build, LayoutRole::Generators];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutRole::Source => "source",
            LayoutRole::Build => "build",
            LayoutRole::Generators => "generators",
        }
    }
}

impl fmt::Display for LayoutRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative paths for each folder role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    source: PathBuf,
    build: PathBuf,
    generators: PathBuf,
}

impl Layout {
    /// Path for a role, relative to the project root.
    pub fn get(&self, role: LayoutRole) -> &Path {
        match role {
            LayoutRole::Source => &self.source,
            LayoutRole::Build => &self.build,
            LayoutRole::Generators => &self.generators,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn build(&self) -> &Path {
        &self.build
    }

    pub fn generators(&self) -> &Path {
        &self.generators
    }

    /// Iterate roles and their paths in role order.
    pub fn iter(&self) -> impl Iterator<Item = (LayoutRole, &Path)> {
        LayoutRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Resolve a role against a project root.
    pub fn resolve(&self, root: &Path, role: LayoutRole) -> PathBuf {
        match self.get(role) {
            p if p == Path::new(".") => root.to_path_buf(),
            p => root.join(p),
        }
    }
}

/// Select the layout for a settings tuple.
///
/// Pure: the same settings and generator override always map to the
/// same paths.
pub fn select_layout(settings: &Settings, generator: Option<GeneratorKind>) -> Layout {
    let generator = GeneratorKind::select(settings, generator);

    let build = if generator.is_multi_config() {
        PathBuf::from(BUILD_ROOT)
    } else {
        Path::new(BUILD_ROOT).join(settings.build_type.as_str())
    };
    let generators = build.join(GENERATORS_DIR);

    tracing::debug!("layout for {}: build folder {}", settings, build.display());

    Layout {
        source: PathBuf::from("."),
        build,
        generators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_config_layout() {
        let settings = Settings::parse("linux", "gcc", "Release", "x86_64").unwrap();
        let layout = select_layout(&settings, None);

        assert_eq!(layout.source(), Path::new("."));
        assert_eq!(layout.build(), Path::new("build/Release"));
        assert_eq!(layout.generators(), Path::new("build/Release/generators"));

        assert_ne!(layout.source(), layout.build());
        assert!(!layout.source().starts_with(layout.build()));
        assert!(!layout.build().starts_with(layout.source()));
    }

    #[test]
    fn test_multi_config_layout() {
        let settings = Settings::parse("windows", "msvc", "Debug", "x86_64").unwrap();
        let layout = select_layout(&settings, None);

        assert_eq!(layout.build(), Path::new("build"));
        assert_eq!(layout.generators(), Path::new("build/generators"));
    }

    #[test]
    fn test_generator_override_changes_layout() {
        let settings = Settings::parse("linux", "clang", "Debug", "armv8").unwrap();
        let layout = select_layout(&settings, Some(GeneratorKind::NinjaMultiConfig));
        assert_eq!(layout.build(), Path::new("build"));

        let layout = select_layout(&settings, Some(GeneratorKind::Ninja));
        assert_eq!(layout.build(), Path::new("build/Debug"));
    }

    #[test]
    fn test_layout_is_pure() {
        let settings = Settings::parse("macos", "apple-clang", "MinSizeRel", "armv8").unwrap();
        assert_eq!(select_layout(&settings, None), select_layout(&settings, None));
    }

    #[test]
    fn test_resolve_against_root() {
        let settings = Settings::parse("linux", "gcc", "Debug", "x86_64").unwrap();
        let layout = select_layout(&settings, None);
        let root = Path::new("/work/app");

        assert_eq!(layout.resolve(root, LayoutRole::Source), PathBuf::from("/work/app"));
        assert_eq!(
            layout.resolve(root, LayoutRole::Generators),
            PathBuf::from("/work/app/build/Debug/generators")
        );

        let roles: Vec<_> = layout.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, LayoutRole::ALL);
    }
}
