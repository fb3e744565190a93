//! Implementation of `rigging init`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::builder::layout::BUILD_ROOT;
use crate::builder::toolchain::cmake::USER_PRESETS_FILE;
use crate::core::descriptor::BuildDescriptor;
use crate::core::manifest::MANIFEST_NAME;
use crate::util::fs::write_if_changed;

/// Options for `rigging init`.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Package name; defaults to the directory name
    pub name: Option<String>,

    /// Overwrite an existing manifest
    pub force: bool,
}

/// Write a `Rigging.toml` populated from the default descriptor.
///
/// Returns the path of the written manifest.
pub fn init_project(path: &Path, opts: &InitOptions) -> Result<PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }

    let manifest_path = path.join(MANIFEST_NAME);
    if manifest_path.exists() && !opts.force {
        bail!(
            "`{}` already exists in `{}`\n\
             \n\
             Use `rigging init --force` to overwrite it.",
            MANIFEST_NAME,
            path.display()
        );
    }

    let name = match &opts.name {
        Some(name) => name.clone(),
        None => default_name(path)?,
    };

    let mut manifest = BuildDescriptor::default().to_manifest();
    manifest.package.name = name;
    let contents = manifest
        .to_toml_string()
        .context("failed to serialize manifest")?;

    write_if_changed(&manifest_path, &contents)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;
    tracing::info!("created {}", manifest_path.display());

    ignore_generated(path)?;

    Ok(manifest_path)
}

fn default_name(path: &Path) -> Result<String> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", path.display()))?;
    match canonical.file_name().and_then(|n| n.to_str()) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => bail!(
            "cannot derive a package name from `{}`; pass --name",
            path.display()
        ),
    }
}

/// Add the build root and the user presets file to `.gitignore` unless
/// already listed.
fn ignore_generated(path: &Path) -> Result<()> {
    let gitignore = path.join(".gitignore");
    let build_entry = format!("{}/", BUILD_ROOT);

    let existing = if gitignore.exists() {
        fs::read_to_string(&gitignore)
            .with_context(|| format!("failed to read {}", gitignore.display()))?
    } else {
        String::new()
    };

    let listed = |entry: &str| existing.lines().any(|l| l.trim() == entry);
    let mut missing = Vec::new();
    if !listed(&build_entry) && !listed(BUILD_ROOT) {
        missing.push(build_entry.as_str());
    }
    if !listed(USER_PRESETS_FILE) {
        missing.push(USER_PRESETS_FILE);
    }
    if missing.is_empty() {
        return Ok(());
    }

    let mut contents = existing;
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str("# Rigging build trees\n");
    for entry in missing {
        contents.push_str(entry);
        contents.push('\n');
    }

    write_if_changed(&gitignore, &contents)
        .with_context(|| format!("failed to write {}", gitignore.display()))?;
    Ok(())
}
