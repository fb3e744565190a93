//! Filesystem utilities.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Outcome of writing a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOutcome::Written => "written",
            WriteOutcome::Unchanged => "unchanged",
        }
    }
}

/// A file written to a temporary sibling, not yet moved into place.
///
/// Dropping a staged file without committing removes the temporary.
#[derive(Debug)]
pub struct StagedFile {
    target: PathBuf,
    tmp: Option<NamedTempFile>,
}

impl StagedFile {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the staged contents into place.
    pub fn commit(self) -> io::Result<WriteOutcome> {
        match self.tmp {
            Some(tmp) => {
                tmp.persist(&self.target).map_err(|e| e.error)?;
                Ok(WriteOutcome::Written)
            }
            None => Ok(WriteOutcome::Unchanged),
        }
    }
}

/// Stage `contents` for `path`.
///
/// Identical existing contents stage nothing, so the file keeps its mtime
/// and CMake does not reconfigure.
pub fn stage_file(path: &Path, contents: &str) -> io::Result<StagedFile> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == contents {
            return Ok(StagedFile {
                target: path.to_path_buf(),
                tmp: None,
            });
        }
    }

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    ensure_dir(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;

    Ok(StagedFile {
        target: path.to_path_buf(),
        tmp: Some(tmp),
    })
}

/// Write a file atomically, leaving it untouched if the contents match.
pub fn write_if_changed(path: &Path, contents: &str) -> io::Result<WriteOutcome> {
    stage_file(path, contents)?.commit()
}
