//! # File Operations
//!
//! Thin, fail-fast wrappers over the filesystem primitives the staging
//! engine is built from: copy, remove, make-directory, and existence tests.
//!
//! Nothing here recovers from a failure. Every operation returns `Result`
//! and the caller decides what an error means; in this system the top-level
//! driver aborts the whole run, because a partially staged tree must never
//! be packaged.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Options for [`copy`], parsed from the `-Rf` style option strings that
/// copy groups carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Copy directories recursively.
    pub recursive: bool,
    /// Remove an existing destination entry before copying over it.
    pub force: bool,
}

impl CopyOptions {
    /// Recursive, forced copy - the semantics of `cp -Rf`.
    pub fn recursive_force() -> Self {
        Self {
            recursive: true,
            force: true,
        }
    }

    /// Parse a shell-style option string such as `-R`, `-Rf`, or `-rf`.
    ///
    /// Unrecognized characters are ignored, matching the permissiveness of
    /// the configuration surface this comes from.
    pub fn parse(flags: &str) -> Self {
        let mut options = Self::default();
        for ch in flags.chars() {
            match ch {
                'r' | 'R' => options.recursive = true,
                'f' => options.force = true,
                _ => {}
            }
        }
        options
    }
}

/// The kind of path an [`exists`] test checks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Dir,
    Any,
}

/// Test whether `path` exists as the given kind.
pub fn exists(kind: PathKind, path: &Path) -> bool {
    match kind {
        PathKind::File => path.is_file(),
        PathKind::Dir => path.is_dir(),
        PathKind::Any => path.exists(),
    }
}

/// Fail with [`Error::NotFound`] unless `path` exists.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if exists(PathKind::Any, path) {
        Ok(())
    } else {
        Err(Error::NotFound {
            path: path.display().to_string(),
        })
    }
}

/// Create a directory and any missing parents.
///
/// Creating an already-existing directory is not an error.
pub fn make_dir(target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;
    Ok(())
}

/// Remove a file or directory tree. A missing target is not an error.
pub fn remove(target: &Path) -> Result<()> {
    let metadata = match target.symlink_metadata() {
        Ok(metadata) => metadata,
        Err(_) => return Ok(()),
    };
    if metadata.is_dir() {
        fs::remove_dir_all(target)?;
    } else {
        fs::remove_file(target)?;
    }
    Ok(())
}

/// Copy each source into the destination directory, keeping base names.
pub fn copy(options: CopyOptions, sources: &[PathBuf], dest_dir: &Path) -> Result<()> {
    for source in sources {
        copy_into(options, source, dest_dir)?;
    }
    Ok(())
}

/// Copy a single file or directory into `dest_dir` under its own base name.
pub fn copy_into(options: CopyOptions, source: &Path, dest_dir: &Path) -> Result<()> {
    ensure_exists(source)?;
    let name = source.file_name().ok_or_else(|| Error::InvalidArgument {
        name: "source".to_string(),
    })?;
    let target = dest_dir.join(name);

    if source.is_dir() {
        if !options.recursive {
            return Err(Error::Copy {
                src: source.display().to_string(),
                dst: target.display().to_string(),
                message: "source is a directory and the copy is not recursive".to_string(),
            });
        }
        if options.force && exists(PathKind::File, &target) {
            remove(&target)?;
        }
        copy_dir(options, source, &target)
    } else {
        copy_file(options, source, &target)
    }
}

/// Copy the contents of `source_dir` (not the directory itself) into
/// `dest_dir` - the semantics of `cp -R source/* dest`.
pub fn copy_contents(options: CopyOptions, source_dir: &Path, dest_dir: &Path) -> Result<()> {
    ensure_exists(source_dir)?;
    let mut entries = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        entries.push(entry?.path());
    }
    entries.sort();
    copy(options, &entries, dest_dir)
}

fn copy_file(options: CopyOptions, source: &Path, target: &Path) -> Result<()> {
    if options.force {
        remove(target)?;
    }
    fs::copy(source, target).map_err(|e| Error::Copy {
        src: source.display().to_string(),
        dst: target.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

fn copy_dir(options: CopyOptions, source: &Path, target: &Path) -> Result<()> {
    make_dir(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        let entry_target = target.join(entry.file_name());
        if path.is_dir() {
            copy_dir(options, &path, &entry_target)?;
        } else {
            copy_file(options, &path, &entry_target)?;
        }
    }
    Ok(())
}
