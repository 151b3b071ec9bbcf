//! # Staging Engine
//!
//! Pattern-driven projection of files into an output tree. This composes
//! the pattern matcher with the file operations: find every path under a
//! source root matching a pattern, then copy or remove each match.
//!
//! `copy_matching` preserves relative locations - a flat pattern such as
//! `+(*.ps1|*.psd1|*.psm1|Strings)` projects its matches into the
//! destination tree at the same relative paths they held under the source
//! root.

use std::path::Path;

use log::info;
use walkdir::WalkDir;

use crate::copygroup::{self, CopyGroup};
use crate::error::{Error, Result};
use crate::fileops::{self, CopyOptions};
use crate::pattern::{self, MatchOptions};

/// Copy everything under `source_root` matching `pattern` into
/// `dest_root`, mirroring each match's relative location.
pub fn copy_matching(
    pattern: &str,
    source_root: &Path,
    dest_root: &Path,
    options: &MatchOptions,
) -> Result<()> {
    if pattern.is_empty() {
        return Err(Error::InvalidArgument {
            name: "pattern".to_string(),
        });
    }

    info!("copying {pattern}");

    // normalize first, so matches can be re-relativized below
    let source_root = std::path::absolute(source_root)?;
    let dest_root = std::path::absolute(dest_root)?;

    for item in pattern::find(&source_root, pattern, options)? {
        // the matcher never returns the root, so this is always non-empty
        let relative = item
            .strip_prefix(&source_root)
            .ok()
            .filter(|relative| !relative.as_os_str().is_empty())
            .ok_or_else(|| Error::InvalidArgument {
                name: "relative".to_string(),
            })?;

        let dest_dir = match relative.parent() {
            Some(parent) => dest_root.join(parent),
            None => dest_root.clone(),
        };
        fileops::make_dir(&dest_dir)?;
        fileops::copy_into(CopyOptions::recursive_force(), &item, &dest_dir)?;
    }

    Ok(())
}

/// Remove everything under `source_root` matching `pattern`, recursively
/// and forcefully.
pub fn remove_matching(pattern: &str, source_root: &Path, options: &MatchOptions) -> Result<()> {
    if pattern.is_empty() {
        return Err(Error::InvalidArgument {
            name: "pattern".to_string(),
        });
    }

    info!("removing {pattern}");

    for item in pattern::find(source_root, pattern, options)? {
        fileops::remove(&item)?;
    }

    Ok(())
}

/// Delete every directory named `name` anywhere under `root`.
///
/// Used to prune vendored library folders wherever they appear in a staged
/// tree, not just at a fixed depth.
pub fn remove_dirs_named(root: &Path, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidArgument {
            name: "name".to_string(),
        });
    }

    // collect before deleting: removal invalidates the walk
    let mut matches = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if entry.file_type().is_dir() && entry.file_name() == name {
            matches.push(entry.into_path());
        }
    }

    for item in matches {
        fileops::remove(&item)?;
    }

    Ok(())
}

/// Stage a task's resources: the globally configured default patterns
/// first, then the task's own copy groups.
pub fn copy_task_resources(
    default_resources: &[String],
    groups: &[CopyGroup],
    source_root: &Path,
    dest_root: &Path,
) -> Result<()> {
    let options = MatchOptions::no_recurse();
    for pattern in default_resources {
        copy_matching(pattern, source_root, dest_root, &options)?;
    }

    if !groups.is_empty() {
        copygroup::resolve_all(groups, source_root, dest_root)?;
    }

    Ok(())
}
