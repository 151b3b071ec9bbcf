//! # Copy Groups
//!
//! A copy group is the declarative unit of resource staging: one group
//! expands into one or more concrete copy operations against a source root
//! and a destination root.
//!
//! Three shapes are supported by the configuration surface:
//!
//! ```json
//! { "source": "foo.dll" }
//! { "source": ["foo.dll", "bar"], "dest": "baz/", "options": "-R" }
//! { "source": "<CULTURE_NAME>/foo.dll", "dest": "<CULTURE_NAME>/" }
//! ```
//!
//! The third form is culture-variant multiplication: a `dest` containing
//! the reserved token clones the group once per culture name, substituting
//! the token in every string field before resolving each clone. The
//! substitution is structural (a deep clone of the in-memory group), so a
//! substituted clone can never carry the token again.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fileops::{self, CopyOptions};

/// Reserved placeholder token that triggers culture-variant multiplication.
pub const CULTURE_TOKEN: &str = "<CULTURE_NAME>";

/// The fixed enumeration of .NET culture names a localized group is
/// multiplied over.
pub const CULTURE_NAMES: [&str; 13] = [
    "cs", "de", "es", "fr", "it", "ja", "ko", "pl", "pt-BR", "ru", "tr", "zh-Hans", "zh-Hant",
];

/// One or more source paths, relative to a source root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    /// A single file or directory.
    One(String),
    /// A list of files and directories.
    Many(Vec<String>),
}

impl SourceSpec {
    fn entries(&self) -> &[String] {
        match self {
            SourceSpec::One(entry) => std::slice::from_ref(entry),
            SourceSpec::Many(entries) => entries,
        }
    }
}

/// A declarative copy specification.
///
/// `source` entries are relative to the source root. `dest`, when present,
/// is relative to the destination root; otherwise the destination root
/// itself receives the copies. The destination is always treated as a
/// directory, never as a rename target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyGroup {
    pub source: SourceSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

/// Resolve one group into filesystem operations.
///
/// A `dest` containing [`CULTURE_TOKEN`] multiplies the group: the parent
/// call performs no direct filesystem action and instead resolves one
/// substituted clone per culture against the same roots.
pub fn resolve(group: &CopyGroup, source_root: &Path, dest_root: &Path) -> Result<()> {
    validate(group)?;
    if source_root.as_os_str().is_empty() {
        return Err(Error::InvalidArgument {
            name: "sourceRoot".to_string(),
        });
    }
    if dest_root.as_os_str().is_empty() {
        return Err(Error::InvalidArgument {
            name: "destRoot".to_string(),
        });
    }

    // multiply by culture name (recursion fully replaces the parent)
    if group
        .dest
        .as_deref()
        .is_some_and(|dest| dest.contains(CULTURE_TOKEN))
    {
        for culture in CULTURE_NAMES {
            let localized = substitute(group, culture);
            // substitution is total, so a clone can never multiply again
            debug_assert!(!contains_token(&localized));
            resolve(&localized, source_root, dest_root)?;
        }
        return Ok(());
    }

    let sources: Vec<PathBuf> = group
        .source
        .entries()
        .iter()
        .map(|entry| source_root.join(entry))
        .collect();

    let dest_dir = match &group.dest {
        Some(dest) => dest_root.join(dest),
        None => dest_root.to_path_buf(),
    };
    debug!("copy group -> {}", dest_dir.display());

    fileops::make_dir(&dest_dir)?;
    let options = group
        .options
        .as_deref()
        .map(CopyOptions::parse)
        .unwrap_or_default();
    fileops::copy(options, &sources, &dest_dir)
}

/// Resolve each group in list order.
///
/// Order is significant: later groups may overwrite what earlier groups
/// placed at the same destination, and the last write wins.
pub fn resolve_all(groups: &[CopyGroup], source_root: &Path, dest_root: &Path) -> Result<()> {
    if groups.is_empty() {
        return Err(Error::InvalidArgument {
            name: "groups".to_string(),
        });
    }
    for group in groups {
        resolve(group, source_root, dest_root)?;
    }
    Ok(())
}

fn validate(group: &CopyGroup) -> Result<()> {
    match &group.source {
        SourceSpec::One(entry) if entry.is_empty() => Err(Error::InvalidArgument {
            name: "group.source".to_string(),
        }),
        SourceSpec::Many(entries) if entries.is_empty() => Err(Error::InvalidArgument {
            name: "group.source.length".to_string(),
        }),
        SourceSpec::Many(entries) if entries.iter().any(String::is_empty) => {
            Err(Error::InvalidArgument {
                name: "group.source[i]".to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Deep-clone `group`, replacing the culture token in every string field.
fn substitute(group: &CopyGroup, culture: &str) -> CopyGroup {
    let replace = |value: &String| value.replace(CULTURE_TOKEN, culture);
    CopyGroup {
        source: match &group.source {
            SourceSpec::One(entry) => SourceSpec::One(replace(entry)),
            SourceSpec::Many(entries) => SourceSpec::Many(entries.iter().map(replace).collect()),
        },
        dest: group.dest.as_ref().map(replace),
        options: group.options.as_ref().map(replace),
    }
}

fn contains_token(group: &CopyGroup) -> bool {
    group
        .source
        .entries()
        .iter()
        .any(|entry| entry.contains(CULTURE_TOKEN))
        || group
            .dest
            .as_deref()
            .is_some_and(|dest| dest.contains(CULTURE_TOKEN))
        || group
            .options
            .as_deref()
            .is_some_and(|options| options.contains(CULTURE_TOKEN))
}
