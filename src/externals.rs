//! # External Dependencies
//!
//! Materializes a task's declared external dependencies into its output
//! directory. Two kinds are recognized:
//!
//! - **Archive packages**: a raw `.zip` fetched by URL; the extracted
//!   contents are copied into a destination subdirectory.
//! - **NuGet V2 packages**: resolved against an index by
//!   `{repository, name, version}`; the package's own copy groups then
//!   pick files out of the extracted tree.
//!
//! Entries are processed strictly in order. A failure aborts the run
//! before later entries are touched; there is no partial-success
//! reporting.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::cache::CacheStore;
use crate::copygroup::{self, CopyGroup};
use crate::error::{Error, Result};
use crate::fileops::{self, CopyOptions};

/// A raw archive unpacked into a destination subdirectory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivePackage {
    pub url: String,
    pub dest: String,
}

/// A versioned package resolved against a NuGet V2 style index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexPackage {
    pub name: String,
    pub version: String,
    pub repository: String,
    /// Copy groups applied against the extracted package tree.
    pub cp: Vec<CopyGroup>,
}

/// The externals section of a task's staging manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalsSpec {
    #[serde(default, rename = "archivePackages", skip_serializing_if = "Vec::is_empty")]
    pub archive_packages: Vec<ArchivePackage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nugetv2: Vec<IndexPackage>,
}

/// The deterministic index URL for a versioned package.
fn index_url(package: &IndexPackage) -> String {
    format!(
        "{}/package/{}/{}",
        package.repository.trim_end_matches('/'),
        package.name,
        package.version
    )
}

/// Fetch and stage every declared external into `dest_root`.
pub fn materialize(spec: &ExternalsSpec, cache: &CacheStore, dest_root: &Path) -> Result<()> {
    for archive in &spec.archive_packages {
        if archive.url.is_empty() {
            return Err(Error::InvalidArgument {
                name: "archive.url".to_string(),
            });
        }
        if archive.dest.is_empty() {
            return Err(Error::InvalidArgument {
                name: "archive.dest".to_string(),
            });
        }

        let source = cache.fetch_archive(&archive.url, true)?;
        let dest = dest_root.join(&archive.dest);
        fileops::make_dir(&dest)?;
        fileops::copy_contents(
            CopyOptions {
                recursive: true,
                force: false,
            },
            &source,
            &dest,
        )?;
    }

    for package in &spec.nugetv2 {
        for (value, name) in [
            (&package.name, "package.name"),
            (&package.version, "package.version"),
            (&package.repository, "package.repository"),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidArgument {
                    name: name.to_string(),
                });
            }
        }
        if package.cp.is_empty() {
            return Err(Error::InvalidArgument {
                name: "package.cp".to_string(),
            });
        }

        let url = index_url(package);
        info!("resolving package {} {}", package.name, package.version);

        // index endpoints serve archives without the .zip suffix
        let source = cache.fetch_archive(&url, false)?;
        copygroup::resolve_all(&package.cp, &source, dest_root)?;
    }

    Ok(())
}
