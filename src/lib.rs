//! # Stagehand Library
//!
//! This library provides the core functionality for staging multi-task
//! plugin repositories: resolving external dependencies, localizing text
//! resources, and projecting files into a layout-correct build tree. It is
//! designed to be used by the `stagehand` command-line tool but can also
//! be integrated into other build drivers.
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::Path;
//! use stagehand::pattern::{self, MatchOptions};
//! use stagehand::staging;
//!
//! // find every PowerShell file under a task directory
//! let matches = pattern::find(
//!     Path::new("tasks/Echo"),
//!     "+(*.ps1|*.psd1|*.psm1)",
//!     &MatchOptions::default(),
//! ).unwrap();
//!
//! // project them into the build tree, mirroring relative paths
//! staging::copy_matching(
//!     "+(*.ps1|*.psd1|*.psm1)",
//!     Path::new("tasks/Echo"),
//!     Path::new("_build/Echo"),
//!     &MatchOptions::default(),
//! ).unwrap();
//! ```
//!
//! ## Core Concepts
//!
//! - **Pattern matching (`pattern`)**: glob-style discovery over an
//!   enumerated file tree, with base-name matching on by default.
//! - **File operations (`fileops`)**: fail-fast copy/remove/mkdir
//!   primitives every higher layer is built from.
//! - **Caching (`cache`)**: idempotent, URL-keyed download and archive
//!   extraction guarded by completion markers.
//! - **Copy groups (`copygroup`)**: declarative copy specifications,
//!   including culture-variant multiplication.
//! - **Staging (`staging`)**: pattern-driven projection of files into an
//!   output tree.
//! - **Externals (`externals`)**: materialization of archive and indexed
//!   package dependencies.
//! - **Localization (`localization`)**: resource-table and localized
//!   descriptor projection from task descriptors.
//! - **Build pipeline (`builder`)**: the per-task orchestration tying the
//!   pieces together under one request-scoped context.
//!
//! Execution is strictly sequential and synchronous; every error is fatal
//! to the run and surfaces through the crate-wide [`error::Result`].

pub mod builder;
pub mod cache;
pub mod config;
pub mod copygroup;
pub mod descriptor;
pub mod error;
pub mod externals;
pub mod fileops;
pub mod localization;
pub mod output;
pub mod pattern;
pub mod staging;

#[cfg(test)]
mod pattern_proptest;
