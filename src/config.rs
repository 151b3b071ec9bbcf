//! # Configuration Schema and Parsing
//!
//! Serde models for the two JSON configuration files the orchestrator
//! consumes:
//!
//! - **`stagehand.json`** at the repository root: the list of tasks to
//!   build and the default resource patterns staged for every task.
//! - **`stage.json`** in a task directory (optional): the task's external
//!   dependencies and additional copy groups.
//!
//! Parsing failures surface as `ConfigParse` errors naming the offending
//! file; a missing per-task manifest is not an error, it simply means the
//! task has nothing beyond the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::copygroup::CopyGroup;
use crate::error::{Error, Result};
use crate::externals::ExternalsSpec;

/// File name of the root build configuration.
pub const BUILD_OPTIONS_FILE: &str = "stagehand.json";

/// File name of a task's optional staging manifest.
pub const STAGE_FILE: &str = "stage.json";

/// The root build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Tasks built when no filter is supplied.
    pub tasks: Vec<String>,
    /// Glob patterns staged into every task's output directory.
    #[serde(default)]
    pub task_resources: Vec<String>,
}

/// A task's staging manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageManifest {
    /// External dependencies materialized before resources are staged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub externals: Option<ExternalsSpec>,
    /// Copy groups applied after the default resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cp: Vec<CopyGroup>,
}

/// Load the root build configuration from `path`.
pub fn load_build_options(path: &Path) -> Result<BuildOptions> {
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.display().to_string(),
        });
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| Error::ConfigParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load a task's staging manifest, defaulting to empty when the task has
/// no `stage.json`.
pub fn load_stage_manifest(task_dir: &Path) -> Result<StageManifest> {
    let path = task_dir.join(STAGE_FILE);
    if !path.is_file() {
        return Ok(StageManifest::default());
    }
    let raw = fs::read_to_string(&path)?;
    serde_json::from_str(&raw).map_err(|e| Error::ConfigParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
