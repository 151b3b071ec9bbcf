//! # Build Pipeline
//!
//! The per-task orchestration: for every selected task, validate its
//! descriptor, emit the localization artifacts, materialize external
//! dependencies, and stage resources into the build tree.
//!
//! All roots are explicit fields on [`BuildContext`] rather than ambient
//! process state, so the pipeline can be driven against any directory
//! layout without changing the working directory or environment.

use std::path::{Path, PathBuf};

use log::info;
use serde_json::Value;

use crate::cache::CacheStore;
use crate::config::{self, BuildOptions};
use crate::descriptor;
use crate::error::{Error, Result};
use crate::externals;
use crate::fileops::{self, PathKind};
use crate::localization;
use crate::output;
use crate::pattern::{self, MatchOptions};
use crate::staging;

/// Directory under the repository root that holds task sources.
pub const TASKS_DIR: &str = "tasks";

/// Request-scoped configuration for one build run.
pub struct BuildContext {
    repo_root: PathBuf,
    build_dir: PathBuf,
    cache: CacheStore,
    options: BuildOptions,
}

impl BuildContext {
    /// Create a context for `repo_root`, loading its `stagehand.json`.
    pub fn new(repo_root: PathBuf, build_dir: PathBuf, cache: CacheStore) -> Result<Self> {
        let options = config::load_build_options(&repo_root.join(config::BUILD_OPTIONS_FILE))?;
        Ok(Self {
            repo_root,
            build_dir,
            cache,
            options,
        })
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Remove the build tree and recreate it empty.
    pub fn clean(&self) -> Result<()> {
        fileops::remove(&self.build_dir)?;
        fileops::make_dir(&self.build_dir)
    }

    /// Stage every configured task, or only those whose directory name
    /// matches `filter`.
    pub fn build(&self, filter: Option<&str>) -> Result<()> {
        let selected = match filter {
            Some(filter) => self.matching_tasks(filter)?,
            None => self.options.tasks.clone(),
        };

        for task_name in &selected {
            self.build_task(task_name)?;
        }

        output::banner("Build successful", true);
        Ok(())
    }

    /// Stage one task into the build tree.
    pub fn build_task(&self, task_name: &str) -> Result<()> {
        output::banner(&format!("Building: {task_name}"), false);
        let task_dir = self.repo_root.join(TASKS_DIR).join(task_name);
        fileops::ensure_exists(&task_dir)?;

        // the descriptor decides the output directory name
        let descriptor_path = task_dir.join(descriptor::DESCRIPTOR_FILE);
        let out_dir = if fileops::exists(PathKind::File, &descriptor_path) {
            let task = descriptor::load(&task_dir)?;
            descriptor::validate(&task)?;

            // create loc files next to the descriptor
            localization::write_localized_descriptor(&task_dir)?;
            localization::write_resource_table(&task, &task_dir)?;

            let name = task
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(task_name);
            self.build_dir.join(name)
        } else {
            self.build_dir.join(task_name)
        };
        fileops::make_dir(&out_dir)?;

        let manifest = config::load_stage_manifest(&task_dir)?;
        if let Some(spec) = &manifest.externals {
            info!("getting task externals");
            externals::materialize(spec, &self.cache, &out_dir)?;
        }

        info!("copying task resources");
        staging::copy_task_resources(
            &self.options.task_resources,
            &manifest.cp,
            &task_dir,
            &out_dir,
        )
    }

    /// Expand a task filter against the tasks directory.
    fn matching_tasks(&self, filter: &str) -> Result<Vec<String>> {
        let tasks_root = self.repo_root.join(TASKS_DIR);
        let matches = pattern::find(&tasks_root, filter, &MatchOptions::no_recurse())?;
        if matches.is_empty() {
            return Err(Error::NotFound {
                path: format!("tasks matching {filter}"),
            });
        }

        Ok(matches
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }
}
