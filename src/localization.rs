//! # Localization Projection
//!
//! Derives two artifacts from one task descriptor:
//!
//! - a language-neutral **resource table** mapping dotted keys
//!   (`loc.input.label.<name>`) to display strings, and
//! - a **localized descriptor** in which every localizable field is
//!   replaced by a `ms-resource:<key>` reference to that table.
//!
//! The two projections are key-consistent by construction: a field
//! produces a table entry exactly when the localized descriptor references
//! it. The descriptor is externally owned JSON, so both projections work
//! on `serde_json::Value` and touch only the recognized fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::fileops;

/// Prefix marking a value as a reference into the resource table.
pub const RESOURCE_PREFIX: &str = "ms-resource:";

/// Relative path of the resource table within a task directory.
pub const RESOURCE_TABLE_PATH: &str = "Strings/resources.resjson/en-US/resources.resjson";

/// File name of the localized descriptor, written next to `task.json`.
pub const LOCALIZED_DESCRIPTOR_FILE: &str = "task.loc.json";

/// Top-level descriptor fields localized under their own names.
const TOP_LEVEL_FIELDS: [&str; 4] = [
    "friendlyName",
    "helpMarkDown",
    "description",
    "instanceNameFormat",
];

/// Derive the resource table for a descriptor.
///
/// One entry is emitted per present localizable field: the top-level
/// strings, each group's display name keyed by group name, each input's
/// label and non-empty help text keyed by input name, and each message
/// keyed by its own key.
pub fn project_resources(task: &Value) -> Map<String, Value> {
    let mut resources = Map::new();

    for field in TOP_LEVEL_FIELDS {
        if let Some(value) = task.get(field) {
            resources.insert(format!("loc.{field}"), value.clone());
        }
    }

    if let Some(groups) = task.get("groups").and_then(Value::as_array) {
        for group in groups {
            let name = match group.get("name").and_then(Value::as_str) {
                Some(name) => name,
                None => continue,
            };
            if let Some(display_name) = group.get("displayName") {
                resources.insert(format!("loc.group.displayName.{name}"), display_name.clone());
            }
        }
    }

    if let Some(inputs) = task.get("inputs").and_then(Value::as_array) {
        for input in inputs {
            let name = match input.get("name").and_then(Value::as_str) {
                Some(name) => name,
                None => continue,
            };
            if let Some(label) = input.get("label") {
                resources.insert(format!("loc.input.label.{name}"), label.clone());
            }
            if has_help_text(input) {
                resources.insert(
                    format!("loc.input.help.{name}"),
                    input["helpMarkDown"].clone(),
                );
            }
        }
    }

    if let Some(messages) = task.get("messages").and_then(Value::as_object) {
        for (key, message) in messages {
            resources.insert(format!("loc.messages.{key}"), message.clone());
        }
    }

    resources
}

/// Derive the localized descriptor: a structurally identical copy with
/// every localizable field's value replaced by its resource reference.
pub fn project_localized(task: &Value) -> Value {
    let mut localized = task.clone();

    for field in TOP_LEVEL_FIELDS {
        if let Some(slot) = localized.get_mut(field) {
            *slot = reference(&format!("loc.{field}"));
        }
    }

    if let Some(groups) = localized.get_mut("groups").and_then(Value::as_array_mut) {
        for group in groups {
            let name = match group.get("name").and_then(Value::as_str) {
                Some(name) => name.to_owned(),
                None => continue,
            };
            if let Some(slot) = group.get_mut("displayName") {
                *slot = reference(&format!("loc.group.displayName.{name}"));
            }
        }
    }

    if let Some(inputs) = localized.get_mut("inputs").and_then(Value::as_array_mut) {
        for input in inputs {
            let name = match input.get("name").and_then(Value::as_str) {
                Some(name) => name.to_owned(),
                None => continue,
            };
            let localizable_help = has_help_text(input);
            if let Some(slot) = input.get_mut("label") {
                *slot = reference(&format!("loc.input.label.{name}"));
            }
            if localizable_help {
                input["helpMarkDown"] = reference(&format!("loc.input.help.{name}"));
            }
        }
    }

    if let Some(messages) = localized.get_mut("messages").and_then(Value::as_object_mut) {
        let keys: Vec<String> = messages.keys().cloned().collect();
        for key in keys {
            messages[&key] = reference(&format!("loc.messages.{key}"));
        }
    }

    localized
}

/// Write the resource table for `task` under `task_dir`, returning the
/// path written.
pub fn write_resource_table(task: &Value, task_dir: &Path) -> Result<PathBuf> {
    let table_path = task_dir.join(RESOURCE_TABLE_PATH);
    if let Some(parent) = table_path.parent() {
        fileops::make_dir(parent)?;
    }

    let resources = project_resources(task);
    fs::write(
        &table_path,
        serde_json::to_string_pretty(&Value::Object(resources))?,
    )?;
    Ok(table_path)
}

/// Read `task.json` from `task_dir` and write the localized descriptor
/// next to it, returning the path written.
pub fn write_localized_descriptor(task_dir: &Path) -> Result<PathBuf> {
    let descriptor_path = task_dir.join(crate::descriptor::DESCRIPTOR_FILE);
    if !descriptor_path.is_file() {
        return Err(Error::NotFound {
            path: descriptor_path.display().to_string(),
        });
    }

    let task: Value = serde_json::from_str(&fs::read_to_string(&descriptor_path)?)?;
    let localized = project_localized(&task);

    let out_path = task_dir.join(LOCALIZED_DESCRIPTOR_FILE);
    fs::write(&out_path, serde_json::to_string_pretty(&localized)?)?;
    Ok(out_path)
}

fn reference(key: &str) -> Value {
    Value::String(format!("{RESOURCE_PREFIX}{key}"))
}

/// An input's help text is localizable when present as a non-empty string.
fn has_help_text(input: &Value) -> bool {
    input
        .get("helpMarkDown")
        .and_then(Value::as_str)
        .is_some_and(|help| !help.is_empty())
}
