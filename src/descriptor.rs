//! # Task Descriptors
//!
//! Loading and validation of `task.json` files. The descriptor schema is
//! externally owned; validation covers only the fields the build relies
//! on, and everything else passes through untouched.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};

/// File name of a task's descriptor.
pub const DESCRIPTOR_FILE: &str = "task.json";

/// Read and parse the descriptor from a task directory.
pub fn load(task_dir: &Path) -> Result<Value> {
    let path = task_dir.join(DESCRIPTOR_FILE);
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.display().to_string(),
        });
    }

    let raw = fs::read_to_string(&path)?;
    serde_json::from_str(&raw).map_err(|e| Error::ConfigParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Validate the structure of a task descriptor.
pub fn validate(task: &Value) -> Result<()> {
    let id = task.get("id").and_then(Value::as_str).unwrap_or_default();
    if !uuid_pattern().is_match(id) {
        return Err(Error::Descriptor {
            message: "id is a required guid".to_string(),
        });
    }

    let name = task.get("name").and_then(Value::as_str).unwrap_or_default();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::Descriptor {
            message: "name is a required alphanumeric string".to_string(),
        });
    }

    let friendly_name = task
        .get("friendlyName")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if friendly_name.is_empty() || friendly_name.chars().count() > 40 {
        return Err(Error::Descriptor {
            message: "friendlyName is a required string <= 40 chars".to_string(),
        });
    }

    if task
        .get("instanceNameFormat")
        .and_then(Value::as_str)
        .is_none_or(str::is_empty)
    {
        return Err(Error::Descriptor {
            message: "instanceNameFormat is required".to_string(),
        });
    }

    Ok(())
}

fn uuid_pattern() -> &'static Regex {
    static UUID: OnceLock<Regex> = OnceLock::new();
    UUID.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("uuid pattern is valid")
    })
}
