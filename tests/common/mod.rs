//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_task("Echo");
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::descriptors;
    pub use super::TestFixture;
}

/// Common descriptor JSON snippets for testing.
#[allow(dead_code)]
pub mod descriptors {
    /// A minimal valid task descriptor.
    pub const ECHO: &str = r#"{
  "id": "e213ff0f-5d5c-4791-802d-52ea3e7be1f1",
  "name": "Echo",
  "friendlyName": "Echo",
  "description": "Echo a message",
  "instanceNameFormat": "Echo $(msg)",
  "inputs": [
    { "name": "msg", "label": "Message", "helpMarkDown": "The message to echo" }
  ]
}"#;

    /// A descriptor that fails validation (malformed id).
    pub const BAD_ID: &str = r#"{
  "id": "not-a-guid",
  "name": "Broken",
  "friendlyName": "Broken",
  "instanceNameFormat": "Broken"
}"#;
}

/// A test fixture that lays out a temporary task repository.
///
/// This struct simplifies the common pattern of creating a temp directory
/// with a `stagehand.json` plus one or more task directories.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// Write a `stagehand.json` naming the given tasks, with the standard
    /// default resource patterns.
    pub fn with_config(self, tasks: &[&str]) -> Self {
        let tasks_json: Vec<String> = tasks.iter().map(|t| format!("\"{t}\"")).collect();
        let config = format!(
            r#"{{
  "tasks": [{}],
  "taskResources": ["task.json", "task.loc.json", "icon.png", "Strings"]
}}"#,
            tasks_json.join(", ")
        );
        self.temp_dir
            .child("stagehand.json")
            .write_str(&config)
            .expect("failed to write config");
        self
    }

    /// Add a task directory with the given descriptor JSON and an icon.
    pub fn with_task(self, name: &str, descriptor: &str) -> Self {
        let task = self.temp_dir.child(format!("tasks/{name}"));
        task.child("task.json")
            .write_str(descriptor)
            .expect("failed to write descriptor");
        task.child("icon.png")
            .write_str("png")
            .expect("failed to write icon");
        self
    }

    /// Add an arbitrary file under the fixture root.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        self.temp_dir
            .child(relative)
            .write_str(contents)
            .expect("failed to write file");
        self
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
