//! # Pattern Matching
//!
//! Glob-style discovery over an enumerated filesystem tree. This is the
//! lowest layer of the staging engine: [`find`] lists candidate paths under
//! a root directory and filters them through a compiled glob pattern.
//!
//! Pattern syntax follows the conventions of the staging configuration
//! files:
//!
//! - `*` and `?` match within a single path component.
//! - `+(a|b|c)` alternation matches any of the listed branches.
//! - A leading `!` negates the pattern (everything that does not match).
//! - A pattern without path separators matches by base name anywhere in the
//!   tree (base-name matching is on by default and can be disabled through
//!   [`MatchOptions::match_base`]).
//!
//! Enumeration is sorted by file name, so for a fixed filesystem state the
//! returned order is deterministic. The root itself is never part of the
//! result, which lets callers safely re-relativize matches against it.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions as GlobOptions, Pattern};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Options controlling how [`find`] enumerates and matches.
///
/// `no_recurse` is consumed by the enumerator and never reaches the matcher;
/// the remaining fields pass through to glob matching.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Restrict enumeration to the immediate children of the root instead
    /// of the full recursive tree.
    pub no_recurse: bool,
    /// Allow wildcards to match a leading dot in a file name.
    pub dot: bool,
    /// Match slash-free patterns against the base name alone.
    pub match_base: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            no_recurse: false,
            dot: false,
            match_base: true,
        }
    }
}

impl MatchOptions {
    /// Options that only consider the immediate children of the root.
    pub fn no_recurse() -> Self {
        Self {
            no_recurse: true,
            ..Default::default()
        }
    }
}

/// A pattern compiled into its matchable form.
///
/// Alternation is expanded up front: `+(a|b)*.ps1` compiles into one
/// `glob::Pattern` per branch, and a candidate matches when any branch does.
struct CompiledPattern {
    negate: bool,
    match_base: bool,
    branches: Vec<Pattern>,
    glob_options: GlobOptions,
}

impl CompiledPattern {
    fn compile(pattern: &str, options: &MatchOptions) -> Result<Self> {
        let (negate, body) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };

        let branches = expand_alternation(body)
            .iter()
            .map(|branch| Pattern::new(branch))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let glob_options = GlobOptions {
            // wildcards stay within one path component
            require_literal_separator: true,
            require_literal_leading_dot: !options.dot,
            ..GlobOptions::new()
        };

        Ok(Self {
            negate,
            match_base: options.match_base && !body.contains('/'),
            branches,
            glob_options,
        })
    }

    fn matches(&self, path: &Path) -> bool {
        let candidate = if self.match_base {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            path.to_string_lossy().into_owned()
        };

        let hit = self
            .branches
            .iter()
            .any(|branch| branch.matches_with(&candidate, self.glob_options));
        hit != self.negate
    }
}

/// Expand `+(a|b|c)` alternation groups into plain glob patterns.
///
/// Each group multiplies the pattern by its branches; groups may appear more
/// than once and are expanded left to right.
fn expand_alternation(pattern: &str) -> Vec<String> {
    let Some(start) = pattern.find("+(") else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[start..].find(')').map(|i| start + i) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..start];
    let body = &pattern[start + 2..close];
    let suffix = &pattern[close + 1..];

    body.split('|')
        .flat_map(|branch| expand_alternation(&format!("{prefix}{branch}{suffix}")))
        .collect()
}

/// Find all paths under `root` matching `pattern`.
///
/// The root is resolved to an absolute path before enumeration, so every
/// returned match strictly starts with it and strips to a non-empty
/// relative path. The root itself is never returned.
pub fn find(root: &Path, pattern: &str, options: &MatchOptions) -> Result<Vec<PathBuf>> {
    if pattern.is_empty() {
        return Err(Error::InvalidArgument {
            name: "pattern".to_string(),
        });
    }
    if root.as_os_str().is_empty() {
        return Err(Error::InvalidArgument {
            name: "root".to_string(),
        });
    }

    // normalize first, so matches can be re-relativized against the root
    let root = std::path::absolute(root)?;

    let items: Vec<PathBuf> = if options.no_recurse {
        let mut children = Vec::new();
        for entry in fs::read_dir(&root)? {
            children.push(entry?.path());
        }
        children.sort();
        children
    } else {
        let mut items = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            items.push(entry.into_path());
        }
        items
    };

    let compiled = CompiledPattern::compile(pattern, options)?;
    Ok(items
        .into_iter()
        .filter(|item| compiled.matches(item))
        .collect())
}
