// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Gate configuration loaded from TOML.

use crate::expansion::ExpansionLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Permission that allows working with raw HTML markup.
pub const DEFAULT_REQUIRED_PERMISSION: &str = "edit-html";
/// Group whose members can always work with raw HTML markup.
pub const DEFAULT_EDITOR_GROUP: &str = "sysop";
/// Default nesting limit for templates and parser functions.
pub const DEFAULT_MAX_DEPTH: usize = 40;
/// Default number of template, function and tag invocations per expansion.
pub const DEFAULT_MAX_EXPANSIONS: usize = 5000;
/// Default separator between force-expanded conditional branches.
pub const DEFAULT_BRANCH_SEPARATOR: &str = "\n";

fn default_true() -> bool {
    true
}

fn default_required_permission() -> String {
    DEFAULT_REQUIRED_PERMISSION.to_string()
}

fn default_editor_groups() -> Vec<String> {
    vec![DEFAULT_EDITOR_GROUP.to_string()]
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_expansions() -> usize {
    DEFAULT_MAX_EXPANSIONS
}

fn default_branch_separator() -> String {
    DEFAULT_BRANCH_SEPARATOR.to_string()
}

/// Top-level gate configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Whether raw HTML is enabled on the wiki at all.
    /// When false the gate is inert and allows everything.
    #[serde(default = "default_true")]
    pub raw_html_enabled: bool,

    /// Permission that authorizes raw HTML edits
    #[serde(default = "default_required_permission")]
    pub required_permission: String,

    /// Groups whose members are authorized regardless of permissions
    #[serde(default = "default_editor_groups")]
    pub editor_groups: Vec<String>,

    /// One more authorized group, kept separate so site config can add
    /// a dedicated editor group without restating the defaults
    #[serde(default)]
    pub extra_editor_group: Option<String>,

    /// Limits for the commit-time expansion pass
    #[serde(default)]
    pub expansion: ExpansionConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            raw_html_enabled: true,
            required_permission: default_required_permission(),
            editor_groups: default_editor_groups(),
            extra_editor_group: None,
            expansion: ExpansionConfig::default(),
        }
    }
}

/// Expansion pass configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExpansionConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,

    /// Joins the branches of force-expanded conditionals
    #[serde(default = "default_branch_separator")]
    pub branch_separator: String,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            branch_separator: default_branch_separator(),
        }
    }
}

impl ExpansionConfig {
    pub fn limits(&self) -> ExpansionLimits {
        ExpansionLimits {
            max_depth: self.max_depth,
            max_expansions: self.max_expansions,
        }
    }
}

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl GateConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from a file if one is given, defaults otherwise. A given path
    /// that cannot be read is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Every group that authorizes raw HTML edits.
    pub fn authorized_groups(&self) -> Vec<String> {
        let mut groups = self.editor_groups.clone();
        if let Some(extra) = self.extra_editor_group.as_ref().filter(|g| !g.is_empty()) {
            if !groups.contains(extra) {
                groups.push(extra.clone());
            }
        }
        groups
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
