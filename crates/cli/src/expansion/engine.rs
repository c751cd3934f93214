// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expansion engine interface.
//!
//! The gate drives the host's markup expansion engine through this small
//! surface. Handler overrides are handed to the factory as data when an
//! engine is created; an engine never outlives one check.

use crate::page::PageId;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Bounds on one expansion pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Maximum nesting of templates, parser functions and tags
    pub max_depth: usize,
    /// Maximum number of template, parser function and tag invocations
    pub max_expansions: usize,
}

/// Which budget ran out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetKind {
    Depth(usize),
    Expansions(usize),
}

impl fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetKind::Depth(limit) => write!(f, "nesting deeper than {}", limit),
            BudgetKind::Expansions(limit) => write!(f, "more than {} expansions", limit),
        }
    }
}

/// Errors raised while expanding.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("expansion budget exceeded: {0}")]
    BudgetExceeded(BudgetKind),

    #[error("page lookup failed for {page}: {message}")]
    PageLookup { page: String, message: String },

    #[error("{0}")]
    Engine(String),
}

/// The expansion context a handler runs in.
pub trait Frame {
    /// Page whose text is being expanded at this point (the frame title).
    fn frame_page(&self) -> &PageId;

    /// Page the whole expansion was started for.
    fn top_level_page(&self) -> &PageId;

    /// Expand raw markup in this frame.
    fn expand(&mut self, raw: &str) -> Result<String, ExpansionError>;
}

/// An extension tag invocation, `<name attrs>body</name>` or `{{#tag:name|body}}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagCall<'a> {
    pub name: &'a str,
    pub attrs: &'a str,
    /// `None` for self-closing tags
    pub body: Option<&'a str>,
}

/// Handler replacing an extension tag.
pub type TagHandler = Box<dyn Fn(&TagCall<'_>, &mut dyn Frame) -> Result<String, ExpansionError>>;

/// Handler replacing a parser function. Receives the raw, unexpanded
/// arguments; the first one is the text after the colon.
pub type FunctionHandler = Box<dyn Fn(&[&str], &mut dyn Frame) -> Result<String, ExpansionError>>;

/// Handler overrides, keyed by lowercase tag or function name.
#[derive(Default)]
pub struct Overrides {
    tags: HashMap<String, TagHandler>,
    functions: HashMap<String, FunctionHandler>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, name: &str, handler: TagHandler) -> Self {
        self.tags.insert(name.to_ascii_lowercase(), handler);
        self
    }

    pub fn with_function(mut self, name: &str, handler: FunctionHandler) -> Self {
        self.functions.insert(name.to_ascii_lowercase(), handler);
        self
    }

    pub fn tag(&self, name: &str) -> Option<&TagHandler> {
        self.tags.get(&name.to_ascii_lowercase())
    }

    pub fn function(&self, name: &str) -> Option<&FunctionHandler> {
        self.functions.get(&name.to_ascii_lowercase())
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(&name.to_ascii_lowercase())
    }

    /// Overridden tag names, sorted.
    pub fn tag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Overridden function names, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.functions.is_empty()
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("tags", &self.tag_names())
            .field("functions", &self.function_names())
            .finish()
    }
}

/// One engine instance, owned by a single check.
pub trait ExpansionEngine {
    /// Fully expand `content` as the text of `page`.
    fn expand(
        &mut self,
        content: &str,
        page: &PageId,
        limits: ExpansionLimits,
    ) -> Result<String, ExpansionError>;
}

/// Creates dedicated engine instances.
pub trait ExpansionEngineFactory: Send + Sync {
    fn create(&self, overrides: Overrides) -> Box<dyn ExpansionEngine>;
}
