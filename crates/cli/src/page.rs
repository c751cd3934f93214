// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Page, principal and content types shared by every part of the gate.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace prefix used when a transclusion names a bare template.
pub const TEMPLATE_NAMESPACE: &str = "Template";

/// Identity of a wiki page, as its prefixed database key (`Template:Foo_bar`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Create a page identity from a display or database title.
    ///
    /// Surrounding whitespace is trimmed, spaces become underscores and the
    /// first letter of the title (after any namespace) is uppercased.
    pub fn new(title: impl AsRef<str>) -> Self {
        let key = title.as_ref().trim().replace(' ', "_");
        let key = match key.split_once(':') {
            Some((ns, rest)) if !ns.is_empty() => {
                format!("{}:{}", capitalize(ns), capitalize(rest.trim_start_matches('_')))
            }
            Some((_, rest)) => capitalize(rest.trim_start_matches('_')),
            None => capitalize(&key),
        };
        Self(key)
    }

    /// Resolve a transclusion target the way `{{Name}}` does.
    ///
    /// A leading colon selects the main namespace, a name that already carries
    /// a namespace is used as is, anything else lands in `Template:`.
    pub fn transclusion_target(name: &str) -> Self {
        let name = name.trim();
        if let Some(main) = name.strip_prefix(':') {
            return Self::new(main);
        }
        if name.contains(':') {
            return Self::new(name);
        }
        Self::new(format!("{}:{}", TEMPLATE_NAMESPACE, name))
    }

    /// The prefixed database key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace part of the title, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(':').map(|(ns, _)| ns)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The acting user. Anonymity and rights are answered by a `PrincipalStore`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content model of a page revision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentModel {
    #[default]
    Wikitext,
    /// Any non-wikitext model (`css`, `javascript`, `json`, ...)
    Other(String),
}

/// Text of a page revision together with its content model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub model: ContentModel,
    pub text: String,
}

impl PageContent {
    pub fn wikitext(text: impl Into<String>) -> Self {
        Self {
            model: ContentModel::Wikitext,
            text: text.into(),
        }
    }

    pub fn other(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: ContentModel::Other(model.into()),
            text: text.into(),
        }
    }

    pub fn is_wikitext(&self) -> bool {
        self.model == ContentModel::Wikitext
    }

    /// The text, only when the content is wikitext.
    pub fn as_wikitext(&self) -> Option<&str> {
        self.is_wikitext().then_some(self.text.as_str())
    }
}

/// An in-flight edit: what is being saved, where, and by whom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditCandidate {
    pub content: PageContent,
    pub page: PageId,
    pub principal: Principal,
}

impl EditCandidate {
    pub fn new(content: PageContent, page: PageId, principal: Principal) -> Self {
        Self {
            content,
            page,
            principal,
        }
    }
}

/// Read access to the host's page storage.
pub trait PageStore: Send + Sync {
    /// Text of the latest stored revision, `None` if the page does not exist.
    fn read_stored_content(&self, page: &PageId) -> Result<Option<PageContent>, StoreError>;

    fn page_exists(&self, page: &PageId) -> Result<bool, StoreError>;

    /// Whether the page's content model is wikitext.
    fn is_wikitext_page(&self, page: &PageId) -> Result<bool, StoreError>;
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
