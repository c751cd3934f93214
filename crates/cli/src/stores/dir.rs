// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Directory-backed page store.
//!
//! Each page is one file named after its database key, with `:` written as
//! `__` and `/` as `%2F`. The extension selects the content model:
//!
//! - `Main_Page.wiki` → wikitext
//! - `MediaWiki__Common.css` → `css`
//! - `MediaWiki__Common.js` → `javascript`
//! - `Data.json` → `json`

use crate::error::StoreError;
use crate::page::{ContentModel, PageContent, PageId, PageStore};
use std::path::{Path, PathBuf};

const MODELS: &[(&str, Option<&str>)] = &[
    ("wiki", None),
    ("css", Some("css")),
    ("js", Some("javascript")),
    ("json", Some("json")),
];

/// Page store reading files from a directory.
#[derive(Clone, Debug)]
pub struct DirPageStore {
    root: PathBuf,
}

impl DirPageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File stem used for a page.
    pub fn file_stem(page: &PageId) -> String {
        page.as_str().replace(':', "__").replace('/', "%2F")
    }

    /// Path a new wikitext page would be written to.
    pub fn wikitext_path(&self, page: &PageId) -> PathBuf {
        self.root.join(format!("{}.wiki", Self::file_stem(page)))
    }

    fn locate(&self, page: &PageId) -> Option<(PathBuf, ContentModel)> {
        let stem = Self::file_stem(page);
        MODELS.iter().find_map(|(ext, model)| {
            let path = self.root.join(format!("{}.{}", stem, ext));
            path.is_file().then(|| {
                let model = match model {
                    Some(name) => ContentModel::Other((*name).to_string()),
                    None => ContentModel::Wikitext,
                };
                (path, model)
            })
        })
    }
}

impl PageStore for DirPageStore {
    fn read_stored_content(&self, page: &PageId) -> Result<Option<PageContent>, StoreError> {
        let Some((path, model)) = self.locate(page) else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(&path)?;
        Ok(Some(PageContent { model, text }))
    }

    fn page_exists(&self, page: &PageId) -> Result<bool, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::unavailable(
                "page directory",
                format!("{} is not a directory", self.root.display()),
            ));
        }
        Ok(self.locate(page).is_some())
    }

    fn is_wikitext_page(&self, page: &PageId) -> Result<bool, StoreError> {
        Ok(self
            .locate(page)
            .map(|(_, model)| model == ContentModel::Wikitext)
            .unwrap_or(true))
    }
}

#[cfg(test)]
#[path = "dir_tests.rs"]
mod tests;
