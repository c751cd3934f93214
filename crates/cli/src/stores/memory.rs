// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory page store.

use crate::error::StoreError;
use crate::page::{PageContent, PageId, PageStore};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Page store backed by a map. Counts content reads so callers can verify
/// memoization.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: RwLock<HashMap<PageId, PageContent>>,
    reads: AtomicUsize,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a wikitext page.
    pub fn with_page(self, title: &str, text: &str) -> Self {
        self.insert(PageId::new(title), PageContent::wikitext(text));
        self
    }

    /// Builder-style insert of a page with an explicit content model.
    pub fn with_content(self, title: &str, content: PageContent) -> Self {
        self.insert(PageId::new(title), content);
        self
    }

    /// Store a revision, replacing the previous one.
    pub fn insert(&self, page: PageId, content: PageContent) {
        self.pages.write().insert(page, content);
    }

    /// Number of `read_stored_content` calls so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl PageStore for MemoryPageStore {
    fn read_stored_content(&self, page: &PageId) -> Result<Option<PageContent>, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.pages.read().get(page).cloned())
    }

    fn page_exists(&self, page: &PageId) -> Result<bool, StoreError> {
        Ok(self.pages.read().contains_key(page))
    }

    fn is_wikitext_page(&self, page: &PageId) -> Result<bool, StoreError> {
        Ok(self
            .pages
            .read()
            .get(page)
            .map(PageContent::is_wikitext)
            .unwrap_or(true))
    }
}
