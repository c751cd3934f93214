// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for command-line tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A wiki page directory plus room for submissions and config files.
pub struct Wiki {
    dir: TempDir,
}

impl Wiki {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("pages")).unwrap();
        Self { dir }
    }

    /// Store a page. `title` uses the database form, e.g. `Template:Box`.
    pub fn with_page(self, title: &str, text: &str) -> Self {
        let stem = title.replace(':', "__");
        std::fs::write(self.pages().join(format!("{stem}.wiki")), text).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn pages(&self) -> PathBuf {
        self.dir.path().join("pages")
    }

    /// Write a file next to the page directory.
    pub fn file(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }
}
