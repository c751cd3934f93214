// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local implementations of the host collaborators.
//!
//! The gate only depends on the `PageStore` and `PrincipalStore` traits.
//! These implementations back the command-line tool and the test suite:
//!
//! - `MemoryPageStore` keeps pages in a map
//! - `DirPageStore` reads `<Title>.wiki` files from a directory
//! - `StaticPrincipalStore` answers from a fixed table of principals

pub mod dir;
pub mod memory;
pub mod principals;

pub use dir::DirPageStore;
pub use memory::MemoryPageStore;
pub use principals::{PrincipalRecord, StaticPrincipalStore};
