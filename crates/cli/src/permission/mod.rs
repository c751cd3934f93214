// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Permission handling for raw HTML edits.
//!
//! This module answers one question: may this principal work with the
//! restricted markup? It includes:
//!
//! - The principal store interface consumed from the host
//! - The permission oracle combining anonymity, permissions and editor groups

pub mod oracle;
pub mod store;

pub use oracle::{PermissionOracle, PermissionVerdict};
pub use store::PrincipalStore;
