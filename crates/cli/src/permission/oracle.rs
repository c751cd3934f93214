// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Authorization decision for raw HTML edits.

use super::store::PrincipalStore;
use crate::config::GateConfig;
use crate::error::StoreError;
use crate::page::Principal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Memoizable answer of the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionVerdict {
    pub authorized: bool,
}

/// Decides whether a principal may work with the restricted markup.
///
/// Order of checks:
/// 1. Anonymous principals are never authorized
/// 2. Holding the required permission authorizes
/// 3. Membership in an editor group authorizes
///
/// The oracle does not cache; memoization belongs to the caller.
pub struct PermissionOracle {
    store: Arc<dyn PrincipalStore>,
    required_permission: String,
    editor_groups: Vec<String>,
}

impl PermissionOracle {
    pub fn new(
        store: Arc<dyn PrincipalStore>,
        required_permission: impl Into<String>,
        editor_groups: Vec<String>,
    ) -> Self {
        Self {
            store,
            required_permission: required_permission.into(),
            editor_groups,
        }
    }

    /// Create from gate configuration.
    pub fn from_config(store: Arc<dyn PrincipalStore>, config: &GateConfig) -> Self {
        Self::new(
            store,
            config.required_permission.clone(),
            config.authorized_groups(),
        )
    }

    /// Check if the principal may edit restricted markup.
    pub fn is_authorized(&self, principal: &Principal) -> Result<bool, StoreError> {
        if self.store.is_anonymous(principal)? {
            return Ok(false);
        }

        if self
            .store
            .has_permission(principal, &self.required_permission)?
        {
            return Ok(true);
        }

        if self.editor_groups.is_empty() {
            return Ok(false);
        }

        let groups = self.store.groups(principal)?;
        Ok(groups.iter().any(|g| self.editor_groups.contains(g)))
    }

    /// Same as [`is_authorized`](Self::is_authorized), wrapped as a verdict.
    pub fn verdict(&self, principal: &Principal) -> Result<PermissionVerdict, StoreError> {
        Ok(PermissionVerdict {
            authorized: self.is_authorized(principal)?,
        })
    }

    pub fn required_permission(&self) -> &str {
        &self.required_permission
    }

    pub fn editor_groups(&self) -> &[String] {
        &self.editor_groups
    }
}

#[cfg(test)]
#[path = "oracle_tests.rs"]
mod tests;
