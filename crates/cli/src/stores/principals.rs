// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed principal table.

use crate::error::StoreError;
use crate::page::Principal;
use crate::permission::PrincipalStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the store knows about one principal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrincipalRecord {
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Principal store answering from a table.
///
/// Principals missing from the table are treated as anonymous visitors,
/// the same way an unknown IP editor is.
#[derive(Clone, Debug, Default)]
pub struct StaticPrincipalStore {
    principals: HashMap<String, PrincipalRecord>,
}

impl StaticPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registered user with groups and permissions.
    pub fn with_user(mut self, name: &str, groups: &[&str], permissions: &[&str]) -> Self {
        self.principals.insert(
            name.to_string(),
            PrincipalRecord {
                anonymous: false,
                groups: groups.iter().map(|g| g.to_string()).collect(),
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
            },
        );
        self
    }

    /// Add an anonymous principal. Groups are kept to show they are ignored.
    pub fn with_anonymous(mut self, name: &str, groups: &[&str]) -> Self {
        self.principals.insert(
            name.to_string(),
            PrincipalRecord {
                anonymous: true,
                groups: groups.iter().map(|g| g.to_string()).collect(),
                permissions: Vec::new(),
            },
        );
        self
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, name: impl Into<String>, record: PrincipalRecord) {
        self.principals.insert(name.into(), record);
    }

    fn record(&self, principal: &Principal) -> Option<&PrincipalRecord> {
        self.principals.get(principal.name())
    }
}

impl PrincipalStore for StaticPrincipalStore {
    fn is_anonymous(&self, principal: &Principal) -> Result<bool, StoreError> {
        Ok(self.record(principal).map(|r| r.anonymous).unwrap_or(true))
    }

    fn groups(&self, principal: &Principal) -> Result<Vec<String>, StoreError> {
        Ok(self
            .record(principal)
            .map(|r| r.groups.clone())
            .unwrap_or_default())
    }

    fn has_permission(&self, principal: &Principal, permission: &str) -> Result<bool, StoreError> {
        Ok(self
            .record(principal)
            .is_some_and(|r| r.permissions.iter().any(|p| p == permission)))
    }
}

#[cfg(test)]
#[path = "principals_tests.rs"]
mod tests;
