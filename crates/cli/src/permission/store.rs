// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Principal store interface.

use crate::error::StoreError;
use crate::page::Principal;

/// Read access to the host's user, group and permission store.
///
/// Calls are synchronous and fail fast. Retrying is the store's business.
pub trait PrincipalStore: Send + Sync {
    /// Whether the principal is anonymous (not logged in).
    fn is_anonymous(&self, principal: &Principal) -> Result<bool, StoreError>;

    /// Groups the principal belongs to.
    fn groups(&self, principal: &Principal) -> Result<Vec<String>, StoreError>;

    /// Whether the principal holds the named permission.
    fn has_permission(&self, principal: &Principal, permission: &str)
        -> Result<bool, StoreError>;
}
