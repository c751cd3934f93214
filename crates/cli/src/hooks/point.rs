// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host hook points the gate attaches to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named points in the host's edit flow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    /// The edit form is about to be shown
    FormRenderBegin,
    /// Edit notices for a page are being collected
    EditNoticesCollected,
    /// Submitted content was merged and is about to be saved
    ContentMergedFilter,
    /// A permission check is about to be answered
    PrePermissionCheck,
    /// The revision is about to be committed
    PreCommit,
}

impl HookPoint {
    /// Every hook point, in edit flow order.
    pub const ALL: [HookPoint; 5] = [
        HookPoint::FormRenderBegin,
        HookPoint::EditNoticesCollected,
        HookPoint::ContentMergedFilter,
        HookPoint::PrePermissionCheck,
        HookPoint::PreCommit,
    ];

    /// Name of the host hook this point corresponds to.
    pub fn wire_name(&self) -> &'static str {
        match self {
            HookPoint::FormRenderBegin => "EditPage::showEditForm:initial",
            HookPoint::EditNoticesCollected => "TitleGetEditNotices",
            HookPoint::ContentMergedFilter => "EditFilterMergedContent",
            HookPoint::PrePermissionCheck => "getUserPermissionsErrors",
            HookPoint::PreCommit => "MultiContentSave",
        }
    }

    /// Look up a hook point by host hook name.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|point| point.wire_name() == name)
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
#[path = "point_tests.rs"]
mod tests;
