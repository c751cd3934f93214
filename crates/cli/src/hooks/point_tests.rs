// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_hook_point_serialization() {
    let point = HookPoint::ContentMergedFilter;
    let json = serde_json::to_string(&point).unwrap();
    assert_eq!(json, "\"content_merged_filter\"");

    let parsed: HookPoint = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, point);
}

#[test]
fn test_wire_names_round_trip() {
    for point in HookPoint::ALL {
        assert_eq!(HookPoint::from_wire_name(point.wire_name()), Some(point));
    }
    assert_eq!(HookPoint::from_wire_name("PageSaveComplete"), None);
}

#[test]
fn test_display_uses_wire_name() {
    assert_eq!(HookPoint::PreCommit.to_string(), "MultiContentSave");
}
