// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host integration.
//!
//! The host calls into [`HtmlGate`] at each [`HookPoint`] of its edit flow.

pub mod gate;
pub mod point;

pub use gate::HtmlGate;
pub use point::HookPoint;
