// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markup expansion: the engine interface, a reference wikitext engine and
//! the commit-time detector built on top of them.

pub mod detector;
pub mod engine;
pub mod expr;
pub mod parser;
pub mod wikitext;

pub use detector::{ExpansionHookDetector, ExpansionSession, CONDITIONAL_FUNCTIONS};
pub use engine::{
    BudgetKind, ExpansionEngine, ExpansionEngineFactory, ExpansionError, ExpansionLimits, Frame,
    FunctionHandler, Overrides, TagCall, TagHandler,
};
pub use wikitext::{WikitextEngine, WikitextEngineFactory};
