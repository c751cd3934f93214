// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Commit-time detection through the expansion engine.
//!
//! The content is expanded on a dedicated engine with two kinds of
//! overrides installed:
//!
//! - `html` records that the tag was reached, unless the frame expanding it
//!   belongs to another page (already stored content pulled in by
//!   transclusion)
//! - the conditional functions expand every argument instead of picking a
//!   branch, so a tag hidden in an untaken branch is still reached
//! - `#tag` resolves its name with the conditionals forced as well, and
//!   records the tag as reached when any branch could spell its name
//!
//! The `html` override produces no output; `#tag` yields its expanded body so
//! that names built from nested calls still see their text.

use super::engine::{
    ExpansionEngineFactory, ExpansionError, ExpansionLimits, Frame, Overrides, TagCall,
};
use crate::config::GateConfig;
use crate::detect::{DetectionVerdict, RESTRICTED_TAG};
use crate::page::{PageContent, PageId};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Conditional parser functions whose branches are all expanded.
pub const CONDITIONAL_FUNCTIONS: &[&str] =
    &["if", "ifeq", "iferror", "ifexpr", "switch", "ifexist"];

/// Parser function building an extension tag from a computed name.
pub const TAG_FUNCTION: &str = "tag";

/// The "restricted tag reached" flag of one expansion call.
///
/// Clones share the flag; the `html` override holds one clone while the
/// detector reads the other.
#[derive(Clone, Debug, Default)]
pub struct ExpansionSession {
    reached: Rc<Cell<bool>>,
}

impl ExpansionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_reached(&self) {
        self.reached.set(true);
    }

    pub fn is_reached(&self) -> bool {
        self.reached.get()
    }

    pub fn reset(&self) {
        self.reached.set(false);
    }

    /// Read the flag and reset it.
    pub fn take(&self) -> bool {
        self.reached.replace(false)
    }
}

/// Runs content through a fresh engine and reports whether the restricted
/// tag is reachable from the page being edited.
#[derive(Clone, Debug)]
pub struct ExpansionHookDetector {
    limits: ExpansionLimits,
    separator: String,
}

impl ExpansionHookDetector {
    pub fn new(limits: ExpansionLimits, separator: impl Into<String>) -> Self {
        Self {
            limits,
            separator: separator.into(),
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(
            config.expansion.limits(),
            config.expansion.branch_separator.clone(),
        )
    }

    pub fn limits(&self) -> ExpansionLimits {
        self.limits
    }

    /// Handler overrides reporting into `session`.
    pub fn overrides(&self, session: &ExpansionSession) -> Overrides {
        let flag = session.clone();
        let mut overrides = Overrides::new().with_tag(
            RESTRICTED_TAG,
            Box::new(
                move |_call: &TagCall<'_>,
                      frame: &mut dyn Frame|
                      -> Result<String, ExpansionError> {
                    record_reached(&flag, frame);
                    Ok(String::new())
                },
            ),
        );

        for name in CONDITIONAL_FUNCTIONS {
            let separator = self.separator.clone();
            overrides = overrides.with_function(
                name,
                Box::new(
                    move |args: &[&str], frame: &mut dyn Frame| -> Result<String, ExpansionError> {
                        let mut branches = Vec::with_capacity(args.len());
                        for raw in args {
                            branches.push(frame.expand(raw)?);
                        }
                        Ok(branches.join(&separator))
                    },
                ),
            );
        }

        let flag = session.clone();
        let separator = self.separator.clone();
        overrides.with_function(
            TAG_FUNCTION,
            Box::new(
                move |args: &[&str], frame: &mut dyn Frame| -> Result<String, ExpansionError> {
                    let name = match args.first() {
                        Some(raw) => frame.expand(raw)?,
                        None => String::new(),
                    };
                    if may_name_restricted_tag(&name, &separator) {
                        record_reached(&flag, frame);
                    }
                    let body = match args.get(1) {
                        Some(raw) => frame.expand(raw)?,
                        None => String::new(),
                    };
                    for raw in args.iter().skip(2) {
                        frame.expand(raw)?;
                    }
                    Ok(body)
                },
            ),
        )
    }

    /// Expand `content` as the text of `page` and report reachability.
    ///
    /// Non-wikitext content is never proven unsafe. Once the tag has been
    /// reached the verdict stands even if the expansion fails afterwards.
    pub fn expand_and_detect(
        &self,
        content: &PageContent,
        page: &PageId,
        factory: &dyn ExpansionEngineFactory,
    ) -> Result<DetectionVerdict, ExpansionError> {
        let Some(text) = content.as_wikitext() else {
            debug!(
                %page,
                model = ?content.model,
                "skipping expansion check for non-wikitext content"
            );
            return Ok(DetectionVerdict::semantic(false));
        };

        let session = ExpansionSession::new();
        session.reset();
        let mut engine = factory.create(self.overrides(&session));
        let outcome = engine.expand(text, page, self.limits);
        let reached = session.take();

        if reached {
            return Ok(DetectionVerdict::semantic(true));
        }
        outcome?;
        Ok(DetectionVerdict::semantic(false))
    }
}

/// Mark the tag reached unless `frame` belongs to a transcluded page.
fn record_reached(flag: &ExpansionSession, frame: &dyn Frame) {
    if frame.frame_page() == frame.top_level_page() {
        flag.mark_reached();
    } else {
        debug!(
            frame = %frame.frame_page(),
            top = %frame.top_level_page(),
            "restricted tag in transcluded page ignored"
        );
    }
}

/// Whether a `#tag` name expanded with forced conditionals may resolve to the
/// restricted tag.
///
/// A name untouched by conditionals is compared exactly. Otherwise it holds
/// every branch in source order, and whatever the real expansion picks is a
/// subsequence of it, so the restricted name is searched as a subsequence.
/// An empty separator leaves no trace of a conditional and always takes the
/// second path.
fn may_name_restricted_tag(name: &str, separator: &str) -> bool {
    let name = name.trim();
    if name.eq_ignore_ascii_case(RESTRICTED_TAG) {
        return true;
    }
    if !separator.is_empty() && !name.contains(separator) {
        return false;
    }

    let mut wanted = RESTRICTED_TAG.chars();
    let mut next = wanted.next();
    for c in name.chars() {
        match next {
            Some(w) if c.eq_ignore_ascii_case(&w) => next = wanted.next(),
            Some(_) => {}
            None => break,
        }
    }
    next.is_none()
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
