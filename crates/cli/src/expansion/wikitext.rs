// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reference wikitext expansion engine.
//!
//! Expands templates, template parameters, the conditional parser functions,
//! `#tag` and extension tags, reading templates from a [`PageStore`].
//!
//! Template arguments are expanded eagerly in the calling frame, so markup
//! passed into a template is attributed to the page that wrote it, not to
//! the template that prints it.

use super::engine::{
    BudgetKind, ExpansionEngine, ExpansionEngineFactory, ExpansionError, ExpansionLimits, Frame,
    Overrides, TagCall,
};
use super::expr;
use super::parser::{self, TagFilter};
use crate::page::{PageId, PageStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Extension tags every engine knows, even without overrides.
pub const BUILTIN_TAGS: &[&str] = &["html", "nowiki"];

/// Creates [`WikitextEngine`]s sharing one page store.
#[derive(Clone)]
pub struct WikitextEngineFactory {
    pages: Arc<dyn PageStore>,
}

impl WikitextEngineFactory {
    pub fn new(pages: Arc<dyn PageStore>) -> Self {
        Self { pages }
    }
}

impl std::fmt::Debug for WikitextEngineFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikitextEngineFactory").finish_non_exhaustive()
    }
}

impl ExpansionEngineFactory for WikitextEngineFactory {
    fn create(&self, overrides: Overrides) -> Box<dyn ExpansionEngine> {
        Box::new(WikitextEngine::new(Arc::clone(&self.pages), overrides))
    }
}

/// One expansion engine with its handler overrides installed.
pub struct WikitextEngine {
    pages: Arc<dyn PageStore>,
    overrides: Overrides,
}

impl WikitextEngine {
    pub fn new(pages: Arc<dyn PageStore>, overrides: Overrides) -> Self {
        Self { pages, overrides }
    }
}

impl ExpansionEngine for WikitextEngine {
    fn expand(
        &mut self,
        content: &str,
        page: &PageId,
        limits: ExpansionLimits,
    ) -> Result<String, ExpansionError> {
        let mut expander = Expander {
            pages: self.pages.as_ref(),
            overrides: &self.overrides,
            limits,
            top: page.clone(),
            frames: vec![FrameState {
                page: page.clone(),
                args: HashMap::new(),
            }],
            depth: 0,
            expansions: 0,
        };
        expander.expand_text(content)
    }
}

struct FrameState {
    page: PageId,
    args: HashMap<String, String>,
}

/// State of one top-level expansion.
struct Expander<'a> {
    pages: &'a dyn PageStore,
    overrides: &'a Overrides,
    limits: ExpansionLimits,
    top: PageId,
    frames: Vec<FrameState>,
    depth: usize,
    expansions: usize,
}

fn is_extension_tag(overrides: &Overrides, name: &str) -> bool {
    BUILTIN_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name)) || overrides.has_tag(name)
}

fn error_span(message: &str) -> String {
    format!("<strong class=\"error\">{}</strong>", message)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl<'a> Expander<'a> {
    fn current(&self) -> &FrameState {
        // The top frame is pushed at construction and never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn expand_text(&mut self, text: &str) -> Result<String, ExpansionError> {
        let overrides = self.overrides;
        let is_tag = move |name: &str| is_extension_tag(overrides, name);
        let is_tag: TagFilter<'_> = &is_tag;

        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < text.len() {
            let rest = &text[i..];
            if rest.starts_with("<!--") {
                i = parser::comment_end(text, i);
                continue;
            }
            if rest.starts_with("{{{") {
                if let Some(end) = parser::closing_braces(text, i, 3, is_tag) {
                    let expanded = self.expand_param(&text[i + 3..end - 3], is_tag)?;
                    out.push_str(&expanded);
                    i = end;
                    continue;
                }
            }
            if rest.starts_with("{{") {
                if let Some(end) = parser::closing_braces(text, i, 2, is_tag) {
                    let expanded = self.expand_braces(&text[i + 2..end - 2], is_tag)?;
                    out.push_str(&expanded);
                    i = end;
                    continue;
                }
            }
            if rest.starts_with('<') {
                if let Some(tag) = parser::tag_at(text, i, is_tag) {
                    let call = TagCall {
                        name: tag.name,
                        attrs: tag.attrs,
                        body: tag.body,
                    };
                    let expanded = self.nested(|this| this.invoke_tag(&call))?;
                    out.push_str(&expanded);
                    i = tag.end;
                    continue;
                }
            }
            let Some(c) = rest.chars().next() else {
                break;
            };
            out.push(c);
            i += c.len_utf8();
        }
        Ok(out)
    }

    /// Count one invocation and run it one level deeper.
    fn nested<T>(
        &mut self,
        run: impl FnOnce(&mut Self) -> Result<T, ExpansionError>,
    ) -> Result<T, ExpansionError> {
        self.expansions += 1;
        if self.expansions > self.limits.max_expansions {
            return Err(ExpansionError::BudgetExceeded(BudgetKind::Expansions(
                self.limits.max_expansions,
            )));
        }
        if self.depth >= self.limits.max_depth {
            return Err(ExpansionError::BudgetExceeded(BudgetKind::Depth(
                self.limits.max_depth,
            )));
        }
        self.depth += 1;
        let result = run(self);
        self.depth -= 1;
        result
    }

    fn expand_param(
        &mut self,
        inner: &str,
        is_tag: TagFilter<'_>,
    ) -> Result<String, ExpansionError> {
        let parts = parser::split_args(inner, is_tag);
        let name = self.expand_text(parts[0])?;
        if let Some(value) = self.current().args.get(name.trim()) {
            return Ok(value.clone());
        }
        match parts.get(1) {
            Some(default) => self.nested(|this| this.expand_text(default)),
            None => Ok(format!("{{{{{{{}}}}}}}", inner)),
        }
    }

    fn expand_braces(
        &mut self,
        inner: &str,
        is_tag: TagFilter<'_>,
    ) -> Result<String, ExpansionError> {
        let parts = parser::split_args(inner, is_tag);
        let head = parts[0];

        if let Some(call) = head.trim_start().strip_prefix('#') {
            if let Some((name, first)) = call.split_once(':') {
                let name = name.trim().to_ascii_lowercase();
                let mut args = Vec::with_capacity(parts.len());
                args.push(first);
                args.extend_from_slice(&parts[1..]);
                return self.nested(|this| this.call_function(&name, &args, is_tag));
            }
        }

        let name = self.expand_text(head)?;
        let name = name.trim();
        if name.is_empty() {
            return Ok(format!("{{{{{}}}}}", inner));
        }
        let target = PageId::transclusion_target(name);
        self.nested(|this| this.transclude(target, &parts[1..], is_tag))
    }

    fn call_function(
        &mut self,
        name: &str,
        args: &[&str],
        is_tag: TagFilter<'_>,
    ) -> Result<String, ExpansionError> {
        let overrides = self.overrides;
        if let Some(handler) = overrides.function(name) {
            let frame: &mut dyn Frame = self;
            return handler(args, frame);
        }
        match name {
            "if" => {
                let test = self.expand_arg(args, 0)?;
                let branch = if test.trim().is_empty() { 2 } else { 1 };
                self.expand_arg(args, branch)
            }
            "ifeq" => {
                let lhs = self.expand_arg(args, 0)?;
                let rhs = self.expand_arg(args, 1)?;
                let branch = if values_equal(lhs.trim(), rhs.trim()) { 2 } else { 3 };
                self.expand_arg(args, branch)
            }
            "iferror" => {
                let test = self.expand_arg(args, 0)?;
                if test.contains("class=\"error\"") {
                    self.expand_arg(args, 1)
                } else if args.len() > 2 {
                    self.expand_arg(args, 2)
                } else {
                    Ok(test.trim().to_string())
                }
            }
            "ifexpr" => {
                let input = self.expand_arg(args, 0)?;
                match expr::evaluate(&input) {
                    Ok(value) => {
                        let branch = if value.unwrap_or(0.0) != 0.0 { 1 } else { 2 };
                        self.expand_arg(args, branch)
                    }
                    Err(err) => Ok(error_span(&format!("Expression error: {}", err))),
                }
            }
            "ifexist" => {
                let title = self.expand_arg(args, 0)?;
                let target = PageId::new(&title);
                let exists = self.pages.page_exists(&target).map_err(|err| {
                    ExpansionError::PageLookup {
                        page: target.to_string(),
                        message: err.to_string(),
                    }
                })?;
                self.expand_arg(args, if exists { 1 } else { 2 })
            }
            "switch" => self.switch(args, is_tag),
            "tag" => self.tag_function(args, is_tag),
            _ => Ok(error_span(&format!(
                "Unknown parser function \"#{}\"",
                name
            ))),
        }
    }

    /// Expand argument `index`, trimmed; missing arguments are empty.
    fn expand_arg(&mut self, args: &[&str], index: usize) -> Result<String, ExpansionError> {
        match args.get(index) {
            Some(raw) => Ok(self.expand_text(raw)?.trim().to_string()),
            None => Ok(String::new()),
        }
    }

    fn switch(&mut self, args: &[&str], is_tag: TagFilter<'_>) -> Result<String, ExpansionError> {
        let value = self.expand_arg(args, 0)?;
        let cases = args.get(1..).unwrap_or_default();
        let mut fall_through = false;
        let mut default = None;

        for (index, case) in cases.iter().enumerate() {
            match parser::named_arg(case, is_tag) {
                Some((key, result)) => {
                    let key = self.expand_text(key)?;
                    let key = key.trim();
                    if fall_through || values_equal(key, &value) {
                        return Ok(self.expand_text(result)?.trim().to_string());
                    }
                    if key == "#default" {
                        default = Some(result);
                    }
                }
                None => {
                    let key = self.expand_text(case)?;
                    if values_equal(key.trim(), &value) {
                        fall_through = true;
                    } else if index + 1 == cases.len() {
                        return Ok(key.trim().to_string());
                    }
                }
            }
        }
        match default {
            Some(result) => Ok(self.expand_text(result)?.trim().to_string()),
            None => Ok(String::new()),
        }
    }

    /// `{{#tag:name|body|attr=value}}`: the body is expanded first, then the
    /// tag is dispatched exactly like its literal form.
    fn tag_function(
        &mut self,
        args: &[&str],
        is_tag: TagFilter<'_>,
    ) -> Result<String, ExpansionError> {
        let name = self.expand_arg(args, 0)?;
        if name.is_empty() {
            return Ok(error_span("No tag name given"));
        }
        if !is_tag(name.as_str()) {
            return Ok(error_span(&format!("Unknown extension tag \"{}\"", name)));
        }
        let body = match args.get(1) {
            Some(raw) => Some(self.expand_text(raw)?),
            None => None,
        };
        let mut attrs = Vec::new();
        for raw in args.iter().skip(2) {
            if let Some((key, value)) = parser::named_arg(raw, is_tag) {
                let key = self.expand_text(key)?;
                let value = self.expand_text(value)?;
                attrs.push(format!("{}=\"{}\"", key.trim(), value.trim()));
            }
        }
        let attrs = attrs.join(" ");
        let call = TagCall {
            name: &name,
            attrs: &attrs,
            body: body.as_deref(),
        };
        self.invoke_tag(&call)
    }

    fn invoke_tag(&mut self, call: &TagCall<'_>) -> Result<String, ExpansionError> {
        let overrides = self.overrides;
        if let Some(handler) = overrides.tag(call.name) {
            let frame: &mut dyn Frame = self;
            return handler(call, frame);
        }
        let body = call.body.unwrap_or_default();
        match call.name.to_ascii_lowercase().as_str() {
            "html" => Ok(body.to_string()),
            "nowiki" => Ok(escape(body)),
            other => Ok(error_span(&format!("Unknown extension tag \"{}\"", other))),
        }
    }

    fn transclude(
        &mut self,
        target: PageId,
        raw_args: &[&str],
        is_tag: TagFilter<'_>,
    ) -> Result<String, ExpansionError> {
        if self.frames.iter().any(|frame| frame.page == target) {
            return Ok(error_span(&format!(
                "Template loop detected: [[{}]]",
                target
            )));
        }
        let content = self
            .pages
            .read_stored_content(&target)
            .map_err(|err| ExpansionError::PageLookup {
                page: target.to_string(),
                message: err.to_string(),
            })?;
        let Some(content) = content else {
            return Ok(format!("[[{}]]", target));
        };
        if !content.is_wikitext() {
            return Ok(content.text);
        }

        let mut args = HashMap::new();
        let mut position = 0;
        for raw in raw_args {
            match parser::named_arg(raw, is_tag) {
                Some((key, value)) => {
                    let key = self.expand_text(key)?.trim().to_string();
                    let value = self.expand_text(value)?.trim().to_string();
                    args.insert(key, value);
                }
                None => {
                    position += 1;
                    let value = self.expand_text(raw)?;
                    args.insert(position.to_string(), value);
                }
            }
        }

        self.frames.push(FrameState { page: target, args });
        let result = self.expand_text(&content.text);
        self.frames.pop();
        result
    }
}

/// Compare as numbers when both sides are numeric, as strings otherwise.
fn values_equal(lhs: &str, rhs: &str) -> bool {
    match (lhs.parse::<f64>(), rhs.parse::<f64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => lhs == rhs,
    }
}

impl Frame for Expander<'_> {
    fn frame_page(&self) -> &PageId {
        &self.current().page
    }

    fn top_level_page(&self) -> &PageId {
        &self.top
    }

    fn expand(&mut self, raw: &str) -> Result<String, ExpansionError> {
        self.expand_text(raw)
    }
}

#[cfg(test)]
#[path = "wikitext_tests.rs"]
mod tests;
