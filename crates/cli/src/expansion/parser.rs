// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scanning helpers for wikitext markup.
//!
//! All offsets are byte offsets. Every delimiter is ASCII, so slicing at the
//! offsets returned here always lands on a char boundary.

/// Predicate telling the scanner which `<name>` openers are extension tags.
pub type TagFilter<'a> = &'a dyn Fn(&str) -> bool;

/// An extension tag located in source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagSpan<'a> {
    pub name: &'a str,
    pub attrs: &'a str,
    /// `None` for self-closing tags
    pub body: Option<&'a str>,
    /// Offset just past the closing tag
    pub end: usize,
}

/// End of an HTML comment starting at `start`. Unterminated comments run to
/// the end of the text.
pub fn comment_end(text: &str, start: usize) -> usize {
    let body = start + "<!--".len();
    match text.get(body..).and_then(|rest| rest.find("-->")) {
        Some(offset) => body + offset + "-->".len(),
        None => text.len(),
    }
}

/// Parse the extension tag opening at `start`, if any.
///
/// Tag names match case-insensitively. A tag without a closing counterpart
/// is not an extension tag and is left as literal text.
pub fn tag_at<'a>(text: &'a str, start: usize, is_tag: TagFilter<'_>) -> Option<TagSpan<'a>> {
    let after_lt = text.get(start..)?.strip_prefix('<')?;
    let name_len = after_lt
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        .count();
    if name_len == 0 {
        return None;
    }
    let name = &after_lt[..name_len];
    if !is_tag(name) {
        return None;
    }

    let after_name = &after_lt[name_len..];
    match after_name.bytes().next() {
        Some(b'>') | Some(b'/') => {}
        Some(b) if b.is_ascii_whitespace() => {}
        _ => return None,
    }
    let gt = after_name.find('>')?;
    let raw_attrs = &after_name[..gt];
    let open_end = start + 1 + name_len + gt + 1;

    if let Some(attrs) = raw_attrs.strip_suffix('/') {
        return Some(TagSpan {
            name,
            attrs: attrs.trim(),
            body: None,
            end: open_end,
        });
    }

    let (body_len, close_len) = find_close_tag(&text[open_end..], name)?;
    Some(TagSpan {
        name,
        attrs: raw_attrs.trim(),
        body: Some(&text[open_end..open_end + body_len]),
        end: open_end + body_len + close_len,
    })
}

/// Offset and length of the first `</name >` in `text`.
fn find_close_tag(text: &str, name: &str) -> Option<(usize, usize)> {
    let lower = text.to_ascii_lowercase();
    let needle = format!("</{}", name.to_ascii_lowercase());
    let mut from = 0;
    while let Some(offset) = lower[from..].find(&needle) {
        let at = from + offset;
        let after = &lower[at + needle.len()..];
        let ws = after.bytes().take_while(u8::is_ascii_whitespace).count();
        if after[ws..].starts_with('>') {
            return Some((at, needle.len() + ws + 1));
        }
        from = at + needle.len();
    }
    None
}

/// Offset just past the braces closing the `width`-brace opener at `start`.
///
/// `width` is 2 for templates and parser functions, 3 for parameters.
/// Comments and extension tags inside are opaque.
pub fn closing_braces(
    text: &str,
    start: usize,
    width: usize,
    is_tag: TagFilter<'_>,
) -> Option<usize> {
    let mut stack = vec![width];
    let mut i = start + width;
    while i < text.len() {
        let rest = &text[i..];
        if rest.starts_with("<!--") {
            i = comment_end(text, i);
            continue;
        }
        if rest.starts_with('<') {
            if let Some(tag) = tag_at(text, i, is_tag) {
                i = tag.end;
                continue;
            }
        }
        if rest.starts_with("{{{") {
            stack.push(3);
            i += 3;
            continue;
        }
        if rest.starts_with("{{") {
            stack.push(2);
            i += 2;
            continue;
        }
        if let Some(&top) = stack.last() {
            let close = if top == 3 { "}}}" } else { "}}" };
            if rest.starts_with(close) {
                stack.pop();
                i += top;
                if stack.is_empty() {
                    return Some(i);
                }
                continue;
            }
        }
        i += rest.chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Visit every character that sits outside nested braces, links, tags and
/// comments. Stops early when `visit` returns true.
fn for_each_top_level(
    text: &str,
    is_tag: TagFilter<'_>,
    mut visit: impl FnMut(usize, char) -> bool,
) {
    let mut links = 0usize;
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if rest.starts_with("<!--") {
            i = comment_end(text, i);
            continue;
        }
        if rest.starts_with('<') {
            if let Some(tag) = tag_at(text, i, is_tag) {
                i = tag.end;
                continue;
            }
        }
        if rest.starts_with("{{") {
            let end = rest
                .starts_with("{{{")
                .then(|| closing_braces(text, i, 3, is_tag))
                .flatten()
                .or_else(|| closing_braces(text, i, 2, is_tag));
            if let Some(end) = end {
                i = end;
                continue;
            }
        }
        if rest.starts_with("[[") {
            links += 1;
            i += 2;
            continue;
        }
        if links > 0 && rest.starts_with("]]") {
            links -= 1;
            i += 2;
            continue;
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        if links == 0 && visit(i, c) {
            return;
        }
        i += c.len_utf8();
    }
}

/// Split the inside of `{{...}}` on its top-level pipes.
pub fn split_args<'a>(inner: &'a str, is_tag: TagFilter<'_>) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut last = 0;
    for_each_top_level(inner, is_tag, |i, c| {
        if c == '|' {
            parts.push(&inner[last..i]);
            last = i + 1;
        }
        false
    });
    parts.push(&inner[last..]);
    parts
}

/// Split `key=value` on the first top-level `=`.
pub fn named_arg<'a>(part: &'a str, is_tag: TagFilter<'_>) -> Option<(&'a str, &'a str)> {
    let mut eq = None;
    for_each_top_level(part, is_tag, |i, c| {
        if c == '=' {
            eq = Some(i);
            return true;
        }
        false
    });
    eq.map(|i| (&part[..i], &part[i + 1..]))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
