//! Best-effort lookup of source spans for validated values.
//!
//! Validation runs on the decoded diagram, which has lost its source
//! positions. Problems are pointed back at the document by searching for the
//! offending value as a JSON string literal, optionally narrowed to the
//! object the value belongs to.

use std::ops::Range;

use crate::span::Span;

pub(crate) struct SourceLocator<'a> {
    source: &'a str,
}

impl<'a> SourceLocator<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Span of the `nth` (0-based) occurrence of `value` written as a JSON
    /// string literal, quotes included.
    pub(crate) fn string_literal(&self, value: &str, nth: usize) -> Option<Span> {
        let literal = serde_json::to_string(value).ok()?;
        self.source
            .match_indices(literal.as_str())
            .nth(nth)
            .map(|(start, matched)| Span::new(start..start + matched.len()))
    }

    /// Like [`SourceLocator::string_literal`], searching only `within`.
    pub(crate) fn string_literal_in(
        &self,
        within: &Range<usize>,
        value: &str,
        nth: usize,
    ) -> Option<Span> {
        let literal = serde_json::to_string(value).ok()?;
        self.source
            .get(within.clone())?
            .match_indices(literal.as_str())
            .nth(nth)
            .map(|(start, matched)| {
                let start = within.start + start;
                Span::new(start..start + matched.len())
            })
    }

    /// Byte ranges of the objects in the array stored under `key` of the
    /// object spanning `within`. Nested keys of the same name are ignored.
    pub(crate) fn object_items(&self, within: &Range<usize>, key: &str) -> Vec<Range<usize>> {
        let Ok(key) = serde_json::to_string(key) else {
            return Vec::new();
        };
        let Some(text) = self.source.get(within.clone()) else {
            return Vec::new();
        };
        let bytes = text.as_bytes();

        let mut items = Vec::new();
        let mut depth = 0usize;
        let mut last_string: Option<&str> = None;
        let mut in_array = false;
        let mut item_start = None;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'"' => {
                    let start = i;
                    i += 1;
                    while i < bytes.len() && bytes[i] != b'"' {
                        i += if bytes[i] == b'\\' { 2 } else { 1 };
                    }
                    if depth == 1 {
                        last_string = text.get(start..=i);
                    }
                }
                open @ (b'{' | b'[') => {
                    if open == b'[' && depth == 1 && last_string == Some(key.as_str()) {
                        in_array = true;
                    } else if open == b'{' && in_array && depth == 2 {
                        item_start = Some(i);
                    }
                    depth += 1;
                }
                close @ (b'}' | b']') => {
                    depth = depth.saturating_sub(1);
                    if in_array && depth == 2 && close == b'}' {
                        if let Some(start) = item_start.take() {
                            items.push(within.start + start..within.start + i + 1);
                        }
                    } else if in_array && depth == 1 {
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }

        items
    }

    pub(crate) fn whole(&self) -> Range<usize> {
        0..self.source.len()
    }
}
