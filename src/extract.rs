//! Indentation-scoped block extraction.
//!
//! A decoded document is a flat run of lines; structure exists only in the
//! indentation. This module recovers it: [`split_document`] measures each
//! line's indent level, [`extract_contexts`] groups a header line with the
//! maximal run of more-deeply-indented lines that follow it, and
//! [`split_jagged`] separates a sequence body into one sub-block per
//! element.
//!
//! Contexts are keyed by line position, never by line text: two textually
//! identical sibling headers are distinct contexts.

use crate::{Error, Result};
use indexmap::IndexMap;

/// One document line: its 1-based position, indent level, and the content
/// after the indentation. Content is never trimmed; interior and trailing
/// whitespace belong to the tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub indent: usize,
    pub content: &'a str,
}

/// Splits raw text into lines, measuring each line's indent as the count of
/// leading `marker` characters.
pub(crate) fn split_document(text: &str, marker: char) -> Vec<Line<'_>> {
    text.split('\n')
        .enumerate()
        .map(|(i, raw)| {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let indent = raw.chars().take_while(|&c| c == marker).count();
            Line {
                number: i + 1,
                indent,
                content: &raw[indent * marker.len_utf8()..],
            }
        })
        .collect()
}

/// Returns `true` if the line can open a context at `base`: it sits exactly
/// at `base` and carries the field/key separator.
pub(crate) fn is_header(line: &Line<'_>, base: usize) -> bool {
    line.indent == base && line.content.contains(':')
}

/// Maps each header position to the body lines scoped under it.
///
/// A header's body is every following line whose indent is strictly greater
/// than `base`; collection stops at the first line at or above `base`
/// (including blank lines, which sit at indent zero). Headers with no body
/// are omitted — an inline scalar needs no context.
pub(crate) fn extract_contexts<'a>(
    lines: &[Line<'a>],
    base: usize,
) -> IndexMap<usize, Vec<Line<'a>>> {
    let mut contexts = IndexMap::new();
    for (position, line) in lines.iter().enumerate() {
        if !is_header(line, base) {
            continue;
        }
        let body: Vec<Line<'a>> = lines[position + 1..]
            .iter()
            .take_while(|l| l.indent > base)
            .copied()
            .collect();
        if !body.is_empty() {
            contexts.insert(position, body);
        }
    }
    contexts
}

/// Splits a sequence body into sub-blocks, one per element.
///
/// A line at relative indent 1 opens a new sub-block; deeper lines belong to
/// the most recently opened one. A deep line with no open sub-block has no
/// element to belong to, so the document is malformed.
pub(crate) fn split_jagged<'a>(lines: &[Line<'a>], base: usize) -> Result<Vec<Vec<Line<'a>>>> {
    let mut blocks: Vec<Vec<Line<'a>>> = Vec::new();
    for line in lines {
        if line.indent == base + 1 {
            blocks.push(vec![*line]);
        } else if let Some(open) = blocks.last_mut() {
            open.push(*line);
        } else {
            return Err(Error::document(
                line.number,
                "line is nested under no sequence element",
            ));
        }
    }
    Ok(blocks)
}
