// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Citation transform: splits answer-fact text containing `[Source: <name>]`
//! markers into typed segments, resolving each marker against the owning
//! record's document set.
//!
//! The transform is the only markup interpretation performed here.  Names are
//! passed through verbatim — escaping characters that are meaningful to a
//! downstream renderer is the presentation layer's problem.

use crate::Document;

const MARKER_PREFIX: &str = "[Source:";

/// One piece of a fact string.
///
/// A `Citation` with `doc: None` is a marker whose name matched no document
/// in the record's set.  Presentation must render it as inert text — the
/// segment is never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactSegment<'a> {
    Text(&'a str),
    Citation {
        name: &'a str,
        doc: Option<&'a Document>,
    },
}

/// Resolve a citation name against a document set by exact id match.
pub fn resolve_citation<'a>(name: &str, docs: &'a [Document]) -> Option<&'a Document> {
    docs.iter().find(|d| d.id == name)
}

/// Lazily segment `fact`, resolving citations against `docs`.
///
/// The returned iterator is finite and restartable (`Clone` it to scan
/// again).  A fact with no markers yields exactly one `Text` segment equal
/// to the input, including for the empty string.
pub fn fact_segments<'a>(fact: &'a str, docs: &'a [Document]) -> FactSegments<'a> {
    FactSegments { rest: fact, docs, started: false, done: false }
}

/// Iterator over [`FactSegment`]s of one fact string.
#[derive(Debug, Clone)]
pub struct FactSegments<'a> {
    rest: &'a str,
    docs: &'a [Document],
    started: bool,
    done: bool,
}

/// Locate the next complete marker in `s`.
///
/// Returns `(start, end, name)` where `start..end` spans the whole marker
/// and `name` is the raw capture between the prefix and the first `]`.
/// An opening `[Source:` without a closing bracket is not a marker.
fn find_marker(s: &str) -> Option<(usize, usize, &str)> {
    let start = s.find(MARKER_PREFIX)?;
    let name_start = start + MARKER_PREFIX.len();
    let close = s[name_start..].find(']')?;
    let name = &s[name_start..name_start + close];
    Some((start, name_start + close + 1, name))
}

impl<'a> Iterator for FactSegments<'a> {
    type Item = FactSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match find_marker(self.rest) {
            Some((start, _, _)) if start > 0 => {
                let text = &self.rest[..start];
                self.rest = &self.rest[start..];
                self.started = true;
                Some(FactSegment::Text(text))
            }
            Some((_, end, raw_name)) => {
                self.rest = &self.rest[end..];
                self.started = true;
                let name = raw_name.trim();
                Some(FactSegment::Citation { name, doc: resolve_citation(name, self.docs) })
            }
            None => {
                if self.rest.is_empty() && self.started {
                    self.done = true;
                    return None;
                }
                let text = self.rest;
                self.rest = "";
                self.started = true;
                self.done = true;
                Some(FactSegment::Text(text))
            }
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
