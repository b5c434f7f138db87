//! Flattened view of the grouped history for the sidebar: bucket headers
//! interleaved with their entries, plus the flat entry list the keyboard
//! cursor moves over.

use insight_model::{GroupedHistory, ResponseRecord};

/// One visual row of the sidebar.
pub enum SidebarRow<'a> {
    Header(insight_model::Bucket),
    Entry(&'a ResponseRecord),
}

/// Rows in display order.  Empty buckets are hidden.
pub fn build_rows<'a>(grouped: &GroupedHistory<'a>) -> Vec<SidebarRow<'a>> {
    let mut rows = Vec::new();
    for (bucket, entries) in grouped.iter() {
        if entries.is_empty() {
            continue;
        }
        rows.push(SidebarRow::Header(bucket));
        rows.extend(entries.iter().map(|e| SidebarRow::Entry(e)));
    }
    rows
}

/// The selectable entries in display order, skipping headers.  The sidebar
/// cursor is an index into this list.
pub fn entries<'a>(grouped: &GroupedHistory<'a>) -> Vec<&'a ResponseRecord> {
    grouped.iter().flat_map(|(_, es)| es.iter().copied()).collect()
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
