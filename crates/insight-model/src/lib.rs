// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod citation;
mod grouping;
mod types;

pub use citation::{fact_segments, resolve_citation, FactSegment, FactSegments};
pub use grouping::{group, group_at, Bucket, GroupedHistory};
pub use types::*;
