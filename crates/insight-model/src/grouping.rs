// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Recency grouping for the history sidebar.
//!
//! A stable partition, not a sort: entries keep their input order within each
//! bucket, and every entry lands in exactly one bucket (first match wins,
//! checked newest-boundary first).

use std::fmt;

use chrono::{DateTime, Days, Local, TimeZone};

use crate::ResponseRecord;

/// The four fixed recency buckets, in priority/display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Today,
    Yesterday,
    PreviousWeek,
    Older,
}

impl Bucket {
    pub const ALL: [Bucket; 4] =
        [Bucket::Today, Bucket::Yesterday, Bucket::PreviousWeek, Bucket::Older];

    fn index(self) -> usize {
        match self {
            Bucket::Today => 0,
            Bucket::Yesterday => 1,
            Bucket::PreviousWeek => 2,
            Bucket::Older => 3,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bucket::Today => "Today",
            Bucket::Yesterday => "Yesterday",
            Bucket::PreviousWeek => "Previous 7 Days",
            Bucket::Older => "Older",
        };
        f.write_str(s)
    }
}

/// History entries partitioned by recency.  All four buckets are always
/// present; callers decide whether to hide empty ones.
#[derive(Debug, Default)]
pub struct GroupedHistory<'a> {
    buckets: [Vec<&'a ResponseRecord>; 4],
}

impl<'a> GroupedHistory<'a> {
    pub fn bucket(&self, b: Bucket) -> &[&'a ResponseRecord] {
        &self.buckets[b.index()]
    }

    /// Iterate `(bucket, entries)` pairs in priority order, empty or not.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[&'a ResponseRecord])> {
        Bucket::ALL.into_iter().map(move |b| (b, self.bucket(b)))
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Partition `entries` against the instant `now`.
///
/// Bucket boundaries are calendar days in `now`'s timezone: `Today` is
/// anything on or after today's date, `Yesterday` the previous date,
/// `PreviousWeek` anything on or after the date seven days before today,
/// `Older` the rest.
pub fn group_at<'a, Tz: TimeZone>(
    entries: &'a [ResponseRecord],
    now: DateTime<Tz>,
) -> GroupedHistory<'a> {
    let today = now.date_naive();
    let yesterday = today - Days::new(1);
    let week_start = today - Days::new(7);

    let mut grouped = GroupedHistory::default();
    for entry in entries {
        let date = entry.timestamp.with_timezone(&now.timezone()).date_naive();
        let bucket = if date >= today {
            Bucket::Today
        } else if date >= yesterday {
            Bucket::Yesterday
        } else if date >= week_start {
            Bucket::PreviousWeek
        } else {
            Bucket::Older
        };
        grouped.buckets[bucket.index()].push(entry);
    }
    grouped
}

/// Partition `entries` against the local wall clock.
pub fn group(entries: &[ResponseRecord]) -> GroupedHistory<'_> {
    group_at(entries, Local::now())
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::Answer;

    fn record(id: &str, timestamp: &str) -> ResponseRecord {
        ResponseRecord {
            query_id: format!("q-{id}"),
            response_id: id.into(),
            query: format!("query {id}"),
            answer: Answer::default(),
            timestamp: timestamp.parse().unwrap(),
            docs: Vec::new(),
            feedback: None,
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-06-10T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn each_entry_lands_in_exactly_one_bucket() {
        let entries = vec![
            record("a", "2024-06-10T09:00:00Z"),
            record("b", "2024-06-09T23:00:00Z"),
            record("c", "2024-06-04T08:00:00Z"),
            record("d", "2024-05-01T00:00:00Z"),
        ];
        let g = group_at(&entries, now());
        assert_eq!(g.total(), entries.len());
        assert_eq!(g.bucket(Bucket::Today)[0].response_id, "a");
        assert_eq!(g.bucket(Bucket::Yesterday)[0].response_id, "b");
        assert_eq!(g.bucket(Bucket::PreviousWeek)[0].response_id, "c");
        assert_eq!(g.bucket(Bucket::Older)[0].response_id, "d");
    }

    #[test]
    fn partition_is_stable_within_buckets() {
        // Deliberately out of chronological order: input order must survive.
        let entries = vec![
            record("t2", "2024-06-10T08:00:00Z"),
            record("o1", "2024-01-01T00:00:00Z"),
            record("t1", "2024-06-10T11:00:00Z"),
            record("o2", "2023-12-25T00:00:00Z"),
        ];
        let g = group_at(&entries, now());
        let today: Vec<_> = g.bucket(Bucket::Today).iter().map(|r| r.response_id.as_str()).collect();
        let older: Vec<_> = g.bucket(Bucket::Older).iter().map(|r| r.response_id.as_str()).collect();
        assert_eq!(today, vec!["t2", "t1"]);
        assert_eq!(older, vec!["o1", "o2"]);
    }

    #[test]
    fn empty_buckets_are_still_present() {
        let entries = vec![record("a", "2024-06-10T09:00:00Z")];
        let g = group_at(&entries, now());
        let buckets: Vec<_> = g.iter().map(|(b, _)| b).collect();
        assert_eq!(buckets, Bucket::ALL.to_vec());
        assert!(g.bucket(Bucket::Older).is_empty());
    }

    #[test]
    fn day_boundaries_not_24h_windows() {
        // 2024-06-09T23:00 is "yesterday" even though it is within 24h of now.
        let entries = vec![record("b", "2024-06-09T23:00:00Z")];
        let g = group_at(&entries, now());
        assert_eq!(g.bucket(Bucket::Yesterday).len(), 1);
        assert!(g.bucket(Bucket::Today).is_empty());
    }

    #[test]
    fn seventh_day_is_previous_week_not_older() {
        let entries = vec![record("edge", "2024-06-03T00:00:00Z")];
        let g = group_at(&entries, now());
        assert_eq!(g.bucket(Bucket::PreviousWeek).len(), 1);
    }

    #[test]
    fn eighth_day_is_older() {
        let entries = vec![record("old", "2024-06-02T23:59:59Z")];
        let g = group_at(&entries, now());
        assert_eq!(g.bucket(Bucket::Older).len(), 1);
    }

    #[test]
    fn no_entries_groups_to_all_empty() {
        let g = group_at(&[], now());
        assert_eq!(g.total(), 0);
        for (_, entries) in g.iter() {
            assert!(entries.is_empty());
        }
    }

    #[test]
    fn bucket_captions_match_display() {
        assert_eq!(Bucket::Today.to_string(), "Today");
        assert_eq!(Bucket::Yesterday.to_string(), "Yesterday");
        assert_eq!(Bucket::PreviousWeek.to_string(), "Previous 7 Days");
        assert_eq!(Bucket::Older.to_string(), "Older");
    }
}
