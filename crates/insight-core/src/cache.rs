use insight_model::ResponseRecord;

/// The in-memory list of all response records, in backend delivery order
/// (most recent first).
///
/// The cache is only ever replaced wholesale: concurrent refreshes cannot
/// produce a partially merged list, the last one to complete simply becomes
/// the new truth.  A read during an in-flight refresh may be briefly stale.
#[derive(Debug, Default)]
pub struct HistoryCache {
    records: Vec<ResponseRecord>,
}

impl HistoryCache {
    pub fn records(&self) -> &[ResponseRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Replace the entire cache with a fresh snapshot.
    pub fn replace(&mut self, records: Vec<ResponseRecord>) {
        self.records = records;
    }

    pub fn find(&self, response_id: &str) -> Option<&ResponseRecord> {
        self.records.iter().find(|r| r.response_id == response_id)
    }
}
