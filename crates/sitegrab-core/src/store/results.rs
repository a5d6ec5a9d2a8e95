use serde::{Deserialize, Serialize};

use crate::record::PageRecord;

/// Every fetched page, in fetch order, unique by URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsLog {
    pub records: Vec<PageRecord>,
}

impl ResultsLog {
    pub fn contains_url(&self, url: &str) -> bool {
        self.records.iter().any(|r| r.url == url)
    }

    pub fn find(&self, url: &str) -> Option<&PageRecord> {
        self.records.iter().find(|r| r.url == url)
    }

    /// Append unless a record for the same URL exists; returns whether it was added.
    pub fn push_unique(&mut self, record: PageRecord) -> bool {
        if self.contains_url(&record.url) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
