use chrono::{DateTime, Utc};
use std::path::PathBuf;

use super::item::ClassifiedItem;

/// Per-geography counts.
///
/// `total_count` is defined as `learning_count + waiting_count`. Because an
/// item may be in both categories or in neither, it can differ from
/// `item_count`, the number of classified items carrying this geography.
/// Only the first four fields are exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoSummaryRow {
    pub geo: String,
    pub learning_count: u64,
    pub waiting_count: u64,
    pub total_count: u64,
    pub item_count: u64,
}

impl GeoSummaryRow {
    pub fn new(geo: impl Into<String>) -> Self {
        Self {
            geo: geo.into(),
            learning_count: 0,
            waiting_count: 0,
            total_count: 0,
            item_count: 0,
        }
    }

    pub fn record(&mut self, item: &ClassifiedItem) {
        self.item_count += 1;
        if item.is_learning {
            self.learning_count += 1;
        }
        if item.is_waiting {
            self.waiting_count += 1;
        }
        self.total_count = self.learning_count + self.waiting_count;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub raw_items: PathBuf,
    pub summary_by_geo: PathBuf,
}

/// Result of one successful pipeline run.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub board_name: String,
    pub fetched: usize,
    pub items: Vec<ClassifiedItem>,
    pub summary: Vec<GeoSummaryRow>,
    pub paths: ReportPaths,
    pub generated_at: DateTime<Utc>,
}

impl ReportOutcome {
    /// True when nothing survived filtering. The run still succeeded and both
    /// files were written with headers only.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
