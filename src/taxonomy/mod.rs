pub mod geo;

use std::collections::HashSet;

use crate::config::StatusMapping;

pub use geo::{GeoMapping, GroupResolution};

/// Category membership of one status text. Flags are independent: a status
/// may be in both categories or in neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusFlags {
    pub is_learning: bool,
    pub is_waiting: bool,
}

/// Exact-string status categories.
#[derive(Debug, Clone, Default)]
pub struct StatusTaxonomy {
    learning: HashSet<String>,
    waiting: HashSet<String>,
}

impl StatusTaxonomy {
    pub fn new<L, W>(learning: L, waiting: W) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        let taxonomy = Self {
            learning: learning.into_iter().map(Into::into).collect(),
            waiting: waiting.into_iter().map(Into::into).collect(),
        };

        let overlap = taxonomy.learning.intersection(&taxonomy.waiting).count();
        if overlap > 0 {
            tracing::warn!(
                "{} status(es) are listed as both learning and waiting, they will count in both",
                overlap
            );
        }

        taxonomy
    }

    pub fn from_mapping(mapping: &StatusMapping) -> Self {
        Self::new(mapping.learning.iter().cloned(), mapping.waiting.iter().cloned())
    }

    pub fn classify(&self, status: &str) -> StatusFlags {
        StatusFlags {
            is_learning: self.learning.contains(status),
            is_waiting: self.waiting.contains(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_exact_match() {
        let taxonomy = StatusTaxonomy::new(["In Progress"], ["Waiting"]);

        assert!(taxonomy.classify("In Progress").is_learning);
        assert!(!taxonomy.classify("in progress").is_learning);
        assert!(!taxonomy.classify("In Progress ").is_learning);
        assert_eq!(taxonomy.classify("Done"), StatusFlags::default());
    }

    #[test]
    fn test_overlapping_status_sets_both_flags() {
        let taxonomy = StatusTaxonomy::new(["Обучается", "Пауза"], ["Ожидает", "Пауза"]);

        let flags = taxonomy.classify("Пауза");
        assert!(flags.is_learning);
        assert!(flags.is_waiting);

        let flags = taxonomy.classify("Ожидает");
        assert!(!flags.is_learning);
        assert!(flags.is_waiting);
    }
}
