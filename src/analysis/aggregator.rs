use std::collections::BTreeMap;

use crate::models::{ClassifiedItem, GeoSummaryRow};

/// Rolls classified items up into one row per geography, ordered by label.
#[derive(Debug, Default)]
pub struct GeoAggregator;

impl GeoAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, items: &[ClassifiedItem]) -> Vec<GeoSummaryRow> {
        let mut rows: BTreeMap<&str, GeoSummaryRow> = BTreeMap::new();

        for item in items {
            rows.entry(item.geo.as_str())
                .or_insert_with(|| GeoSummaryRow::new(item.geo.as_str()))
                .record(item);
        }

        rows.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(geo: &str, is_learning: bool, is_waiting: bool) -> ClassifiedItem {
        ClassifiedItem {
            name: format!("{}-{}-{}", geo, is_learning, is_waiting),
            geo: geo.to_string(),
            status_text: "s".to_string(),
            is_learning,
            is_waiting,
        }
    }

    #[test]
    fn test_empty_input_gives_empty_summary() {
        assert!(GeoAggregator::new().aggregate(&[]).is_empty());
    }

    #[test]
    fn test_counts_per_geo_in_label_order() {
        let rows = GeoAggregator::new().aggregate(&[
            item("US", true, false),
            item("EU", false, true),
            item("US", true, false),
            item("EU", true, true),
            item("EU", false, false),
        ]);

        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].geo, "EU");
        assert_eq!(rows[0].learning_count, 1);
        assert_eq!(rows[0].waiting_count, 2);
        assert_eq!(rows[0].total_count, 3);
        assert_eq!(rows[0].item_count, 3);

        assert_eq!(rows[1].geo, "US");
        assert_eq!(rows[1].learning_count, 2);
        assert_eq!(rows[1].waiting_count, 0);
        assert_eq!(rows[1].total_count, 2);
        assert_eq!(rows[1].item_count, 2);
    }

    #[test]
    fn test_counts_match_item_flags() {
        let items = vec![
            item("EU", true, true),
            item("KZ", false, true),
            item("KZ", true, false),
            item("EU", false, false),
        ];
        let rows = GeoAggregator::new().aggregate(&items);

        for row in &rows {
            let learning = items
                .iter()
                .filter(|i| i.geo == row.geo && i.is_learning)
                .count() as u64;
            let waiting = items
                .iter()
                .filter(|i| i.geo == row.geo && i.is_waiting)
                .count() as u64;
            assert_eq!(row.learning_count, learning);
            assert_eq!(row.waiting_count, waiting);
        }
    }
}
