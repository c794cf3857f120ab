use crate::config::ReportConfig;
use crate::models::{ClassifiedItem, RawItem};
use crate::taxonomy::{GeoMapping, GroupResolution, StatusTaxonomy};

/// Why an item did not make it into the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropCounts {
    pub ignored_group: usize,
    pub unmapped_group: usize,
    pub missing_status: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.ignored_group + self.unmapped_group + self.missing_status
    }
}

pub struct ItemClassifier {
    geo: GeoMapping,
    statuses: StatusTaxonomy,
}

impl ItemClassifier {
    pub fn new(geo: GeoMapping, statuses: StatusTaxonomy) -> Self {
        Self { geo, statuses }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            GeoMapping::from_config(config),
            StatusTaxonomy::from_mapping(&config.status_mapping),
        )
    }

    /// Filters and tags items, keeping input order.
    pub fn classify(&self, items: &[RawItem]) -> (Vec<ClassifiedItem>, DropCounts) {
        let mut drops = DropCounts::default();
        let mut classified = Vec::with_capacity(items.len());

        for item in items {
            let geo = match self.geo.resolve(&item.group_title) {
                GroupResolution::Geo(geo) => geo,
                GroupResolution::Ignored => {
                    drops.ignored_group += 1;
                    continue;
                }
                GroupResolution::Unmapped => {
                    drops.unmapped_group += 1;
                    continue;
                }
            };

            let status = match item.status_text.as_deref() {
                Some(status) if !status.is_empty() => status,
                _ => {
                    drops.missing_status += 1;
                    continue;
                }
            };

            let flags = self.statuses.classify(status);
            classified.push(ClassifiedItem {
                name: item.name.clone(),
                geo: geo.to_string(),
                status_text: status.to_string(),
                is_learning: flags.is_learning,
                is_waiting: flags.is_waiting,
            });
        }

        tracing::debug!(
            "Classified {} items, dropped {} (ignored={}, unmapped={}, no status={})",
            classified.len(),
            drops.total(),
            drops.ignored_group,
            drops.unmapped_group,
            drops.missing_status
        );

        (classified, drops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, group: &str, status: Option<&str>) -> RawItem {
        RawItem {
            name: name.to_string(),
            group_title: group.to_string(),
            status_text: status.map(str::to_string),
        }
    }

    fn classifier() -> ItemClassifier {
        let geo = GeoMapping::new(
            [
                ("EU-1".to_string(), "EU".to_string()),
                ("EU-2".to_string(), "EU".to_string()),
                ("Service".to_string(), "EU".to_string()),
                ("Азия".to_string(), "ASIA".to_string()),
            ]
            .into_iter()
            .collect(),
            ["Service".to_string()].into_iter().collect(),
        );
        ItemClassifier::new(geo, StatusTaxonomy::new(["In Progress"], ["Waiting"]))
    }

    #[test]
    fn test_single_learning_item() {
        let (items, drops) = classifier().classify(&[raw("Alice", "EU-1", Some("In Progress"))]);

        assert_eq!(drops.total(), 0);
        assert_eq!(
            items,
            vec![ClassifiedItem {
                name: "Alice".to_string(),
                geo: "EU".to_string(),
                status_text: "In Progress".to_string(),
                is_learning: true,
                is_waiting: false,
            }]
        );
    }

    #[test]
    fn test_ignored_group_dropped_regardless_of_status() {
        let (items, drops) = classifier().classify(&[
            raw("Bob", "Service", Some("In Progress")),
            raw("Eve", "Service", Some("Waiting")),
        ]);

        assert!(items.is_empty());
        assert_eq!(drops.ignored_group, 2);
    }

    #[test]
    fn test_unmapped_and_missing_status_dropped() {
        let (items, drops) = classifier().classify(&[
            raw("A", "Nowhere", Some("In Progress")),
            raw("B", "EU-1", None),
            raw("C", "EU-1", Some("")),
            raw("D", "Азия", Some("Done")),
        ]);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "D");
        assert!(!items[0].is_learning && !items[0].is_waiting);
        assert_eq!(
            drops,
            DropCounts {
                ignored_group: 0,
                unmapped_group: 1,
                missing_status: 2,
            }
        );
    }

    #[test]
    fn test_input_order_preserved() {
        let (items, _) = classifier().classify(&[
            raw("z", "Азия", Some("Waiting")),
            raw("a", "EU-2", Some("Waiting")),
            raw("m", "EU-1", Some("In Progress")),
        ]);

        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
}
