use std::collections::{HashMap, HashSet};

use crate::config::ReportConfig;

/// How a group title maps onto the report's geographies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupResolution<'a> {
    Geo(&'a str),
    Ignored,
    Unmapped,
}

#[derive(Debug, Clone, Default)]
pub struct GeoMapping {
    groups: HashMap<String, String>,
    ignored: HashSet<String>,
}

impl GeoMapping {
    pub fn new(groups: HashMap<String, String>, ignored: HashSet<String>) -> Self {
        Self { groups, ignored }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            config.geo_group_mapping.clone(),
            config.ignored_groups.clone(),
        )
    }

    /// Ignored groups win over a mapping for the same title. A mapping to an
    /// empty label counts as unmapped.
    pub fn resolve(&self, group_title: &str) -> GroupResolution<'_> {
        if self.ignored.contains(group_title) {
            return GroupResolution::Ignored;
        }

        match self.groups.get(group_title) {
            Some(geo) if !geo.is_empty() => GroupResolution::Geo(geo),
            _ => GroupResolution::Unmapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> GeoMapping {
        GeoMapping::new(
            [
                ("EU-1".to_string(), "EU".to_string()),
                ("Архив".to_string(), "RU".to_string()),
                ("Blank".to_string(), String::new()),
            ]
            .into_iter()
            .collect(),
            ["Архив".to_string()].into_iter().collect(),
        )
    }

    #[test]
    fn test_resolve_group() {
        let mapping = mapping();
        assert_eq!(mapping.resolve("EU-1"), GroupResolution::Geo("EU"));
        assert_eq!(mapping.resolve("Архив"), GroupResolution::Ignored);
        assert_eq!(mapping.resolve("Blank"), GroupResolution::Unmapped);
        assert_eq!(mapping.resolve("Unknown"), GroupResolution::Unmapped);
    }
}
