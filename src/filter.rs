// src/filter.rs
//! In-memory predicates behind the search and filter panels.
//!
//! Free text matches case-insensitively by substring. A select matches by
//! equality, and an empty select matches everything.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::models::{
    AuditCategory, AuditEntry, MunicipalityDirectoryEntry, OtherMunicipalityResource,
    PublicResource, Resource, ResourceStatus,
};

pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn select_matches(selected: &str, value: &str) -> bool {
    selected.is_empty() || selected == value
}

fn option_matches<T: PartialEq>(selected: &Option<T>, value: &T) -> bool {
    selected.as_ref().map_or(true, |s| s == value)
}

/// Treats `""` (an unselected `<select>`) as `None`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => T::from_str(value).map(Some).map_err(serde::de::Error::custom),
    }
}

// ==================== EMPLOYEE: MY RESOURCES ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFilter {
    pub search: String,
    pub category: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub status: Option<ResourceStatus>,
}

impl ResourceFilter {
    pub fn apply<'a>(&self, resources: &'a [Resource]) -> Vec<&'a Resource> {
        resources
            .iter()
            .filter(|r| contains_ci(&r.name, &self.search))
            .filter(|r| select_matches(&self.category, &r.category))
            .filter(|r| option_matches(&self.status, &r.status))
            .collect()
    }
}

// ==================== EMPLOYEE: OTHER MUNICIPALITIES ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseFilter {
    pub search: String,
    pub category: String,
    pub municipality: String,
}

impl BrowseFilter {
    pub fn apply<'a>(
        &self,
        resources: &'a [OtherMunicipalityResource],
    ) -> Vec<&'a OtherMunicipalityResource> {
        resources
            .iter()
            .filter(|r| contains_ci(&r.name, &self.search))
            .filter(|r| select_matches(&self.category, &r.category))
            .filter(|r| select_matches(&self.municipality, &r.municipality))
            .collect()
    }
}

/// Distinct municipalities of the list, in first-seen order.
pub fn distinct_municipalities(resources: &[OtherMunicipalityResource]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for resource in resources {
        if !seen.contains(&resource.municipality) {
            seen.push(resource.municipality.clone());
        }
    }
    seen
}

/// Search of the request tab: the name matches OR the selected category
/// does. An empty query therefore matches every resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSearch {
    pub query: String,
    pub category: String,
}

impl RequestSearch {
    pub fn run(&self, resources: &[OtherMunicipalityResource]) -> Vec<OtherMunicipalityResource> {
        resources
            .iter()
            .filter(|r| {
                contains_ci(&r.name, &self.query)
                    || (!self.category.is_empty() && r.category == self.category)
            })
            .cloned()
            .collect()
    }
}

// ==================== CITIZEN ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitizenSearch {
    pub category: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub status: Option<ResourceStatus>,
}

impl CitizenSearch {
    /// Public rows carry the Greek label, so the status goes through it.
    pub fn run(&self, resources: &[PublicResource]) -> Vec<PublicResource> {
        resources
            .iter()
            .filter(|r| select_matches(&self.category, &r.category))
            .filter(|r| self.status.map_or(true, |status| r.status == status.label()))
            .cloned()
            .collect()
    }
}

// ==================== ADMIN: AUDIT ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditFilter {
    pub search: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub category: Option<AuditCategory>,
    /// `YYYY-MM-DD` prefix of the timestamp.
    pub date: String,
}

impl AuditFilter {
    pub fn apply<'a>(&self, entries: &'a [AuditEntry]) -> Vec<&'a AuditEntry> {
        entries
            .iter()
            .filter(|e| {
                contains_ci(&e.user, &self.search)
                    || contains_ci(&e.action, &self.search)
                    || contains_ci(&e.details, &self.search)
            })
            .filter(|e| option_matches(&self.category, &e.category))
            .filter(|e| e.timestamp.starts_with(&self.date))
            .collect()
    }
}

// ==================== MUNICIPAL ====================

pub fn search_directory<'a>(
    entries: &'a [MunicipalityDirectoryEntry],
    term: &str,
) -> Vec<&'a MunicipalityDirectoryEntry> {
    entries.iter().filter(|m| contains_ci(&m.name, term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn ids<T, F: Fn(&T) -> String>(items: &[T], id: F) -> Vec<String> {
        items.iter().map(id).collect()
    }

    #[test]
    fn test_my_resources_status_filter() {
        let resources = seed::my_resources();
        let filter = ResourceFilter {
            status: Some(ResourceStatus::Available),
            ..Default::default()
        };
        let found: Vec<&str> = filter.apply(&resources).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(found, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let resources = seed::my_resources();
        assert_eq!(ResourceFilter::default().apply(&resources).len(), resources.len());
    }

    #[test]
    fn test_category_filter_yields_only_that_category() {
        let resources = seed::my_resources();
        let filter = ResourceFilter {
            category: "Μηχανήματα".to_string(),
            ..Default::default()
        };
        let found = filter.apply(&resources);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|r| r.category == "Μηχανήματα"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let resources = seed::my_resources();
        let filter = ResourceFilter {
            search: "ΑΝΤΛΊΑ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&resources)[0].id, "3");

        let filter = ResourceFilter {
            search: "mercedes".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&resources)[0].id, "2");
    }

    #[test]
    fn test_browse_filter_and_municipality_options() {
        let resources = seed::other_municipality_resources();
        let filter = BrowseFilter {
            municipality: "Δήμος Χαλανδρίου".to_string(),
            ..Default::default()
        };
        let found: Vec<&str> = filter.apply(&resources).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(found, vec!["6", "8"]);

        let options = distinct_municipalities(&resources);
        assert_eq!(options.len(), 6);
        assert_eq!(options[0], "Δήμος Πειραιά");
        assert_eq!(options[1], "Δήμος Καλλιθέας");
    }

    #[test]
    fn test_request_search_uses_or_semantics() {
        let resources = seed::other_municipality_resources();

        let everything = RequestSearch::default().run(&resources);
        assert_eq!(everything.len(), 8);

        let search = RequestSearch {
            query: "Γερανός".to_string(),
            category: "Οχήματα".to_string(),
        };
        let found = ids(&search.run(&resources), |r| r.id.clone());
        assert_eq!(found, vec!["1", "4", "7", "8"]);
    }

    #[test]
    fn test_citizen_search_compares_labels() {
        let resources = seed::public_resources();
        let search = CitizenSearch {
            category: "Μηχανήματα".to_string(),
            status: Some(ResourceStatus::Available),
        };
        let found = ids(&search.run(&resources), |r| r.id.clone());
        assert_eq!(found, vec!["1", "4"]);

        let in_use = CitizenSearch {
            status: Some(ResourceStatus::InUse),
            ..Default::default()
        };
        assert_eq!(in_use.run(&resources)[0].name, "Φορτηγό Iveco");
    }

    #[test]
    fn test_audit_filter() {
        let entries = seed::audit_entries();

        let by_user = AuditFilter {
            search: "G.PAPADOPOULOS".to_string(),
            ..Default::default()
        };
        assert_eq!(by_user.apply(&entries).len(), 2);

        let by_date_and_category = AuditFilter {
            category: Some(AuditCategory::User),
            date: "2025-12-08".to_string(),
            ..Default::default()
        };
        let found = by_date_and_category.apply(&entries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "4");
    }

    #[test]
    fn test_directory_search() {
        let entries = seed::municipality_directory();
        assert_eq!(search_directory(&entries, "").len(), 5);
        let found = search_directory(&entries, "πατρ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Δήμος Πατρών");
    }

    #[test]
    fn test_empty_select_deserializes_to_none() {
        let filter: ResourceFilter =
            serde_json::from_str(r#"{"search":"","category":"","status":""}"#).unwrap();
        assert_eq!(filter.status, None);

        let filter: ResourceFilter = serde_json::from_str(r#"{"status":"in-use"}"#).unwrap();
        assert_eq!(filter.status, Some(ResourceStatus::InUse));

        assert!(serde_json::from_str::<ResourceFilter>(r#"{"status":"broken"}"#).is_err());
    }
}
