// src/models/resource.rs
//! Municipal resources as they appear in the different lists.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Categories offered by the employee forms and filters.
pub const CATEGORIES: [&str; 6] = [
    "Μηχανήματα",
    "Οχήματα",
    "Εξοπλισμός",
    "Εργαλεία",
    "Υλικά Κατασκευών",
    "Άλλο",
];

/// Categories shown to citizens (no "Άλλο").
pub const PUBLIC_CATEGORIES: [&str; 5] = [
    "Μηχανήματα",
    "Οχήματα",
    "Εξοπλισμός",
    "Εργαλεία",
    "Υλικά Κατασκευών",
];

pub const UNITS: [&str; 5] = ["Τεμάχια", "Κιλά", "Μέτρα", "Λίτρα", "Τόνοι"];

// ==================== STATUS ====================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ResourceStatus {
    Available,
    InUse,
    Lent,
}

impl ResourceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceStatus::Available => "Διαθέσιμο",
            ResourceStatus::InUse => "Σε Χρήση",
            ResourceStatus::Lent => "Δανεισμένο",
        }
    }
}

// ==================== RESOURCE ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit: String,
    pub status: ResourceStatus,
    pub municipality: String,
}

/// A resource offered by a neighbouring municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherMunicipalityResource {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit: String,
    pub municipality: String,
    pub distance: String,
}

/// Row of the public search, status kept as its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicResource {
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: String,
    pub municipality: String,
}

// ==================== OWN RESOURCES (MUNICIPAL) ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Truck,
    Worker,
    Tools,
    Staff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Availability {
    Good,
    Warning,
    Critical,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Good => "Καλή Διαθεσιμότητα",
            Availability::Warning => "Μέτρια Διαθεσιμότητα",
            Availability::Critical => "Χαμηλή Διαθεσιμότητα",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnResourceSummary {
    pub id: u32,
    pub name: String,
    pub kind: ResourceKind,
    pub total: u32,
    pub available: u32,
    pub in_use: u32,
    pub category: String,
    pub availability: Availability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableResource {
    pub name: String,
    pub available: u32,
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityDirectoryEntry {
    pub id: u32,
    pub name: String,
    pub distance: String,
    pub resources: Vec<AvailableResource>,
    pub total_resources: u32,
    pub status: String,
}

/// Entry of the selects on the borrow form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: u32,
    pub name: String,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(ResourceStatus::InUse.to_string(), "in-use");
        assert_eq!(ResourceStatus::from_str("lent").unwrap(), ResourceStatus::Lent);
        assert!(ResourceStatus::from_str("broken").is_err());
        assert_eq!(
            serde_json::to_string(&ResourceStatus::InUse).unwrap(),
            "\"in-use\""
        );
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ResourceStatus::Available.label(), "Διαθέσιμο");
        assert_eq!(ResourceStatus::InUse.label(), "Σε Χρήση");
        assert_eq!(ResourceStatus::Lent.label(), "Δανεισμένο");
    }
}
