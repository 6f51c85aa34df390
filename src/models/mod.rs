// src/models/mod.rs

pub mod audit;
pub mod backup;
pub mod request;
pub mod resource;
pub mod system;
pub mod user;

pub use audit::*;
pub use backup::*;
pub use request::*;
pub use resource::*;
pub use system::*;
pub use user::*;

use serde::{Deserialize, Serialize};

// ==================== COMMON / SHARED ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u32,
}

/// Category count with its share of the total, as drawn in the bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: u32,
    pub percentage: f64,
}

pub fn category_shares(counts: &[CategoryCount], total: u32) -> Vec<CategoryShare> {
    counts
        .iter()
        .map(|c| CategoryShare {
            category: c.category.clone(),
            count: c.count,
            percentage: if total == 0 {
                0.0
            } else {
                f64::from(c.count) / f64::from(total) * 100.0
            },
        })
        .collect()
}

/// Figures shown on the employee report preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub total_resources: u32,
    pub active_loans: u32,
    pub pending_requests: u32,
    pub completed_transactions: u32,
    pub resources_by_category: Vec<CategoryCount>,
}

/// Public statistics for citizens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatData {
    pub total_resources: u32,
    pub in_use: u32,
    pub available: u32,
    pub resources_by_category: Vec<CategoryCount>,
}

/// Entry of the municipality's public action history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: String,
    pub action: String,
    pub municipality: String,
    pub date: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_shares() {
        let counts = vec![
            CategoryCount { category: "Οχήματα".to_string(), count: 68 },
            CategoryCount { category: "Εργαλεία".to_string(), count: 32 },
        ];
        let shares = category_shares(&counts, 200);
        assert_eq!(shares[0].percentage, 34.0);
        assert_eq!(shares[1].percentage, 16.0);

        let empty_total = category_shares(&counts, 0);
        assert_eq!(empty_total[0].percentage, 0.0);
    }
}
