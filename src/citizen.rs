// src/citizen.rs
//! Public views of the citizen dashboard.

use serde_json::json;

use crate::dashboard::ViewState;
use crate::error::{ApiError, ApiResult};
use crate::filter::CitizenSearch;
use crate::models::{category_shares, PublicResource, StatData, Transaction, PUBLIC_CATEGORIES};
use crate::navigation::CitizenView;
use crate::seed;

pub struct SearchView {
    resources: Vec<PublicResource>,
    search: CitizenSearch,
    results: Vec<PublicResource>,
    has_searched: bool,
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            resources: seed::public_resources(),
            search: CitizenSearch::default(),
            results: Vec::new(),
            has_searched: false,
        }
    }

    /// Updates the selectors. Results only change on `run`.
    pub fn set_filters(&mut self, search: CitizenSearch) {
        self.search = search;
    }

    pub fn run(&mut self) -> &[PublicResource] {
        self.results = self.search.run(&self.resources);
        self.has_searched = true;
        &self.results
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "filters": self.search,
            "has_searched": self.has_searched,
            "results": self.results,
            "categories": PUBLIC_CATEGORIES,
        })
    }
}

pub struct StatisticsView {
    stats: StatData,
}

impl StatisticsView {
    fn snapshot(&self) -> serde_json::Value {
        json!({
            "total_resources": self.stats.total_resources,
            "in_use": self.stats.in_use,
            "available": self.stats.available,
            "resources_by_category":
                category_shares(&self.stats.resources_by_category, self.stats.total_resources),
        })
    }
}

pub struct TransactionsView {
    transactions: Vec<Transaction>,
}

pub enum CitizenViewState {
    Search(SearchView),
    Statistics(StatisticsView),
    Transactions(TransactionsView),
}

impl ViewState for CitizenViewState {
    type Id = CitizenView;

    fn mount(view: CitizenView) -> Self {
        match view {
            CitizenView::Search => CitizenViewState::Search(SearchView::new()),
            CitizenView::Statistics => CitizenViewState::Statistics(StatisticsView {
                stats: seed::citizen_stats(),
            }),
            CitizenView::Transactions => CitizenViewState::Transactions(TransactionsView {
                transactions: seed::recent_transactions(),
            }),
        }
    }

    fn id(&self) -> CitizenView {
        match self {
            CitizenViewState::Search(_) => CitizenView::Search,
            CitizenViewState::Statistics(_) => CitizenView::Statistics,
            CitizenViewState::Transactions(_) => CitizenView::Transactions,
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        match self {
            CitizenViewState::Search(v) => v.snapshot(),
            CitizenViewState::Statistics(v) => v.snapshot(),
            CitizenViewState::Transactions(v) => json!({ "transactions": v.transactions }),
        }
    }
}

impl CitizenViewState {
    pub fn search(&mut self) -> ApiResult<&mut SearchView> {
        match self {
            CitizenViewState::Search(v) => Ok(v),
            other => Err(ApiError::view_not_mounted(
                CitizenView::Search.as_ref(),
                other.id().as_ref(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceStatus;

    #[test]
    fn test_results_only_after_search() {
        let mut view = SearchView::new();
        view.set_filters(CitizenSearch {
            category: "Μηχανήματα".to_string(),
            status: None,
        });
        assert_eq!(view.snapshot()["has_searched"], false);
        assert!(view.snapshot()["results"].as_array().unwrap().is_empty());

        assert_eq!(view.run().len(), 2);
        assert_eq!(view.snapshot()["has_searched"], true);
    }

    #[test]
    fn test_empty_search_lists_everything() {
        let mut view = SearchView::new();
        assert_eq!(view.run().len(), 4);

        view.set_filters(CitizenSearch {
            category: String::new(),
            status: Some(ResourceStatus::Lent),
        });
        assert!(view.run().is_empty());
    }

    #[test]
    fn test_statistics_percentages() {
        let state = CitizenViewState::mount(CitizenView::Statistics);
        let snapshot = state.snapshot();
        assert_eq!(snapshot["available"], 187);
        let shares = snapshot["resources_by_category"].as_array().unwrap();
        assert_eq!(shares.len(), 5);
        assert_eq!(shares[2]["category"], "Εξοπλισμός");
    }

    #[test]
    fn test_transactions_view() {
        let mut state = CitizenViewState::mount(CitizenView::Transactions);
        assert_eq!(state.snapshot()["transactions"].as_array().unwrap().len(), 6);
        assert!(matches!(state.search(), Err(ApiError::Conflict(_))));
    }
}
