// src/municipal.rs
//! Pages of the municipal-employee shell. Each page has a "back" action to
//! the landing page, handled by the dashboard.

use rand::Rng;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use strum::IntoEnumIterator;
use validator::Validate;

use crate::dashboard::ViewState;
use crate::error::{ApiError, ApiResult};
use crate::filter::search_directory;
use crate::forms::BorrowForm;
use crate::models::*;
use crate::navigation::{MunicipalView, ViewId};
use crate::seed;
use crate::transient::Transient;
use crate::workflow::{ApprovalQueue, StatusFilter};

// ==================== OWN RESOURCES ====================

pub struct OwnResourcesView {
    resources: Vec<OwnResourceSummary>,
}

impl OwnResourcesView {
    pub fn total_available(&self) -> u32 {
        self.resources.iter().map(|r| r.available).sum()
    }

    pub fn total_in_use(&self) -> u32 {
        self.resources.iter().map(|r| r.in_use).sum()
    }

    fn snapshot(&self) -> serde_json::Value {
        let resources: Vec<serde_json::Value> = self
            .resources
            .iter()
            .map(|r| json!({ "resource": r, "availability_label": r.availability.label() }))
            .collect();
        json!({
            "resources": resources,
            "total_available": self.total_available(),
            "total_in_use": self.total_in_use(),
        })
    }
}

// ==================== OTHER MUNICIPALITIES ====================

pub struct DirectoryView {
    municipalities: Vec<MunicipalityDirectoryEntry>,
    search: String,
}

impl DirectoryView {
    pub fn set_search(&mut self, term: String) -> usize {
        self.search = term;
        search_directory(&self.municipalities, &self.search).len()
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "search": self.search,
            "municipalities": search_directory(&self.municipalities, &self.search),
            "municipality_count": self.municipalities.len(),
            "total_resources": self
                .municipalities
                .iter()
                .map(|m| m.total_resources)
                .sum::<u32>(),
        })
    }
}

// ==================== BORROW ====================

#[derive(Debug, Clone, Default, Serialize)]
struct BorrowState {
    form: BorrowForm,
    /// Reference number while the success screen is shown.
    submitted: Option<String>,
}

pub struct BorrowView {
    state: Transient<BorrowState>,
    municipalities: Vec<Choice>,
    resource_types: Vec<Choice>,
}

impl BorrowView {
    pub fn new() -> Self {
        Self {
            state: Transient::default(),
            municipalities: seed::lending_municipalities(),
            resource_types: seed::borrowable_resource_types(),
        }
    }

    pub fn update_form(&self, form: BorrowForm) {
        self.state.update(|s| s.form = form);
    }

    /// Returns the `#BR-` reference shown on the success screen.
    pub fn submit(&mut self, banner: Duration) -> ApiResult<String> {
        let form = self.state.with(|s| s.form.clone());
        form.validate()?;

        let reference = format!("#BR-{}", rand::thread_rng().gen_range(0..10000));
        tracing::info!(
            reference = %reference,
            municipality = %form.municipality,
            resource = %form.resource,
            quantity = %form.quantity,
            start_date = %form.start_date,
            end_date = %form.end_date,
            "borrow request submitted"
        );

        let shown = reference.clone();
        self.state.update(|s| s.submitted = Some(shown));
        self.state.schedule(banner, |s| *s = BorrowState::default());
        Ok(reference)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "borrow": self.state,
            "municipalities": self.municipalities,
            "resource_types": self.resource_types,
        })
    }
}

// ==================== LEND ====================

pub struct LendView {
    queue: ApprovalQueue<LendRequest>,
    filter: StatusFilter,
}

impl LendView {
    pub fn new() -> Self {
        Self {
            queue: ApprovalQueue::new(seed::lend_requests()),
            filter: StatusFilter::All,
        }
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn decide(&mut self, id: u32, decision: Decision) -> ApiResult<RequestStatus> {
        self.queue.decide(&id.to_string(), decision)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "filter": self.filter,
            "counts": self.queue.counts(),
            "requests": self.queue.filtered(self.filter),
        })
    }
}

// ==================== MOUNTED VIEW ====================

pub enum MunicipalViewState {
    Home,
    OwnResources(OwnResourcesView),
    OtherMunicipalities(DirectoryView),
    Borrow(BorrowView),
    Lend(LendView),
}

fn home_snapshot() -> serde_json::Value {
    let cards: Vec<serde_json::Value> = MunicipalView::iter()
        .filter(|view| *view != MunicipalView::Home)
        .map(|view| {
            json!({
                "id": view,
                "title": view.label(),
                "description": view.card_description(),
            })
        })
        .collect();
    json!({
        "welcome": MunicipalView::Home.label(),
        "prompt": MunicipalView::Home.card_description(),
        "cards": cards,
    })
}

impl ViewState for MunicipalViewState {
    type Id = MunicipalView;

    fn mount(view: MunicipalView) -> Self {
        match view {
            MunicipalView::Home => MunicipalViewState::Home,
            MunicipalView::OwnResources => MunicipalViewState::OwnResources(OwnResourcesView {
                resources: seed::own_resources(),
            }),
            MunicipalView::OtherMunicipalities => MunicipalViewState::OtherMunicipalities(DirectoryView {
                municipalities: seed::municipality_directory(),
                search: String::new(),
            }),
            MunicipalView::Borrow => MunicipalViewState::Borrow(BorrowView::new()),
            MunicipalView::Lend => MunicipalViewState::Lend(LendView::new()),
        }
    }

    fn id(&self) -> MunicipalView {
        match self {
            MunicipalViewState::Home => MunicipalView::Home,
            MunicipalViewState::OwnResources(_) => MunicipalView::OwnResources,
            MunicipalViewState::OtherMunicipalities(_) => MunicipalView::OtherMunicipalities,
            MunicipalViewState::Borrow(_) => MunicipalView::Borrow,
            MunicipalViewState::Lend(_) => MunicipalView::Lend,
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        match self {
            MunicipalViewState::Home => home_snapshot(),
            MunicipalViewState::OwnResources(v) => v.snapshot(),
            MunicipalViewState::OtherMunicipalities(v) => v.snapshot(),
            MunicipalViewState::Borrow(v) => v.snapshot(),
            MunicipalViewState::Lend(v) => v.snapshot(),
        }
    }
}

impl MunicipalViewState {
    fn not_mounted(&self, expected: MunicipalView) -> ApiError {
        ApiError::view_not_mounted(expected.as_ref(), self.id().as_ref())
    }

    pub fn directory(&mut self) -> ApiResult<&mut DirectoryView> {
        match self {
            MunicipalViewState::OtherMunicipalities(v) => Ok(v),
            other => Err(other.not_mounted(MunicipalView::OtherMunicipalities)),
        }
    }

    pub fn borrow(&mut self) -> ApiResult<&mut BorrowView> {
        match self {
            MunicipalViewState::Borrow(v) => Ok(v),
            other => Err(other.not_mounted(MunicipalView::Borrow)),
        }
    }

    pub fn lend(&mut self) -> ApiResult<&mut LendView> {
        match self {
            MunicipalViewState::Lend(v) => Ok(v),
            other => Err(other.not_mounted(MunicipalView::Lend)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: Duration = Duration::from_millis(20);
    const SETTLE: Duration = Duration::from_millis(80);

    #[test]
    fn test_home_lists_four_cards() {
        let state = MunicipalViewState::mount(MunicipalView::Home);
        let snapshot = state.snapshot();
        let cards = snapshot["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[3]["id"], "lend");
    }

    #[test]
    fn test_own_resource_totals() {
        let state = MunicipalViewState::mount(MunicipalView::OwnResources);
        let MunicipalViewState::OwnResources(view) = &state else {
            panic!("own resources not mounted");
        };
        assert_eq!(view.total_available(), 118);
        assert_eq!(view.total_in_use(), 45);
        assert_eq!(
            state.snapshot()["resources"][4]["availability_label"],
            "Χαμηλή Διαθεσιμότητα"
        );
    }

    #[test]
    fn test_directory_totals_ignore_search() {
        let mut state = MunicipalViewState::mount(MunicipalView::OtherMunicipalities);
        assert_eq!(state.directory().unwrap().set_search("βόλ".to_string()), 1);
        let snapshot = state.snapshot();
        assert_eq!(snapshot["municipalities"].as_array().unwrap().len(), 1);
        assert_eq!(snapshot["municipality_count"], 5);
        assert_eq!(snapshot["total_resources"], 166);
    }

    #[actix_rt::test]
    async fn test_borrow_submission() {
        let mut view = BorrowView::new();
        assert!(view.submit(BANNER).is_err());

        view.update_form(BorrowForm {
            municipality: "Δήμος Πατρών".to_string(),
            resource: "Μικρά Οχήματα".to_string(),
            quantity: "2".to_string(),
            start_date: "2025-12-15".to_string(),
            end_date: "2025-12-20".to_string(),
            reason: "Καθαρισμός παραλίας".to_string(),
        });
        let reference = view.submit(BANNER).unwrap();
        assert!(reference.starts_with("#BR-"));
        let number: u32 = reference.trim_start_matches("#BR-").parse().unwrap();
        assert!(number < 10000);
        assert_eq!(view.snapshot()["borrow"]["submitted"], reference.as_str());

        tokio::time::sleep(SETTLE).await;
        let snapshot = view.snapshot();
        assert!(snapshot["borrow"]["submitted"].is_null());
        assert_eq!(snapshot["borrow"]["form"]["quantity"], "1");
        assert_eq!(snapshot["borrow"]["form"]["municipality"], "");
    }

    #[test]
    fn test_lend_decisions() {
        let mut view = LendView::new();
        assert_eq!(view.decide(2, Decision::Reject).unwrap(), RequestStatus::Rejected);
        assert!(matches!(view.decide(3, Decision::Approve), Err(ApiError::Conflict(_))));

        view.set_filter(StatusFilter::Rejected);
        let snapshot = view.snapshot();
        assert_eq!(snapshot["counts"]["rejected"], 2);
        assert_eq!(snapshot["requests"].as_array().unwrap().len(), 2);
    }
}
