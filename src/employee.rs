// src/employee.rs
//! Sub-views of the employee dashboard.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use strum::{AsRefStr, Display, EnumString};
use validator::Validate;

use crate::dashboard::ViewState;
use crate::error::{ApiError, ApiResult};
use crate::filter::{distinct_municipalities, BrowseFilter, RequestSearch, ResourceFilter};
use crate::forms::{RegistrationForm, RequestForm};
use crate::models::*;
use crate::navigation::EmployeeView;
use crate::reports::ReportsView;
use crate::seed;
use crate::transient::Transient;
use crate::workflow::ApprovalQueue;

// ==================== REGISTER ====================

#[derive(Debug, Clone, Default, Serialize)]
struct RegistrationState {
    form: RegistrationForm,
    show_success: bool,
}

pub struct RegisterView {
    state: Transient<RegistrationState>,
}

impl RegisterView {
    pub fn new() -> Self {
        Self { state: Transient::default() }
    }

    pub fn update_form(&self, form: RegistrationForm) {
        self.state.update(|s| s.form = form);
    }

    pub fn clear(&self) {
        self.state.update(|s| s.form = RegistrationForm::default());
    }

    pub fn submit(&mut self, banner: Duration) -> ApiResult<()> {
        let form = self.state.with(|s| s.form.clone());
        form.validate()?;

        tracing::info!(
            name = %form.name,
            category = %form.category,
            quantity = %form.quantity,
            unit = %form.unit,
            "saving resource"
        );

        self.state.update(|s| s.show_success = true);
        self.state.schedule(banner, |s| *s = RegistrationState::default());
        Ok(())
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "registration": self.state,
            "categories": CATEGORIES,
            "units": UNITS,
        })
    }
}

// ==================== MY RESOURCES ====================

pub struct MyResourcesView {
    resources: Vec<Resource>,
    filter: ResourceFilter,
}

impl MyResourcesView {
    pub fn new() -> Self {
        Self {
            resources: seed::my_resources(),
            filter: ResourceFilter::default(),
        }
    }

    pub fn set_filter(&mut self, filter: ResourceFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Resource> {
        self.filter.apply(&self.resources)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "filter": self.filter,
            "resources": self.visible(),
            "total": self.resources.len(),
            "categories": CATEGORIES,
        })
    }
}

// ==================== OTHER MUNICIPALITIES ====================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourcesTab {
    #[default]
    Browse,
    Request,
}

#[derive(Debug, Clone, Default, Serialize)]
struct RequestTabState {
    search: RequestSearch,
    results: Vec<OtherMunicipalityResource>,
    has_searched: bool,
    selected: Option<OtherMunicipalityResource>,
    form: RequestForm,
    show_success: bool,
}

pub struct OtherResourcesView {
    resources: Vec<OtherMunicipalityResource>,
    tab: ResourcesTab,
    browse: BrowseFilter,
    request: Transient<RequestTabState>,
    my_requests: Vec<OutgoingRequest>,
}

impl OtherResourcesView {
    pub fn new() -> Self {
        Self {
            resources: seed::other_municipality_resources(),
            tab: ResourcesTab::default(),
            browse: BrowseFilter::default(),
            request: Transient::default(),
            my_requests: Vec::new(),
        }
    }

    pub fn set_tab(&mut self, tab: ResourcesTab) {
        self.tab = tab;
    }

    pub fn set_browse_filter(&mut self, filter: BrowseFilter) {
        self.browse = filter;
    }

    pub fn search(&self, search: RequestSearch) -> usize {
        let results = search.run(&self.resources);
        let found = results.len();
        self.request.update(|s| {
            s.search = search;
            s.results = results;
            s.has_searched = true;
        });
        found
    }

    /// Picks one of the current search results as the requested resource.
    pub fn select(&self, id: &str) -> ApiResult<()> {
        self.request.update(|s| {
            let resource = s
                .results
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| ApiError::resource_not_found(id))?;
            s.selected = Some(resource);
            Ok(())
        })
    }

    pub fn update_form(&self, form: RequestForm) {
        self.request.update(|s| s.form = form);
    }

    pub fn submit(&mut self, banner: Duration) -> ApiResult<OutgoingRequest> {
        let (selected, form) = self.request.with(|s| (s.selected.clone(), s.form.clone()));
        let resource = selected.ok_or_else(|| ApiError::incomplete_form("request"))?;
        form.validate()?;

        let request = OutgoingRequest {
            id: format!("REQ-{}", Utc::now().timestamp_millis()),
            resource_name: resource.name.clone(),
            quantity: form.quantity(),
            municipality: resource.municipality.clone(),
            status: AWAITING_APPROVAL.to_string(),
            date: Utc::now(),
        };
        self.my_requests.push(request.clone());

        tracing::info!(
            resource_id = %resource.id,
            resource = %resource.name,
            quantity = %form.quantity_needed,
            justification = %form.justification,
            status = AWAITING_APPROVAL,
            "submitting request"
        );

        self.request.update(|s| s.show_success = true);
        self.request.schedule(banner, |s| *s = RequestTabState::default());
        Ok(request)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "tab": self.tab,
            "browse": {
                "filter": self.browse,
                "resources": self.browse.apply(&self.resources),
                "municipalities": distinct_municipalities(&self.resources),
                "categories": CATEGORIES,
            },
            "request": self.request,
            "my_requests": self.my_requests,
        })
    }
}

// ==================== APPROVALS ====================

pub struct ApprovalsView {
    queue: ApprovalQueue<IncomingRequest>,
    expanded: Option<String>,
    banner: Transient<Option<RequestStatus>>,
}

impl ApprovalsView {
    pub fn new() -> Self {
        Self {
            queue: ApprovalQueue::new(seed::incoming_requests()),
            expanded: None,
            banner: Transient::default(),
        }
    }

    /// Expands the justification of `id`, or collapses it if already open.
    pub fn toggle_details(&mut self, id: &str) -> ApiResult<Option<String>> {
        if self.queue.find(id).is_none() {
            return Err(ApiError::request_not_found(id));
        }
        self.expanded = match self.expanded.take() {
            Some(open) if open == id => None,
            _ => Some(id.to_string()),
        };
        Ok(self.expanded.clone())
    }

    pub fn decide(&mut self, id: &str, decision: Decision, banner: Duration) -> ApiResult<RequestStatus> {
        let status = self.queue.decide(id, decision)?;
        self.expanded = None;
        self.banner.update(|b| *b = Some(status));
        self.banner.schedule(banner, |b| *b = None);
        Ok(status)
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "pending": self.queue.pending(),
            "processed": self.queue.processed(),
            "expanded": self.expanded,
            "banner": self.banner,
        })
    }
}

// ==================== MOUNTED VIEW ====================

pub enum EmployeeViewState {
    Register(RegisterView),
    MyResources(MyResourcesView),
    OtherResources(OtherResourcesView),
    Approvals(ApprovalsView),
    Reports(ReportsView),
}

impl ViewState for EmployeeViewState {
    type Id = EmployeeView;

    fn mount(view: EmployeeView) -> Self {
        match view {
            EmployeeView::Register => EmployeeViewState::Register(RegisterView::new()),
            EmployeeView::MyResources => EmployeeViewState::MyResources(MyResourcesView::new()),
            EmployeeView::OtherResources => EmployeeViewState::OtherResources(OtherResourcesView::new()),
            EmployeeView::Approvals => EmployeeViewState::Approvals(ApprovalsView::new()),
            EmployeeView::Reports => EmployeeViewState::Reports(ReportsView::new()),
        }
    }

    fn id(&self) -> EmployeeView {
        match self {
            EmployeeViewState::Register(_) => EmployeeView::Register,
            EmployeeViewState::MyResources(_) => EmployeeView::MyResources,
            EmployeeViewState::OtherResources(_) => EmployeeView::OtherResources,
            EmployeeViewState::Approvals(_) => EmployeeView::Approvals,
            EmployeeViewState::Reports(_) => EmployeeView::Reports,
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        match self {
            EmployeeViewState::Register(v) => v.snapshot(),
            EmployeeViewState::MyResources(v) => v.snapshot(),
            EmployeeViewState::OtherResources(v) => v.snapshot(),
            EmployeeViewState::Approvals(v) => v.snapshot(),
            EmployeeViewState::Reports(v) => v.snapshot(),
        }
    }
}

impl EmployeeViewState {
    fn not_mounted(&self, expected: EmployeeView) -> ApiError {
        ApiError::view_not_mounted(expected.as_ref(), self.id().as_ref())
    }

    pub fn register(&mut self) -> ApiResult<&mut RegisterView> {
        match self {
            EmployeeViewState::Register(v) => Ok(v),
            other => Err(other.not_mounted(EmployeeView::Register)),
        }
    }

    pub fn my_resources(&mut self) -> ApiResult<&mut MyResourcesView> {
        match self {
            EmployeeViewState::MyResources(v) => Ok(v),
            other => Err(other.not_mounted(EmployeeView::MyResources)),
        }
    }

    pub fn other_resources(&mut self) -> ApiResult<&mut OtherResourcesView> {
        match self {
            EmployeeViewState::OtherResources(v) => Ok(v),
            other => Err(other.not_mounted(EmployeeView::OtherResources)),
        }
    }

    pub fn approvals(&mut self) -> ApiResult<&mut ApprovalsView> {
        match self {
            EmployeeViewState::Approvals(v) => Ok(v),
            other => Err(other.not_mounted(EmployeeView::Approvals)),
        }
    }

    pub fn reports(&mut self) -> ApiResult<&mut ReportsView> {
        match self {
            EmployeeViewState::Reports(v) => Ok(v),
            other => Err(other.not_mounted(EmployeeView::Reports)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: Duration = Duration::from_millis(20);
    const SETTLE: Duration = Duration::from_millis(80);

    fn complete_form() -> RegistrationForm {
        RegistrationForm {
            name: "Γεννήτρια 50KW".to_string(),
            category: "Μηχανήματα".to_string(),
            quantity: "3".to_string(),
            unit: "Τεμάχια".to_string(),
            description: "Εφεδρική".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_registration_success_then_reset() {
        let mut view = RegisterView::new();
        view.update_form(complete_form());
        view.submit(BANNER).unwrap();

        let snapshot = view.snapshot();
        assert_eq!(snapshot["registration"]["show_success"], true);
        assert_eq!(snapshot["registration"]["form"]["name"], "Γεννήτρια 50KW");

        tokio::time::sleep(SETTLE).await;
        let snapshot = view.snapshot();
        assert_eq!(snapshot["registration"]["show_success"], false);
        assert_eq!(snapshot["registration"]["form"]["name"], "");
        assert_eq!(snapshot["registration"]["form"]["description"], "");
    }

    #[actix_rt::test]
    async fn test_incomplete_registration_never_succeeds() {
        let mut view = RegisterView::new();
        let mut form = complete_form();
        form.category = String::new();
        view.update_form(form);

        assert!(matches!(view.submit(BANNER), Err(ApiError::ValidationError(_))));
        assert_eq!(view.snapshot()["registration"]["show_success"], false);
        assert_eq!(view.snapshot()["registration"]["form"]["name"], "Γεννήτρια 50KW");
    }

    #[test]
    fn test_clear_empties_fields() {
        let view = RegisterView::new();
        view.update_form(complete_form());
        view.clear();
        assert_eq!(view.snapshot()["registration"]["form"]["unit"], "");
    }

    #[actix_rt::test]
    async fn test_request_submission_keeps_my_requests() {
        let mut view = OtherResourcesView::new();
        view.set_tab(ResourcesTab::Request);

        assert!(matches!(view.submit(BANNER), Err(ApiError::ValidationError(_))));

        let found = view.search(RequestSearch {
            query: "γερανός".to_string(),
            category: String::new(),
        });
        assert_eq!(found, 2);
        assert!(view.select("4").is_err());
        view.select("7").unwrap();
        view.update_form(RequestForm {
            quantity_needed: "1".to_string(),
            justification: "Ανακατασκευή πεζοδρομίου".to_string(),
        });

        let request = view.submit(BANNER).unwrap();
        assert!(request.id.starts_with("REQ-"));
        assert_eq!(request.municipality, "Δήμος Καλλιθέας");
        assert_eq!(request.status, AWAITING_APPROVAL);

        tokio::time::sleep(SETTLE).await;
        let snapshot = view.snapshot();
        assert_eq!(snapshot["request"]["has_searched"], false);
        assert!(snapshot["request"]["selected"].is_null());
        let mine = snapshot["my_requests"].as_array().unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0]["id"], request.id.as_str());
    }

    #[actix_rt::test]
    async fn test_approval_banner_and_details() {
        let mut view = ApprovalsView::new();
        assert_eq!(view.toggle_details("1").unwrap(), Some("1".to_string()));
        assert_eq!(view.toggle_details("1").unwrap(), None);
        view.toggle_details("1").unwrap();

        view.decide("1", Decision::Approve, BANNER).unwrap();
        let snapshot = view.snapshot();
        assert_eq!(snapshot["banner"], "approved");
        assert!(snapshot["expanded"].is_null());
        assert_eq!(snapshot["pending"].as_array().unwrap().len(), 2);
        assert_eq!(snapshot["processed"][0]["id"], "1");

        tokio::time::sleep(SETTLE).await;
        assert!(view.snapshot()["banner"].is_null());
    }

    #[test]
    fn test_accessor_rejects_unmounted_view() {
        let mut state = EmployeeViewState::mount(EmployeeView::Register);
        assert!(state.register().is_ok());
        assert!(matches!(state.approvals(), Err(ApiError::Conflict(_))));
    }
}
