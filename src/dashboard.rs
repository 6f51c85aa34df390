// src/dashboard.rs
//! Dashboard shells: a navigation selector plus exactly one mounted view.

use serde::Serialize;
use serde_json::json;

use crate::admin::AdminViewState;
use crate::citizen::CitizenViewState;
use crate::employee::EmployeeViewState;
use crate::error::{ApiError, ApiResult};
use crate::municipal::MunicipalViewState;
use crate::navigation::{parse_view, DashboardHeader, MenuItem, MunicipalView, Navigation, UserType, ViewId};

/// State of whichever sub-view is currently displayed.
pub trait ViewState: Send + 'static {
    type Id: ViewId;

    /// Builds the view with a fresh copy of its mock data.
    fn mount(view: Self::Id) -> Self;
    fn id(&self) -> Self::Id;
    fn snapshot(&self) -> serde_json::Value;
}

pub struct Dashboard<S: ViewState> {
    nav: Navigation<S::Id>,
    mounted: S,
}

impl<S: ViewState> Dashboard<S> {
    pub fn new() -> Self {
        let nav = Navigation::<S::Id>::new();
        let mounted = S::mount(nav.current());
        Self { nav, mounted }
    }

    /// Selecting the current view keeps its state. Any other view replaces
    /// the mounted one, which drops its state and cancels its timers.
    pub fn select(&mut self, view: S::Id) -> bool {
        if !self.nav.select(view) {
            return false;
        }
        self.mounted = S::mount(view);
        tracing::debug!(view = %view, "view mounted");
        true
    }

    pub fn mounted_mut(&mut self) -> &mut S {
        &mut self.mounted
    }
}

#[cfg(test)]
impl<S: ViewState> Dashboard<S> {
    fn current(&self) -> S::Id {
        self.nav.current()
    }

    fn mounted(&self) -> &S {
        &self.mounted
    }
}

impl<S: ViewState> Default for Dashboard<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Operations every dashboard shell supports regardless of its view set.
pub trait Shell {
    fn select_raw(&mut self, raw: &str) -> ApiResult<bool>;
    fn toggle_menu(&mut self);
    fn close_menu(&mut self);
    fn current_view(&self) -> String;
    fn mobile_menu_open(&self) -> bool;
    fn menu(&self) -> Vec<MenuItem>;
    fn view_snapshot(&self) -> serde_json::Value;
}

impl<S: ViewState> Shell for Dashboard<S> {
    fn select_raw(&mut self, raw: &str) -> ApiResult<bool> {
        let view = parse_view::<S::Id>(raw)?;
        Ok(self.select(view))
    }

    fn toggle_menu(&mut self) {
        self.nav.toggle_menu();
    }

    fn close_menu(&mut self) {
        self.nav.close_menu();
    }

    fn current_view(&self) -> String {
        self.nav.current().to_string()
    }

    fn mobile_menu_open(&self) -> bool {
        self.nav.mobile_menu_open()
    }

    fn menu(&self) -> Vec<MenuItem> {
        self.nav.menu()
    }

    fn view_snapshot(&self) -> serde_json::Value {
        json!({
            "view": self.current_view(),
            "state": self.mounted.snapshot(),
        })
    }
}

// ==================== SESSION DASHBOARD ====================

pub enum DashboardState {
    Employee(Dashboard<EmployeeViewState>),
    Citizen(Dashboard<CitizenViewState>),
    Admin(Dashboard<AdminViewState>),
    Municipal(Dashboard<MunicipalViewState>),
}

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub user_type: UserType,
    pub header: DashboardHeader,
    pub current_view: String,
    pub mobile_menu_open: bool,
    pub menu: Vec<MenuItem>,
}

impl DashboardState {
    pub fn for_user(user_type: UserType) -> Self {
        match user_type {
            UserType::Employee => DashboardState::Employee(Dashboard::new()),
            UserType::Citizen => DashboardState::Citizen(Dashboard::new()),
            UserType::Admin => DashboardState::Admin(Dashboard::new()),
            UserType::Municipal => DashboardState::Municipal(Dashboard::new()),
        }
    }

    pub fn user_type(&self) -> UserType {
        match self {
            DashboardState::Employee(_) => UserType::Employee,
            DashboardState::Citizen(_) => UserType::Citizen,
            DashboardState::Admin(_) => UserType::Admin,
            DashboardState::Municipal(_) => UserType::Municipal,
        }
    }

    pub fn shell(&self) -> &dyn Shell {
        match self {
            DashboardState::Employee(d) => d,
            DashboardState::Citizen(d) => d,
            DashboardState::Admin(d) => d,
            DashboardState::Municipal(d) => d,
        }
    }

    pub fn shell_mut(&mut self) -> &mut dyn Shell {
        match self {
            DashboardState::Employee(d) => d,
            DashboardState::Citizen(d) => d,
            DashboardState::Admin(d) => d,
            DashboardState::Municipal(d) => d,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let shell = self.shell();
        DashboardSnapshot {
            user_type: self.user_type(),
            header: self.user_type().header(),
            current_view: shell.current_view(),
            mobile_menu_open: shell.mobile_menu_open(),
            menu: shell.menu(),
        }
    }

    pub fn employee(&mut self) -> ApiResult<&mut EmployeeViewState> {
        match self {
            DashboardState::Employee(d) => Ok(d.mounted_mut()),
            _ => Err(ApiError::wrong_dashboard(UserType::Employee.as_ref())),
        }
    }

    pub fn citizen(&mut self) -> ApiResult<&mut CitizenViewState> {
        match self {
            DashboardState::Citizen(d) => Ok(d.mounted_mut()),
            _ => Err(ApiError::wrong_dashboard(UserType::Citizen.as_ref())),
        }
    }

    pub fn admin(&mut self) -> ApiResult<&mut AdminViewState> {
        match self {
            DashboardState::Admin(d) => Ok(d.mounted_mut()),
            _ => Err(ApiError::wrong_dashboard(UserType::Admin.as_ref())),
        }
    }

    pub fn municipal(&mut self) -> ApiResult<&mut Dashboard<MunicipalViewState>> {
        match self {
            DashboardState::Municipal(d) => Ok(d),
            _ => Err(ApiError::wrong_dashboard(UserType::Municipal.as_ref())),
        }
    }

    /// The "back" arrow of every municipal page.
    pub fn municipal_back(&mut self) -> ApiResult<()> {
        self.municipal()?.select(MunicipalView::Home);
        Ok(())
    }
}
