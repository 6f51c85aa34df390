// src/navigation.rs
//! User types, per-dashboard view ids and the sidebar/tab navigation state.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{ApiError, ApiResult};

// ======== USER TYPE ========

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserType {
    Employee,
    Citizen,
    Admin,
    Municipal,
}

impl UserType {
    pub fn title(&self) -> &'static str {
        match self {
            UserType::Employee | UserType::Municipal => "Υπάλληλος Δήμου",
            UserType::Citizen => "Πολίτης",
            UserType::Admin => "Διαχειριστής",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserType::Employee => "Καταγραφή, αίτηση, έγκριση και διαχείριση πόρων",
            UserType::Citizen => "Προβολή στατιστικών και διαθέσιμων πόρων",
            UserType::Admin => "RBAC, monitoring, backup και auditing",
            UserType::Municipal => "Διαχείριση και κατανομή πόρων μεταξύ δήμων",
        }
    }

    /// Title and subtitle of the dashboard header.
    pub fn header(&self) -> DashboardHeader {
        let (title, subtitle) = match self {
            UserType::Employee => ("Υπάλληλος Δήμου", "Δήμος Αθηναίων"),
            UserType::Citizen => ("Πολίτης", "Δήμος Αθηναίων"),
            UserType::Admin => ("Διαχειριστής Συστήματος", "Admin Panel"),
            UserType::Municipal => ("efficiencity", "Πίνακας Ελέγχου Υπαλλήλου"),
        };
        DashboardHeader { title, subtitle }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserTypeInfo {
    pub id: UserType,
    pub title: &'static str,
    pub description: &'static str,
}

pub fn user_type_catalogue() -> Vec<UserTypeInfo> {
    UserType::iter()
        .map(|id| UserTypeInfo {
            id,
            title: id.title(),
            description: id.description(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardHeader {
    pub title: &'static str,
    pub subtitle: &'static str,
}

// ======== VIEW IDS ========

/// A dashboard's closed set of views.
pub trait ViewId:
    Copy + Eq + Default + Display + FromStr + IntoEnumIterator + Serialize + Send + 'static
{
    fn label(&self) -> &'static str;
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EmployeeView {
    #[default]
    Register,
    MyResources,
    OtherResources,
    Approvals,
    Reports,
}

impl ViewId for EmployeeView {
    fn label(&self) -> &'static str {
        match self {
            EmployeeView::Register => "Καταγραφή Πόρων",
            EmployeeView::MyResources => "Οι Πόροι Μου",
            EmployeeView::OtherResources => "Πόροι Άλλων Δήμων",
            EmployeeView::Approvals => "Εκκρεμείς Αιτήσεις",
            EmployeeView::Reports => "Αναφορές",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CitizenView {
    #[default]
    Search,
    Statistics,
    Transactions,
}

impl ViewId for CitizenView {
    fn label(&self) -> &'static str {
        match self {
            CitizenView::Search => "Αναζήτηση Πόρων",
            CitizenView::Statistics => "Προβολή Στατιστικών",
            CitizenView::Transactions => "Προβολή Συναλλαγών",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AdminView {
    #[default]
    Rbac,
    Audit,
    Backup,
    Monitoring,
}

impl ViewId for AdminView {
    fn label(&self) -> &'static str {
        match self {
            AdminView::Rbac => "Διαχείριση Χρηστών & Ρόλων (RBAC)",
            AdminView::Audit => "Audit Log",
            AdminView::Backup => "Backup / Restore",
            AdminView::Monitoring => "Παρακολούθηση Συστήματος",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MunicipalView {
    #[default]
    Home,
    OwnResources,
    OtherMunicipalities,
    Borrow,
    Lend,
}

impl ViewId for MunicipalView {
    fn label(&self) -> &'static str {
        match self {
            MunicipalView::Home => "Καλώς ήρθατε",
            MunicipalView::OwnResources => "Διαθέσιμοι Πόροι Δήμου",
            MunicipalView::OtherMunicipalities => "Πόροι Άλλων Δήμων",
            MunicipalView::Borrow => "Δανεισμός Πόρων",
            MunicipalView::Lend => "Δανεισμός σε Άλλους",
        }
    }
}

impl MunicipalView {
    pub fn card_description(&self) -> &'static str {
        match self {
            MunicipalView::Home => "Επιλέξτε μια λειτουργία για να συνεχίσετε",
            MunicipalView::OwnResources => "Προβολή όλων των διαθέσιμων πόρων του δήμου σας",
            MunicipalView::OtherMunicipalities => "Δείτε τους διαθέσιμους πόρους από άλλους δήμους",
            MunicipalView::Borrow => "Ζητήστε δανεισμό πόρων από άλλους δήμους",
            MunicipalView::Lend => "Διαθέστε πόρους για δανεισμό σε άλλους δήμους",
        }
    }
}

pub fn parse_view<V: ViewId>(raw: &str) -> ApiResult<V> {
    V::from_str(raw).map_err(|_| ApiError::unknown_view(raw))
}

// ======== NAVIGATION STATE ========

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub label: &'static str,
    pub active: bool,
}

/// Current view selector plus the mobile menu flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation<V: ViewId> {
    current: V,
    mobile_menu_open: bool,
}

impl<V: ViewId> Default for Navigation<V> {
    fn default() -> Self {
        Self {
            current: V::default(),
            mobile_menu_open: false,
        }
    }
}

impl<V: ViewId> Navigation<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> V {
        self.current
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Makes `view` current and closes the mobile menu.
    /// Returns whether the current view actually changed.
    pub fn select(&mut self, view: V) -> bool {
        self.mobile_menu_open = false;
        if self.current == view {
            return false;
        }
        self.current = view;
        true
    }

    pub fn toggle_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn close_menu(&mut self) {
        self.mobile_menu_open = false;
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        V::iter()
            .map(|view| MenuItem {
                id: view.to_string(),
                label: view.label(),
                active: view == self.current,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Navigation::<EmployeeView>::new().current(), EmployeeView::Register);
        assert_eq!(Navigation::<CitizenView>::new().current(), CitizenView::Search);
        assert_eq!(Navigation::<AdminView>::new().current(), AdminView::Rbac);
        assert_eq!(Navigation::<MunicipalView>::new().current(), MunicipalView::Home);
    }

    #[test]
    fn test_select_every_view() {
        let mut nav = Navigation::<EmployeeView>::new();
        for view in EmployeeView::iter() {
            nav.toggle_menu();
            nav.select(view);
            assert_eq!(nav.current(), view);
            assert!(!nav.mobile_menu_open());

            let active: Vec<_> = nav.menu().into_iter().filter(|m| m.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].id, view.to_string());
        }
    }

    #[test]
    fn test_select_same_view_reports_no_change() {
        let mut nav = Navigation::<AdminView>::new();
        assert!(!nav.select(AdminView::Rbac));
        assert!(nav.select(AdminView::Audit));
        assert!(nav.select(AdminView::Rbac));
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let mut nav = Navigation::<CitizenView>::new();
        nav.toggle_menu();
        assert!(nav.mobile_menu_open());
        nav.toggle_menu();
        assert!(!nav.mobile_menu_open());
        nav.toggle_menu();
        nav.close_menu();
        assert!(!nav.mobile_menu_open());
    }

    #[test]
    fn test_parse_view() {
        assert_eq!(parse_view::<EmployeeView>("my-resources").unwrap(), EmployeeView::MyResources);
        assert_eq!(
            parse_view::<MunicipalView>("other-municipalities").unwrap(),
            MunicipalView::OtherMunicipalities
        );
        assert!(parse_view::<CitizenView>("rbac").is_err());
        assert!(parse_view::<AdminView>("").is_err());
    }

    #[test]
    fn test_user_type_catalogue() {
        let catalogue = user_type_catalogue();
        assert_eq!(catalogue.len(), 4);
        assert_eq!(catalogue[1].id, UserType::Citizen);
        assert_eq!(catalogue[1].title, "Πολίτης");
        assert_eq!(UserType::Admin.header().subtitle, "Admin Panel");
    }
}
