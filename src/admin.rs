// src/admin.rs
//! Sub-views of the admin dashboard: RBAC table, audit log, backup/restore
//! panel and system monitoring.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use validator::Validate;

use crate::dashboard::ViewState;
use crate::error::{ApiError, ApiResult};
use crate::filter::AuditFilter;
use crate::forms::filled;
use crate::models::*;
use crate::navigation::AdminView;
use crate::reports::{write_csv, CsvExport};
use crate::seed;
use crate::transient::Transient;

// ==================== RBAC ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom(function = "filled"))]
    pub name: String,
    #[validate(custom(function = "filled"))]
    pub email: String,
    pub role: Option<Role>,
    #[serde(default)]
    pub municipality: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub municipality: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RbacBanner {
    Created,
    Updated,
}

impl RbacBanner {
    pub fn message(&self) -> &'static str {
        match self {
            RbacBanner::Created => "Χρήστης Δημιουργήθηκε!",
            RbacBanner::Updated => "Χρήστης Ενημερώθηκε!",
        }
    }
}

pub struct RbacView {
    users: Vec<RbacUser>,
    next_id: u64,
    banner: Transient<Option<RbacBanner>>,
}

impl RbacView {
    pub fn new() -> Self {
        let users = seed::rbac_users();
        let next_id = users
            .iter()
            .filter_map(|u| u.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            users,
            next_id,
            banner: Transient::default(),
        }
    }

    pub fn users(&self) -> &[RbacUser] {
        &self.users
    }

    fn show_banner(&mut self, kind: RbacBanner, after: Duration) {
        self.banner.update(|b| *b = Some(kind));
        self.banner.schedule(after, |b| *b = None);
    }

    pub fn create_user(&mut self, request: CreateUserRequest, banner: Duration) -> ApiResult<RbacUser> {
        request.validate()?;

        let id = self.next_id;
        self.next_id += 1;

        let user = RbacUser {
            id: id.to_string(),
            name: request.name,
            email: request.email,
            role: request.role.unwrap_or_default(),
            municipality: request.municipality,
            status: UserStatus::Active,
        };
        self.users.push(user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "user created");
        self.show_banner(RbacBanner::Created, banner);
        Ok(user)
    }

    pub fn update_user(
        &mut self,
        id: &str,
        request: UpdateUserRequest,
        banner: Duration,
    ) -> ApiResult<RbacUser> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ApiError::user_not_found(id))?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(municipality) = request.municipality {
            user.municipality = municipality;
        }
        let updated = user.clone();

        tracing::info!(user_id = id, role = %updated.role, "user updated");
        self.show_banner(RbacBanner::Updated, banner);
        Ok(updated)
    }

    pub fn toggle_status(&mut self, id: &str) -> ApiResult<UserStatus> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ApiError::user_not_found(id))?;
        user.status = user.status.toggled();
        tracing::info!(user_id = id, status = %user.status, "user status toggled");
        Ok(user.status)
    }

    fn snapshot(&self) -> serde_json::Value {
        let banner = self.banner.get().map(|kind| {
            json!({
                "kind": kind,
                "message": kind.message(),
                "details": "Οι αλλαγές καταχωρήθηκαν στο Audit Log.",
            })
        });
        json!({
            "users": self.users,
            "roles": role_catalogue(),
            "banner": banner,
        })
    }
}

// ==================== AUDIT ====================

pub struct AuditView {
    entries: Vec<AuditEntry>,
    filter: AuditFilter,
}

impl AuditView {
    pub fn new() -> Self {
        Self {
            entries: seed::audit_entries(),
            filter: AuditFilter::default(),
        }
    }

    pub fn set_filter(&mut self, filter: AuditFilter) {
        self.filter = filter;
    }

    /// Exports the entries that pass the current filter.
    pub fn export(&self) -> ApiResult<CsvExport> {
        let visible = self.filter.apply(&self.entries);
        tracing::info!(entries = visible.len(), "exporting audit log");

        let rows = visible.into_iter().map(|e| {
            vec![
                e.timestamp.clone(),
                e.user.clone(),
                e.action.clone(),
                e.category.to_string(),
                e.details.clone(),
                e.ip_address.clone(),
            ]
        });
        let body = write_csv(
            &["Χρονοσφραγίδα", "Χρήστης", "Ενέργεια", "Κατηγορία", "Λεπτομέρειες", "IP"],
            rows,
        )?;

        Ok(CsvExport {
            filename: format!("audit_log_{}.csv", Utc::now().format("%Y%m%d_%H%M%S")),
            body,
        })
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "filter": self.filter,
            "entries": self.filter.apply(&self.entries),
            "total": self.entries.len(),
        })
    }
}

// ==================== BACKUP / RESTORE ====================

#[derive(Debug, Clone, Deserialize)]
pub struct BackupRequest {
    #[serde(rename = "type")]
    pub backup_type: BackupType,
    pub source: BackupSource,
    pub destination: BackupDestination,
}

#[derive(Debug, Default, Deserialize)]
pub struct RestoreRequest {
    /// Most recent backup when absent.
    #[serde(default)]
    pub backup_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupBanner {
    Backup,
    Restore,
}

impl BackupBanner {
    pub fn message(&self) -> &'static str {
        match self {
            BackupBanner::Backup => "Backup Ξεκίνησε!",
            BackupBanner::Restore => "Restore Ολοκληρώθηκε!",
        }
    }

    pub fn details(&self) -> &'static str {
        match self {
            BackupBanner::Backup => {
                "Το backup εκτελείται στο παρασκήνιο. Θα ειδοποιηθείτε όταν ολοκληρωθεί."
            }
            BackupBanner::Restore => {
                "Τα δεδομένα επαναφέρθηκαν επιτυχώς. Η ενέργεια καταγράφηκε στο Audit Log."
            }
        }
    }
}

pub struct BackupView {
    backups: Vec<Backup>,
    banner: Transient<Option<BackupBanner>>,
}

impl BackupView {
    pub fn new() -> Self {
        Self {
            backups: seed::backups(),
            banner: Transient::default(),
        }
    }

    fn show_banner(&mut self, kind: BackupBanner, after: Duration) {
        self.banner.update(|b| *b = Some(kind));
        self.banner.schedule(after, |b| *b = None);
    }

    pub fn start_backup(&mut self, request: BackupRequest, banner: Duration) {
        tracing::info!(
            backup_type = %request.backup_type,
            source = %request.source,
            destination = %request.destination,
            "starting backup"
        );
        self.show_banner(BackupBanner::Backup, banner);
    }

    /// Restores `backup_id`, or the most recent backup when none is given.
    pub fn restore(&mut self, backup_id: Option<&str>, banner: Duration) -> ApiResult<Backup> {
        let backup = match backup_id {
            Some(id) => self.find(id)?,
            None => self
                .backups
                .first()
                .cloned()
                .ok_or_else(|| ApiError::backup_not_found("latest"))?,
        };

        tracing::info!(backup_id = %backup.id, filename = %backup.filename, "restoring backup");
        self.show_banner(BackupBanner::Restore, banner);
        Ok(backup)
    }

    pub fn download(&self, id: &str) -> ApiResult<Backup> {
        let backup = self.find(id)?;
        tracing::info!(backup_id = id, filename = %backup.filename, "download backup");
        Ok(backup)
    }

    fn find(&self, id: &str) -> ApiResult<Backup> {
        self.backups
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| ApiError::backup_not_found(id))
    }

    fn snapshot(&self) -> serde_json::Value {
        let banner = self.banner.get().map(|kind| {
            json!({
                "kind": kind,
                "message": kind.message(),
                "details": kind.details(),
            })
        });
        let backups: Vec<serde_json::Value> = self
            .backups
            .iter()
            .map(|b| json!({ "backup": b, "type_label": b.backup_type.label() }))
            .collect();
        json!({
            "backups": backups,
            "banner": banner,
        })
    }
}

// ==================== MONITORING ====================

pub struct MonitoringView {
    metrics: SystemMetrics,
    services: Vec<ServiceHealth>,
    alerts: Vec<SystemAlert>,
    refreshing: Transient<bool>,
}

impl MonitoringView {
    pub fn new() -> Self {
        Self {
            metrics: seed::system_metrics(),
            services: seed::services(),
            alerts: seed::alerts(),
            refreshing: Transient::default(),
        }
    }

    pub fn refresh(&mut self, after: Duration) {
        self.refreshing.update(|r| *r = true);
        self.refreshing.schedule(after, |r| *r = false);
    }

    pub fn restart_service(&self, name: &str) -> ApiResult<String> {
        if !self.services.iter().any(|s| s.name == name) {
            return Err(ApiError::service_not_found(name));
        }
        tracing::info!(service = name, "restarting service");
        Ok(format!("Επανεκκίνηση υπηρεσίας: {}", name))
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "metrics": self.metrics,
            "uptime": self.metrics.uptime.to_string(),
            "services": self.services,
            "alerts": self.alerts,
            "refreshing": self.refreshing,
        })
    }
}

// ==================== MOUNTED VIEW ====================

pub enum AdminViewState {
    Rbac(RbacView),
    Audit(AuditView),
    Backup(BackupView),
    Monitoring(MonitoringView),
}

impl ViewState for AdminViewState {
    type Id = AdminView;

    fn mount(view: AdminView) -> Self {
        match view {
            AdminView::Rbac => AdminViewState::Rbac(RbacView::new()),
            AdminView::Audit => AdminViewState::Audit(AuditView::new()),
            AdminView::Backup => AdminViewState::Backup(BackupView::new()),
            AdminView::Monitoring => AdminViewState::Monitoring(MonitoringView::new()),
        }
    }

    fn id(&self) -> AdminView {
        match self {
            AdminViewState::Rbac(_) => AdminView::Rbac,
            AdminViewState::Audit(_) => AdminView::Audit,
            AdminViewState::Backup(_) => AdminView::Backup,
            AdminViewState::Monitoring(_) => AdminView::Monitoring,
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        match self {
            AdminViewState::Rbac(v) => v.snapshot(),
            AdminViewState::Audit(v) => v.snapshot(),
            AdminViewState::Backup(v) => v.snapshot(),
            AdminViewState::Monitoring(v) => v.snapshot(),
        }
    }
}

impl AdminViewState {
    fn not_mounted(&self, expected: AdminView) -> ApiError {
        ApiError::view_not_mounted(expected.as_ref(), self.id().as_ref())
    }

    pub fn rbac(&mut self) -> ApiResult<&mut RbacView> {
        match self {
            AdminViewState::Rbac(v) => Ok(v),
            other => Err(other.not_mounted(AdminView::Rbac)),
        }
    }

    pub fn audit(&mut self) -> ApiResult<&mut AuditView> {
        match self {
            AdminViewState::Audit(v) => Ok(v),
            other => Err(other.not_mounted(AdminView::Audit)),
        }
    }

    pub fn backup(&mut self) -> ApiResult<&mut BackupView> {
        match self {
            AdminViewState::Backup(v) => Ok(v),
            other => Err(other.not_mounted(AdminView::Backup)),
        }
    }

    pub fn monitoring(&mut self) -> ApiResult<&mut MonitoringView> {
        match self {
            AdminViewState::Monitoring(v) => Ok(v),
            other => Err(other.not_mounted(AdminView::Monitoring)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: Duration = Duration::from_millis(20);
    const SETTLE: Duration = Duration::from_millis(80);

    #[actix_rt::test]
    async fn test_create_user_defaults() {
        let mut view = RbacView::new();
        let user = view
            .create_user(
                CreateUserRequest {
                    name: "Κώστας Ιωάννου".to_string(),
                    email: "k.ioannou@athens.gr".to_string(),
                    role: None,
                    municipality: "Δήμος Αθηναίων".to_string(),
                },
                BANNER,
            )
            .unwrap();

        assert_eq!(user.role, Role::Viewer);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(view.users().len(), 5);
        assert_eq!(view.snapshot()["banner"]["message"], "Χρήστης Δημιουργήθηκε!");

        tokio::time::sleep(SETTLE).await;
        assert!(view.snapshot()["banner"].is_null());
    }

    #[actix_rt::test]
    async fn test_create_user_requires_name_and_email() {
        let mut view = RbacView::new();
        let result = view.create_user(
            CreateUserRequest {
                name: String::new(),
                email: "x@y.gr".to_string(),
                role: Some(Role::Admin),
                municipality: String::new(),
            },
            BANNER,
        );
        assert!(matches!(result, Err(ApiError::ValidationError(_))));

        let blank = view.create_user(
            CreateUserRequest {
                name: "Ελένη".to_string(),
                email: "   ".to_string(),
                role: None,
                municipality: String::new(),
            },
            BANNER,
        );
        assert!(matches!(blank, Err(ApiError::ValidationError(_))));
        assert_eq!(view.users().len(), 4);
    }

    #[actix_rt::test]
    async fn test_created_users_get_distinct_ids() {
        let mut view = RbacView::new();
        let request = || CreateUserRequest {
            name: "Κώστας Ιωάννου".to_string(),
            email: "k.ioannou@athens.gr".to_string(),
            role: None,
            municipality: String::new(),
        };
        let first = view.create_user(request(), BANNER).unwrap();
        let second = view.create_user(request(), BANNER).unwrap();

        assert_eq!(first.id, "5");
        assert_eq!(second.id, "6");
        assert_eq!(view.toggle_status("6").unwrap(), UserStatus::Inactive);
        assert_eq!(view.users().iter().find(|u| u.id == "5").unwrap().status, UserStatus::Active);
    }

    #[actix_rt::test]
    async fn test_update_and_toggle() {
        let mut view = RbacView::new();
        let updated = view
            .update_user(
                "3",
                UpdateUserRequest {
                    role: Some(Role::Approver),
                    ..Default::default()
                },
                BANNER,
            )
            .unwrap();
        assert_eq!(updated.role, Role::Approver);
        assert_eq!(updated.name, "Νίκος Αλεξόπουλος");
        assert_eq!(view.snapshot()["banner"]["kind"], "updated");

        assert_eq!(view.toggle_status("3").unwrap(), UserStatus::Inactive);
        assert_eq!(view.toggle_status("3").unwrap(), UserStatus::Active);
        assert!(matches!(view.toggle_status("42"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_audit_export_follows_filter() {
        let mut view = AuditView::new();
        view.set_filter(AuditFilter {
            date: "2025-12-09".to_string(),
            ..Default::default()
        });
        let export = view.export().unwrap();
        let text = String::from_utf8(export.body).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Αυτόματο Backup"));
        assert!(!text.contains("Τροποποίηση ρόλου"));
    }

    #[actix_rt::test]
    async fn test_restore_defaults_to_latest() {
        let mut view = BackupView::new();
        let restored = view.restore(None, BANNER).unwrap();
        assert_eq!(restored.filename, "backup_full_20251209_030000.sql");
        assert_eq!(view.snapshot()["banner"]["message"], "Restore Ολοκληρώθηκε!");

        assert!(matches!(view.restore(Some("99"), BANNER), Err(ApiError::NotFound(_))));
        assert_eq!(view.restore(Some("2"), BANNER).unwrap().backup_type, BackupType::Incremental);
    }

    #[actix_rt::test]
    async fn test_backup_banner() {
        let mut view = BackupView::new();
        view.start_backup(
            BackupRequest {
                backup_type: BackupType::Full,
                source: BackupSource::All,
                destination: BackupDestination::Cloud,
            },
            BANNER,
        );
        assert_eq!(view.snapshot()["banner"]["kind"], "backup");
        tokio::time::sleep(SETTLE).await;
        assert!(view.snapshot()["banner"].is_null());
    }

    #[actix_rt::test]
    async fn test_monitoring_refresh_and_restart() {
        let mut view = MonitoringView::new();
        view.refresh(BANNER);
        assert_eq!(view.snapshot()["refreshing"], true);
        tokio::time::sleep(SETTLE).await;
        assert_eq!(view.snapshot()["refreshing"], false);

        assert_eq!(
            view.restart_service("Cache Service").unwrap(),
            "Επανεκκίνηση υπηρεσίας: Cache Service"
        );
        assert!(view.restart_service("Mail").is_err());
        assert_eq!(view.snapshot()["uptime"], "45d 12h 34m");
    }
}
