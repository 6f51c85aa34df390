// src/admin_handlers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use std::sync::Arc;

use crate::admin::{BackupBanner, BackupRequest, CreateUserRequest, RbacBanner, RestoreRequest, UpdateUserRequest};
use crate::error::ApiResult;
use crate::filter::AuditFilter;
use crate::handlers::{csv_download, view_action, with_dashboard, ApiResponse};
use crate::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // RBAC
        .route("/rbac/users", web::get().to(get_users))
        .route("/rbac/users", web::post().to(create_user))
        .route("/rbac/users/{id}", web::put().to(update_user))
        .route("/rbac/users/{id}/toggle-status", web::post().to(toggle_user_status))
        // Audit log
        .route("/audit/filters", web::put().to(set_audit_filters))
        .route("/audit/export", web::get().to(export_audit_log))
        // Backup / restore
        .route("/backup/start", web::post().to(start_backup))
        .route("/backup/restore", web::post().to(restore_backup))
        .route("/backup/backups/{id}/download", web::get().to(download_backup))
        // Monitoring
        .route("/monitoring/refresh", web::post().to(refresh_monitoring))
        .route("/monitoring/services/{name}/restart", web::post().to(restart_service));
}

// ==================== RBAC ====================

pub async fn get_users(req: HttpRequest) -> ApiResult<HttpResponse> {
    let users = with_dashboard(&req, |d| Ok(d.admin()?.rbac()?.users().to_vec()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

pub async fn create_user(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let banner = app_state.config.timers.success_banner();
    let request = request.into_inner();
    let (user, view) = with_dashboard(&req, |d| {
        let user = d.admin()?.rbac()?.create_user(request, banner)?;
        Ok((user, d.shell().view_snapshot()))
    })?;

    log::info!("Created mock user {} ({})", user.id, user.email);
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        json!({ "user": user, "view": view }),
        RbacBanner::Created.message().to_string(),
    )))
}

pub async fn update_user(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let banner = app_state.config.timers.success_banner();
    let id = path.into_inner();
    let request = request.into_inner();
    let (user, view) = with_dashboard(&req, |d| {
        let user = d.admin()?.rbac()?.update_user(&id, request, banner)?;
        Ok((user, d.shell().view_snapshot()))
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        json!({ "user": user, "view": view }),
        RbacBanner::Updated.message().to_string(),
    )))
}

pub async fn toggle_user_status(
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let view = view_action(&req, |d| {
        d.admin()?.rbac()?.toggle_status(&id)?;
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

// ==================== AUDIT LOG ====================

pub async fn set_audit_filters(
    req: HttpRequest,
    filter: web::Json<AuditFilter>,
) -> ApiResult<HttpResponse> {
    let filter = filter.into_inner();
    let view = view_action(&req, |d| {
        d.admin()?.audit()?.set_filter(filter);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn export_audit_log(req: HttpRequest) -> ApiResult<HttpResponse> {
    let export = with_dashboard(&req, |d| d.admin()?.audit()?.export())?;
    Ok(csv_download(export))
}

// ==================== BACKUP / RESTORE ====================

pub async fn start_backup(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<BackupRequest>,
) -> ApiResult<HttpResponse> {
    let banner = app_state.config.timers.backup_banner();
    let request = request.into_inner();
    let view = view_action(&req, |d| {
        d.admin()?.backup()?.start_backup(request, banner);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        view,
        BackupBanner::Backup.message().to_string(),
    )))
}

pub async fn restore_backup(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<RestoreRequest>,
) -> ApiResult<HttpResponse> {
    let banner = app_state.config.timers.backup_banner();
    let request = request.into_inner();
    let (backup, view) = with_dashboard(&req, |d| {
        let backup = d.admin()?.backup()?.restore(request.backup_id.as_deref(), banner)?;
        Ok((backup, d.shell().view_snapshot()))
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        json!({ "backup": backup, "view": view }),
        BackupBanner::Restore.message().to_string(),
    )))
}

pub async fn download_backup(
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let backup = with_dashboard(&req, |d| d.admin()?.backup()?.download(&id))?;
    let message = format!("Download backup: {}", backup.filename);
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(backup, message)))
}

// ==================== MONITORING ====================

pub async fn refresh_monitoring(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let after = app_state.config.timers.refresh();
    let view = view_action(&req, |d| {
        d.admin()?.monitoring()?.refresh(after);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn restart_service(
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = path.into_inner();
    let message = with_dashboard(&req, |d| d.admin()?.monitoring()?.restart_service(&name))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(name, message)))
}
