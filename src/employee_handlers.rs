// src/employee_handlers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::employee::ResourcesTab;
use crate::error::ApiResult;
use crate::filter::{BrowseFilter, RequestSearch, ResourceFilter};
use crate::forms::{RegistrationForm, RequestForm};
use crate::handlers::{csv_download, view_action, with_dashboard, ApiResponse};
use crate::models::{Decision, RequestStatus};
use crate::reports::{ExportFormat, ReportExport, ReportFilters};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub tab: ResourcesTab,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Registration
        .route("/register/form", web::put().to(update_registration_form))
        .route("/register/clear", web::post().to(clear_registration_form))
        .route("/register/submit", web::post().to(submit_registration))
        // Own resources
        .route("/my-resources/filters", web::put().to(filter_my_resources))
        // Other municipalities
        .route("/other-resources/tab", web::put().to(set_resources_tab))
        .route("/other-resources/browse-filters", web::put().to(filter_other_resources))
        .route("/other-resources/search", web::post().to(search_requestable))
        .route("/other-resources/select/{id}", web::post().to(select_requestable))
        .route("/other-resources/request-form", web::put().to(update_request_form))
        .route("/other-resources/submit", web::post().to(submit_resource_request))
        // Approvals
        .route("/approvals/{id}/details", web::post().to(toggle_request_details))
        .route("/approvals/{id}/approve", web::post().to(approve_request))
        .route("/approvals/{id}/reject", web::post().to(reject_request))
        // Reports
        .route("/reports/filters", web::put().to(set_report_filters))
        .route("/reports/generate", web::post().to(generate_report))
        .route("/reports/clear", web::post().to(clear_report))
        .route("/reports/export", web::post().to(export_report));
}

// ==================== REGISTRATION ====================

pub async fn update_registration_form(
    req: HttpRequest,
    form: web::Json<RegistrationForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let view = view_action(&req, |d| {
        d.employee()?.register()?.update_form(form);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn clear_registration_form(req: HttpRequest) -> ApiResult<HttpResponse> {
    let view = view_action(&req, |d| {
        d.employee()?.register()?.clear();
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn submit_registration(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let banner = app_state.config.timers.success_banner();
    let view = view_action(&req, |d| d.employee()?.register()?.submit(banner))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        view,
        "Επιτυχής Καταγραφή! Ο πόρος καταχωρήθηκε επιτυχώς στο σύστημα.".to_string(),
    )))
}

// ==================== MY RESOURCES ====================

pub async fn filter_my_resources(
    req: HttpRequest,
    filter: web::Json<ResourceFilter>,
) -> ApiResult<HttpResponse> {
    let filter = filter.into_inner();
    let view = view_action(&req, |d| {
        d.employee()?.my_resources()?.set_filter(filter);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

// ==================== OTHER MUNICIPALITIES ====================

pub async fn set_resources_tab(
    req: HttpRequest,
    body: web::Json<TabRequest>,
) -> ApiResult<HttpResponse> {
    let tab = body.tab;
    let view = view_action(&req, |d| {
        d.employee()?.other_resources()?.set_tab(tab);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn filter_other_resources(
    req: HttpRequest,
    filter: web::Json<BrowseFilter>,
) -> ApiResult<HttpResponse> {
    let filter = filter.into_inner();
    let view = view_action(&req, |d| {
        d.employee()?.other_resources()?.set_browse_filter(filter);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn search_requestable(
    req: HttpRequest,
    search: web::Json<RequestSearch>,
) -> ApiResult<HttpResponse> {
    let search = search.into_inner();
    let mut found = 0;
    let view = view_action(&req, |d| {
        found = d.employee()?.other_resources()?.search(search);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        view,
        format!("{} results", found),
    )))
}

pub async fn select_requestable(
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let view = view_action(&req, |d| d.employee()?.other_resources()?.select(&id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn update_request_form(
    req: HttpRequest,
    form: web::Json<RequestForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let view = view_action(&req, |d| {
        d.employee()?.other_resources()?.update_form(form);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn submit_resource_request(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let banner = app_state.config.timers.success_banner();
    let (request, view) = with_dashboard(&req, |d| {
        let request = d.employee()?.other_resources()?.submit(banner)?;
        Ok((request, d.shell().view_snapshot()))
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        json!({ "request": request, "view": view }),
        "Αίτηση Υποβλήθηκε! Η αίτησή σας καταχωρήθηκε στο σύστημα με κατάσταση \"Σε αναμονή έγκρισης\"."
            .to_string(),
    )))
}

// ==================== APPROVALS ====================

pub async fn toggle_request_details(
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let view = view_action(&req, |d| {
        d.employee()?.approvals()?.toggle_details(&id)?;
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn approve_request(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    decide_request(&app_state, &req, &path.into_inner(), Decision::Approve)
}

pub async fn reject_request(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    decide_request(&app_state, &req, &path.into_inner(), Decision::Reject)
}

fn decide_request(
    app_state: &AppState,
    req: &HttpRequest,
    id: &str,
    decision: Decision,
) -> ApiResult<HttpResponse> {
    let banner = app_state.config.timers.success_banner();
    let (status, view) = with_dashboard(req, |d| {
        let status = d.employee()?.approvals()?.decide(id, decision, banner)?;
        Ok((status, d.shell().view_snapshot()))
    })?;

    let message = match status {
        RequestStatus::Rejected => "Αίτηση Απορρίφθηκε. Στάλθηκε ειδοποίηση απόρριψης στον αιτούντα.",
        _ => "Αίτηση Εγκρίθηκε! Τα αποθέματα ενημερώθηκαν και στάλθηκε ειδοποίηση στον αιτούντα.",
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(view, message.to_string())))
}

// ==================== REPORTS ====================

pub async fn set_report_filters(
    req: HttpRequest,
    filters: web::Json<ReportFilters>,
) -> ApiResult<HttpResponse> {
    let filters = filters.into_inner();
    let view = view_action(&req, |d| {
        d.employee()?.reports()?.set_filters(filters);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn generate_report(req: HttpRequest) -> ApiResult<HttpResponse> {
    let view = view_action(&req, |d| {
        d.employee()?.reports()?.generate();
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        view,
        "Η αναφορά δημιουργήθηκε επιτυχώς!".to_string(),
    )))
}

pub async fn clear_report(req: HttpRequest) -> ApiResult<HttpResponse> {
    let view = view_action(&req, |d| {
        d.employee()?.reports()?.clear();
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn export_report(
    req: HttpRequest,
    body: web::Json<ExportRequest>,
) -> ApiResult<HttpResponse> {
    let format = body.format;
    let export = with_dashboard(&req, |d| d.employee()?.reports()?.export(format))?;

    Ok(match export {
        ReportExport::Csv(csv) => csv_download(csv),
        ReportExport::Acknowledged(message) => {
            HttpResponse::Ok().json(ApiResponse::success_with_message(format, message))
        }
    })
}
