// src/municipal_handlers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::forms::BorrowForm;
use crate::handlers::{view_action, with_dashboard, ApiResponse};
use crate::models::Decision;
use crate::workflow::StatusFilter;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DirectorySearch {
    pub search: String,
}

#[derive(Debug, Deserialize)]
pub struct LendFilterRequest {
    pub filter: StatusFilter,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/back", web::post().to(go_back))
        .route("/directory/search", web::put().to(search_directory))
        .route("/borrow/form", web::put().to(update_borrow_form))
        .route("/borrow/submit", web::post().to(submit_borrow_request))
        .route("/lend/filter", web::put().to(set_lend_filter))
        .route("/lend/{id}/approve", web::post().to(approve_lend_request))
        .route("/lend/{id}/reject", web::post().to(reject_lend_request));
}

pub async fn go_back(req: HttpRequest) -> ApiResult<HttpResponse> {
    let snapshot = with_dashboard(&req, |d| {
        d.municipal_back()?;
        Ok(d.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

pub async fn search_directory(
    req: HttpRequest,
    body: web::Json<DirectorySearch>,
) -> ApiResult<HttpResponse> {
    let term = body.into_inner().search;
    let view = view_action(&req, |d| {
        d.municipal()?.mounted_mut().directory()?.set_search(term);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn update_borrow_form(
    req: HttpRequest,
    form: web::Json<BorrowForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let view = view_action(&req, |d| {
        d.municipal()?.mounted_mut().borrow()?.update_form(form);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn submit_borrow_request(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let banner = app_state.config.timers.success_banner();
    let (reference, view) = with_dashboard(&req, |d| {
        let reference = d.municipal()?.mounted_mut().borrow()?.submit(banner)?;
        Ok((reference, d.shell().view_snapshot()))
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        json!({ "reference": reference, "view": view }),
        format!("Το Αίτημα Υποβλήθηκε Επιτυχώς! Αριθμός Αναφοράς: {}", reference),
    )))
}

pub async fn set_lend_filter(
    req: HttpRequest,
    body: web::Json<LendFilterRequest>,
) -> ApiResult<HttpResponse> {
    let filter = body.filter;
    let view = view_action(&req, |d| {
        d.municipal()?.mounted_mut().lend()?.set_filter(filter);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn approve_lend_request(
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    decide_lend_request(&req, &path.into_inner(), Decision::Approve)
}

pub async fn reject_lend_request(
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    decide_lend_request(&req, &path.into_inner(), Decision::Reject)
}

fn decide_lend_request(req: &HttpRequest, raw_id: &str, decision: Decision) -> ApiResult<HttpResponse> {
    let id: u32 = raw_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid lend request id '{}'", raw_id)))?;

    let (status, view) = with_dashboard(req, |d| {
        let status = d.municipal()?.mounted_mut().lend()?.decide(id, decision)?;
        Ok((status, d.shell().view_snapshot()))
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        view,
        status.label().to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use serde_json::json;

    #[actix_rt::test]
    async fn test_borrow_flow_and_back() {
        let app = init_app(test_state()).await;
        let token = login(&app, "municipal").await;
        post(&app, &token, "/api/v1/dashboard/views/borrow", json!({})).await;

        let (status, _) = post(&app, &token, "/api/v1/municipal/borrow/submit", json!({})).await;
        assert_eq!(status, 422);

        put(
            &app,
            &token,
            "/api/v1/municipal/borrow/form",
            json!({
                "municipality": "Δήμος Πατρών",
                "resource": "Μικρά Οχήματα",
                "quantity": "2",
                "start_date": "2025-12-15",
                "end_date": "2025-12-20",
                "reason": "Καθαρισμός παραλίας"
            }),
        )
        .await;
        let (status, body) = post(&app, &token, "/api/v1/municipal/borrow/submit", json!({})).await;
        assert_eq!(status, 200);
        assert!(body["data"]["reference"].as_str().unwrap().starts_with("#BR-"));

        let (status, body) = post(&app, &token, "/api/v1/municipal/back", json!({})).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["current_view"], "home");
    }

    #[actix_rt::test]
    async fn test_lend_queue() {
        let app = init_app(test_state()).await;
        let token = login(&app, "municipal").await;
        post(&app, &token, "/api/v1/dashboard/views/lend", json!({})).await;

        let (status, body) = post(&app, &token, "/api/v1/municipal/lend/1/approve", json!({})).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["state"]["counts"]["approved"], 2);

        let (status, _) = post(&app, &token, "/api/v1/municipal/lend/1/reject", json!({})).await;
        assert_eq!(status, 409);

        let (status, _) = post(&app, &token, "/api/v1/municipal/lend/abc/reject", json!({})).await;
        assert_eq!(status, 400);

        let (_, view) = put(&app, &token, "/api/v1/municipal/lend/filter", json!({ "filter": "pending" })).await;
        assert_eq!(view["data"]["state"]["requests"].as_array().unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_directory_search() {
        let app = init_app(test_state()).await;
        let token = login(&app, "municipal").await;
        post(&app, &token, "/api/v1/dashboard/views/other-municipalities", json!({})).await;

        let (_, view) = put(&app, &token, "/api/v1/municipal/directory/search", json!({ "search": "ΠΑΤΡ" })).await;
        assert_eq!(view["data"]["state"]["municipalities"].as_array().unwrap().len(), 1);
        assert_eq!(view["data"]["state"]["municipality_count"], 5);
    }
}
