// src/auth_handlers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::dashboard::DashboardSnapshot;
use crate::error::ApiResult;
use crate::handlers::ApiResponse;
use crate::navigation::user_type_catalogue;
use crate::session::{current_session, lock_session, LoginRequest, SessionInfo};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub session: SessionInfo,
    pub dashboard: DashboardSnapshot,
}

pub async fn get_user_types() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(user_type_catalogue())))
}

pub async fn login(
    app_state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let user_type = request.check()?;

    let shared = app_state.sessions.create(user_type, &request.username);
    let response = {
        let session = lock_session(&shared);
        LoginResponse {
            session: session.info(),
            dashboard: session.dashboard.snapshot(),
        }
    };

    log::info!("{} '{}' logged in", user_type, response.session.username);

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        response,
        "Login successful".to_string(),
    )))
}

pub async fn get_session(req: HttpRequest) -> ApiResult<HttpResponse> {
    let shared = current_session(&req)?;
    let info = lock_session(&shared).info();
    Ok(HttpResponse::Ok().json(ApiResponse::success(info)))
}

pub async fn logout(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let shared = current_session(&req)?;
    let (id, username) = {
        let session = lock_session(&shared);
        (session.id, session.username.clone())
    };

    app_state.sessions.remove(&id);
    log::info!("'{}' logged out", username);

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        (),
        "Logged out successfully".to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_rt::test]
    async fn test_user_type_catalogue() {
        let app = init_app(test_state()).await;
        let req = test::TestRequest::get().uri("/auth/user-types").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let types = body["data"].as_array().unwrap();
        assert_eq!(types.len(), 4);
        assert_eq!(types[0]["id"], "employee");
        assert_eq!(types[1]["title"], "Πολίτης");
    }

    #[actix_rt::test]
    async fn test_login_errors_create_no_session() {
        let state = test_state();
        let app = init_app(state.clone()).await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "username": "maria", "password": "1234" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Παρακαλώ επιλέξτε τύπο χρήστη");

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "user_type": "citizen", "username": "", "password": "1234" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Παρακαλώ συμπληρώστε όλα τα πεδία");

        assert!(state.sessions.is_empty());
    }

    #[actix_rt::test]
    async fn test_login_returns_shell() {
        let app = init_app(test_state()).await;
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "user_type": "municipal", "username": "giorgos", "password": "x" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["session"]["user_type"], "municipal");
        assert_eq!(body["data"]["dashboard"]["current_view"], "home");
        assert_eq!(body["data"]["dashboard"]["header"]["title"], "efficiencity");
    }

    #[actix_rt::test]
    async fn test_logout_removes_session() {
        let state = test_state();
        let app = init_app(state.clone()).await;
        let token = login(&app, "admin").await;
        assert_eq!(state.sessions.len(), 1);

        let (status, _) = get(&app, &token, "/api/v1/session").await;
        assert_eq!(status, 200);

        let (status, _) = post(&app, &token, "/api/v1/session/logout", json!({})).await;
        assert_eq!(status, 200);
        assert!(state.sessions.is_empty());

        let (status, _) = get(&app, &token, "/api/v1/dashboard").await;
        assert_eq!(status, 401);
    }
}
