// src/handlers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_httpauth::middleware::HttpAuthentication;
use serde::Serialize;

use crate::dashboard::DashboardState;
use crate::error::{ApiError, ApiResult};
use crate::reports::CsvExport;
use crate::session::{current_session, lock_session, session_middleware};
use crate::{admin_handlers, auth_handlers, citizen_handlers, employee_handlers, monitoring, municipal_handlers};

// ==================== COMMON STRUCTURES ====================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
        }
    }
}

// ==================== SESSION DASHBOARD ACCESS ====================

/// Runs `action` on the dashboard of the calling session.
pub fn with_dashboard<R>(
    req: &HttpRequest,
    action: impl FnOnce(&mut DashboardState) -> ApiResult<R>,
) -> ApiResult<R> {
    let shared = current_session(req)?;
    let mut session = lock_session(&shared);
    action(&mut session.dashboard)
}

/// Runs `action` and answers with a snapshot of the mounted view.
pub fn view_action(
    req: &HttpRequest,
    action: impl FnOnce(&mut DashboardState) -> ApiResult<()>,
) -> ApiResult<serde_json::Value> {
    with_dashboard(req, |dashboard| {
        action(dashboard)?;
        Ok(dashboard.shell().view_snapshot())
    })
}

/// JSON body limits, with rejections reported through the error envelope.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            log::debug!("Rejected JSON body: {}", err);
            ApiError::BadRequest(err.to_string()).into()
        })
}

pub fn csv_download(export: CsvExport) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", export.filename),
        ))
        .body(export.body)
}

// ==================== DASHBOARD SHELL ====================

pub async fn get_dashboard(req: HttpRequest) -> ApiResult<HttpResponse> {
    let snapshot = with_dashboard(&req, |dashboard| Ok(dashboard.snapshot()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

pub async fn select_view(req: HttpRequest, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let view = path.into_inner();
    let snapshot = with_dashboard(&req, |dashboard| {
        if dashboard.shell_mut().select_raw(&view)? {
            log::debug!("{} dashboard switched to '{}'", dashboard.user_type(), view);
        }
        Ok(dashboard.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

pub async fn toggle_menu(req: HttpRequest) -> ApiResult<HttpResponse> {
    let snapshot = with_dashboard(&req, |dashboard| {
        dashboard.shell_mut().toggle_menu();
        Ok(dashboard.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

pub async fn close_menu(req: HttpRequest) -> ApiResult<HttpResponse> {
    let snapshot = with_dashboard(&req, |dashboard| {
        dashboard.shell_mut().close_menu();
        Ok(dashboard.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

pub async fn get_view(req: HttpRequest) -> ApiResult<HttpResponse> {
    let view = view_action(&req, |_| Ok(()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

// ==================== ROUTES ====================

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let session_auth = HttpAuthentication::bearer(session_middleware);

    cfg
        // Health check and metrics (no auth)
        .service(
            web::scope("/health")
                .route("", web::get().to(|| async { HttpResponse::Ok().body("OK") }))
                .route("/status", web::get().to(monitoring::health_check))
                .route("/metrics", web::get().to(monitoring::metrics_endpoint)),
        )
        // Login (no session required)
        .service(
            web::scope("/auth")
                .route("/user-types", web::get().to(auth_handlers::get_user_types))
                .route("/login", web::post().to(auth_handlers::login)),
        )
        // Session-bound API
        .service(
            web::scope("/api/v1")
                .wrap(session_auth)
                .service(
                    web::scope("/session")
                        .route("", web::get().to(auth_handlers::get_session))
                        .route("/logout", web::post().to(auth_handlers::logout)),
                )
                .service(
                    web::scope("/dashboard")
                        .route("", web::get().to(get_dashboard))
                        .route("/views/{view}", web::post().to(select_view))
                        .route("/menu/toggle", web::post().to(toggle_menu))
                        .route("/menu/close", web::post().to(close_menu)),
                )
                .route("/view", web::get().to(get_view))
                .service(web::scope("/employee").configure(employee_handlers::configure))
                .service(web::scope("/citizen").configure(citizen_handlers::configure))
                .service(web::scope("/admin").configure(admin_handlers::configure))
                .service(web::scope("/municipal").configure(municipal_handlers::configure)),
        );
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_http::Request;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::config::Config;
    use crate::monitoring::Metrics;
    use crate::session::SessionStore;
    use crate::AppState;

    pub fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            sessions: Arc::new(SessionStore::new()),
            config: Config::default(),
        })
    }

    pub async fn init_app(
        state: Arc<AppState>,
    ) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
        test::init_service(
            App::new()
                .app_data(super::json_config(state.config.security.max_request_size))
                .app_data(web::Data::new(state))
                .app_data(web::Data::new(Metrics::new()))
                .configure(super::configure_routes),
        )
        .await
    }

    /// Logs in and returns the bearer header value.
    pub async fn login<S>(app: &S, user_type: &str) -> String
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "user_type": user_type, "username": "maria", "password": "1234" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(app, req).await;
        format!("Bearer {}", body["data"]["session"]["token"].as_str().unwrap())
    }

    pub async fn post<S>(app: &S, token: &str, uri: &str, body: Value) -> (u16, Value)
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(("Authorization", token.to_string()))
            .set_json(body)
            .to_request();
        read(app, req).await
    }

    pub async fn put<S>(app: &S, token: &str, uri: &str, body: Value) -> (u16, Value)
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = test::TestRequest::put()
            .uri(uri)
            .insert_header(("Authorization", token.to_string()))
            .set_json(body)
            .to_request();
        read(app, req).await
    }

    pub async fn get<S>(app: &S, token: &str, uri: &str) -> (u16, Value)
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", token.to_string()))
            .to_request();
        read(app, req).await
    }

    async fn read<S>(app: &S, req: Request) -> (u16, Value)
    where
        S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let resp = test::call_service(app, req).await;
        let status = resp.status().as_u16();
        let bytes = test::read_body(resp).await;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
