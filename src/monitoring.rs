// src/monitoring.rs
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::sync::{Arc, atomic::{AtomicU64, Ordering}};
use std::time::Instant;
use chrono::{DateTime, Utc};
use tokio::time::{interval, Duration};

use crate::AppState;
use crate::config::SessionConfig;
use crate::session::SessionStore;

#[derive(Debug, Clone)]
pub struct Metrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
    pub response_times: Arc<std::sync::Mutex<Vec<u64>>>,
    started_at: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
            response_times: Arc::new(std::sync::Mutex::new(Vec::new())),
            started_at: Instant::now(),
        }
    }

    pub fn increment_requests(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_errors(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_response_time(&self, time_ms: u64) {
        if let Ok(mut times) = self.response_times.lock() {
            times.push(time_ms);
            if times.len() > 1000 {
                times.remove(0);
            }
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    fn avg_response_time(&self) -> f64 {
        match self.response_times.lock() {
            Ok(times) if !times.is_empty() => times.iter().sum::<u64>() as f64 / times.len() as f64,
            _ => 0.0,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub requests_total: u64,
    pub errors_total: u64,
    pub avg_response_time_ms: f64,
    pub active_sessions: usize,
}

pub async fn health_check(metrics: web::Data<Metrics>) -> HttpResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: metrics.uptime_seconds(),
    };

    HttpResponse::Ok().json(response)
}

pub async fn metrics_endpoint(
    metrics: web::Data<Metrics>,
    app_state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    let response = MetricsResponse {
        requests_total: metrics.request_count.load(Ordering::Relaxed),
        errors_total: metrics.error_count.load(Ordering::Relaxed),
        avg_response_time_ms: metrics.avg_response_time(),
        active_sessions: app_state.sessions.len(),
    };

    HttpResponse::Ok().json(response)
}

pub struct RequestLogger {
    metrics: Arc<Metrics>,
}

impl RequestLogger {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }
}

impl<S, B> actix_web::dev::Transform<S, actix_web::dev::ServiceRequest> for RequestLogger
where
    S: actix_web::dev::Service<
        actix_web::dev::ServiceRequest,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    S::Future: 'static,
    B: 'static,
{
    type Response = actix_web::dev::ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(RequestLoggerMiddleware {
            service,
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
    metrics: Arc<Metrics>,
}

impl<S, B> actix_web::dev::Service<actix_web::dev::ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: actix_web::dev::Service<
        actix_web::dev::ServiceRequest,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    S::Future: 'static,
    B: 'static,
{
    type Response = actix_web::dev::ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: actix_web::dev::ServiceRequest) -> Self::Future {
        let start_time = std::time::Instant::now();
        let metrics = self.metrics.clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            metrics.increment_requests();
            let res = fut.await;
            let elapsed = start_time.elapsed().as_millis() as u64;
            metrics.record_response_time(elapsed);

            match res {
                Ok(ref response) if response.status().is_client_error() || response.status().is_server_error() => {
                    metrics.increment_errors();
                }
                Err(_) => metrics.increment_errors(),
                _ => {}
            }
            res
        })
    }
}

pub fn start_maintenance_tasks(sessions: Arc<SessionStore>, config: SessionConfig) {
    tokio::spawn(async move {
        sweep_idle_sessions(sessions, config).await;
    });
}

async fn sweep_idle_sessions(sessions: Arc<SessionStore>, config: SessionConfig) {
    let mut interval = interval(Duration::from_secs(config.sweep_interval_seconds));
    let idle = config.idle_timeout();

    loop {
        interval.tick().await;
        let removed = sessions.sweep(idle);
        if removed > 0 {
            log::info!("Removed {} idle session(s), {} still active", removed, sessions.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_rt::test]
    async fn test_response_time_window() {
        let metrics = Metrics::new();
        assert_eq!(metrics.avg_response_time(), 0.0);

        for ms in 0..1005 {
            metrics.record_response_time(ms);
        }
        let times = metrics.response_times.lock().unwrap();
        assert_eq!(times.len(), 1000);
        assert_eq!(times[0], 5);
    }

    #[actix_rt::test]
    async fn test_request_logger_counts_errors() {
        let metrics = Arc::new(Metrics::new());
        let app = test::init_service(
            App::new()
                .wrap(RequestLogger::new(metrics.clone()))
                .route("/ok", actix_web::web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        test::call_service(&app, test::TestRequest::get().uri("/ok").to_request()).await;
        test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;

        assert_eq!(metrics.request_count.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.error_count.load(Ordering::Relaxed), 1);
    }
}
