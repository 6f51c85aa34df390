use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::{Compress, DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Module declarations
mod admin;
mod admin_handlers;
mod auth_handlers;
mod citizen;
mod citizen_handlers;
mod config;
mod dashboard;
mod employee;
mod employee_handlers;
mod error;
mod filter;
mod forms;
mod handlers;
mod models;
mod monitoring;
mod municipal;
mod municipal_handlers;
mod navigation;
mod reports;
mod seed;
mod session;
mod transient;
mod workflow;

use config::{load_config, Config};
use monitoring::{start_maintenance_tasks, Metrics, RequestLogger};
use session::SessionStore;

pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}

// ==================== MAIN ====================

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (this calls load_env_file internally)
    let config = load_config()?;

    setup_logging(&config)?;

    if config.is_production() {
        validate_production_config(&config)?;
    }

    config.print_startup_info();

    let sessions = Arc::new(SessionStore::new());
    start_maintenance_tasks(sessions.clone(), config.session.clone());

    let app_state = Arc::new(AppState {
        sessions,
        config: config.clone(),
    });

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Starting server at http://{}", bind_address);

    let metrics_arc = Arc::new(Metrics::new());
    let metrics = web::Data::from(metrics_arc.clone());

    let server_config = config.server.clone();
    let production = config.is_production();

    let mut server = HttpServer::new(move || {
        let cors = setup_cors(&config.security.allowed_origins, production);

        App::new()
            .wrap(cors)
            .wrap(setup_security_headers())
            .wrap(Logger::default())
            .wrap(Compress::default())
            .wrap(RequestLogger::new(metrics_arc.clone()))
            .app_data(handlers::json_config(config.security.max_request_size))
            .app_data(web::Data::new(app_state.clone()))
            .app_data(metrics.clone())
            .configure(handlers::configure_routes)
    })
    .keep_alive(Duration::from_secs(server_config.keep_alive))
    .client_request_timeout(Duration::from_secs(server_config.client_timeout))
    .client_disconnect_timeout(Duration::from_secs(server_config.client_shutdown));

    if let Some(workers) = server_config.workers {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server failed to run")?;

    Ok(())
}

// ==================== HELPER FUNCTIONS ====================

pub fn setup_cors(allowed_origins: &[String], production: bool) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::USER_AGENT,
            header::REFERER,
        ])
        .expose_headers(vec![header::CONTENT_LENGTH, header::CONTENT_DISPOSITION])
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") && !production {
        log::warn!("⚠️  Using wildcard CORS (*) in development mode");
        return cors.allow_any_origin().allow_any_header().allow_any_method();
    }

    for origin in allowed_origins.iter().filter(|o| !o.is_empty() && o.as_str() != "*") {
        log::debug!("Adding CORS origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }
    cors
}

fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

fn validate_production_config(config: &Config) -> anyhow::Result<()> {
    if config.security.allowed_origins.iter().any(|o| o == "*") {
        anyhow::bail!("Wildcard CORS origins not allowed in production!");
    }

    if config.session.idle_minutes > 24 * 60 {
        anyhow::bail!("Session idle timeout above one day is not allowed in production");
    }

    Ok(())
}

fn setup_security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("X-XSS-Protection", "1; mode=block"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
}
