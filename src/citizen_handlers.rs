// src/citizen_handlers.rs
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::ApiResult;
use crate::filter::CitizenSearch;
use crate::handlers::{view_action, ApiResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/search/filters", web::put().to(set_search_filters))
        .route("/search/run", web::post().to(run_search));
}

pub async fn set_search_filters(
    req: HttpRequest,
    search: web::Json<CitizenSearch>,
) -> ApiResult<HttpResponse> {
    let search = search.into_inner();
    let view = view_action(&req, |d| {
        d.citizen()?.search()?.set_filters(search);
        Ok(())
    })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn run_search(req: HttpRequest) -> ApiResult<HttpResponse> {
    let mut found = 0;
    let view = view_action(&req, |d| {
        found = d.citizen()?.search()?.run().len();
        Ok(())
    })?;
    log::debug!("Citizen search returned {} resources", found);
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}
