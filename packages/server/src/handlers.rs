//! HTTP handlers for the report host.

use actix_web::{HttpResponse, web};

use crate::AppState;

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "healthy": true,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /`
///
/// Rebuilds the report from the current input files. Section failures are
/// already rendered as banners inside the page, so this always answers 200
/// with whatever content survived.
pub async fn report(state: web::Data<AppState>) -> HttpResponse {
    let report = mercury_map_report::build(&state.data_dir);
    let page = mercury_map_report::html::render(&report);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}
