#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web host for the contamination study report.
//!
//! Serves the assembled HTML report at `/`, rebuilding it from the input
//! files on every request so a browser refresh is a full re-render. Not a
//! serving platform: one page, one health probe, no state.

mod handlers;

use std::path::PathBuf;

use actix_web::{App, HttpServer, middleware, web};

/// Shared application state.
pub struct AppState {
    /// Directory the four input files are read from on every render.
    pub data_dir: PathBuf,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_dir = std::env::var("DATA_DIR")
        .unwrap_or_else(|_| mercury_map_report::DEFAULT_DATA_DIR.to_owned());
    let state = web::Data::new(AppState {
        data_dir: PathBuf::from(data_dir),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting report host on {bind_addr}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/", web::get().to(handlers::report))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
