use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;

mod api;
mod config;
mod docs;
mod model;
mod report;
mod routes;
mod store;
mod utils;

use config::Config;
use store::TableAdapter;
use store::graph::GraphWorkbook;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Field Force Attendance"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let workbook = Arc::new(GraphWorkbook::new(config.graph()));
    let adapter = TableAdapter::new(
        workbook,
        Duration::from_secs(config.header_cache_ttl_secs),
    );

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    // Prime header shapes so first requests skip a round-trip
    let adapter_for_warmup = adapter.clone();
    let tables_for_warmup = config.all_tables();
    actix_web::rt::spawn(async move {
        store::warmup_headers(adapter_for_warmup, tables_for_warmup).await;
    });

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(adapter.clone()))
            .app_data(Data::new(config.clone()))
            .service(index)
            // Attendance + report routes with rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
