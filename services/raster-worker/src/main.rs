//! Rasterization worker service.
//!
//! Accepts composed SVG markup over HTTP and returns rendered PNG bitmaps.
//! Fonts are loaded once at startup; rendering runs on blocking threads.

use anyhow::Result;
use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::Response,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use usvg::fontdb;

use raster_worker::rasterize;

#[derive(Parser, Debug)]
#[command(name = "raster-worker")]
#[command(about = "SVG rasterization worker")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8081")]
    listen: String,

    /// Directory of font files to load at startup
    #[arg(long, env = "FONT_DIR")]
    font_dir: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let fonts = Arc::new(rasterize::load_fonts(args.font_dir.as_deref()));
    info!(faces = fonts.len(), "Starting raster worker");

    let app = Router::new()
        .route("/render", post(render_handler))
        .route("/health", get(health_handler))
        .layer(Extension(fonts))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn render_handler(
    Extension(fonts): Extension<Arc<fontdb::Database>>,
    body: Bytes,
) -> Response {
    let result = tokio::task::spawn_blocking(move || rasterize::svg_to_png(&body, &fonts)).await;

    match result {
        Ok(Ok(png)) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "image/png")
            .body(png.into())
            .unwrap(),
        Ok(Err(e)) => {
            error!(error = %e, "Rasterization failed");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(e.to_string().into())
                .unwrap()
        }
        Err(e) => {
            error!(error = %e, "Rasterization task panicked");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body("rasterization task failed".into())
                .unwrap()
        }
    }
}

async fn health_handler() -> &'static str {
    "OK"
}
