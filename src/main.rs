//! Main entry point of the application.
//! Loads the form schema, then starts the Axum web server serving the upload form.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use dotenv::dotenv;
use log::info;

use uploaded_image::backend::{models::AppState, router::get_router};
use uploaded_image::config::{self, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = Settings::from_env()?;
    let schema = config::load_schema(&settings.schema_path)?;

    let state = Arc::new(AppState {
        schema,
        uploads_dir: settings.uploads_dir,
    });
    let app = get_router(state);

    // Start the web server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.http_port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to open web server listener")?;

    axum::serve(listener, app)
        .await
        .context("Failed to bind Axum to listener")?;

    Ok(())
}
