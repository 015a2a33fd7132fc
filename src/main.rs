use crate::config::WikiConfig;
use crate::database::{open_repository, PageRepository};
use crate::render::Templates;
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub mod config;
mod database;
mod domain;
mod error;
mod features;
mod logging;
mod render;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PageRepository>,
    pub templates: Arc<Templates>,
    pub config: Arc<WikiConfig>,
}

/// Composes the wiki routes with the static asset service under `/new/`.
pub fn build_app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(features::pages::pages_router())
        .nest_service("/new", static_files)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    let config = WikiConfig::from_env()?;
    logging::init_logging(config.log_level)?;

    let store = open_repository(&config).await?;
    let templates = Templates::load(&config.template_dir)?;

    let bind_addr = config.bind_addr;
    let app_state = AppState {
        store,
        templates: Arc::new(templates),
        config: Arc::new(config),
    };

    let app = build_app(app_state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
