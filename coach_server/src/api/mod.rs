mod handlers;

use std::path::PathBuf;

use axum::{
    routing::{get, post},
    Router,
};
use coach_core::{get_default_catalog, Catalog, Config, GeneratorConfig};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: &'static Catalog,
    pub generator: GeneratorConfig,
    pub journal_path: PathBuf,
    pub bot_username: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            catalog: get_default_catalog(),
            generator: config.generator.clone(),
            journal_path: config.data.data_dir.join("workouts.jsonl"),
            bot_username: config.integrations.bot_username.clone(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/generate-workout", post(handlers::generate_workout))
        .route("/save-workout", post(handlers::save_workout))
        .route("/create-invoice", post(handlers::create_invoice))
        .route("/share-link", get(handlers::share_link));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
