use sea_orm::Database;
use tracing::info;

use pilah_waste::config::WasteConfig;
use pilah_waste::infra::classifier::GeminiClassifier;
use pilah_waste::infra::dispatch::{
    ClassificationDispatcher, DispatchConfig, spawn_reclaim_sweep,
};
use pilah_waste::infra::storage::LocalImageStore;
use pilah_waste::router::build_router;
use pilah_waste::state::AppState;

#[tokio::main]
async fn main() {
    pilah_core::tracing::init_tracing();

    let config = WasteConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let store = LocalImageStore::new(config.upload_dir.clone())
        .await
        .expect("failed to prepare upload dir");

    let classifier = GeminiClassifier::new(config.gemini_api_key.clone(), config.gemini_model.clone());

    let dispatcher = ClassificationDispatcher::new(DispatchConfig {
        max_concurrent: config.max_concurrent_classifications,
        call_timeout: config.classify_timeout,
        max_attempts: config.classify_max_attempts,
    });

    let state = AppState {
        db,
        store,
        classifier,
        dispatcher,
    };

    // Background sweep that fails Processing rows whose worker died.
    spawn_reclaim_sweep(
        state.image_repo(),
        config.reclaim_interval,
        config.stale_processing,
    );

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.waste_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("waste service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
