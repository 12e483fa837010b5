//! Charades Engine - Main entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charades_engine::config::EngineConfig;
use charades_engine::infrastructure::{
    blob_store::LocalBlobStore,
    clock::{SystemClock, SystemRandom},
    openai_compat::OpenAiCompatClient,
    ports::ClockPort,
    sqlite::{self, SqliteRepositories},
};
use charades_engine::{api, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charades_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Charades Engine");

    let config = EngineConfig::from_env()?;

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    tracing::info!(database_url = %config.database_url, "Opening database");
    let pool = sqlite::connect(&config.database_url).await?;
    sqlite::ensure_schema(&pool).await?;
    let repos = SqliteRepositories::new(pool, clock);

    if config.llm_api_key.is_none() {
        tracing::warn!("LLM_API_KEY is not set; completion requests will be sent without a key");
    }
    tracing::info!(
        base_url = %config.llm_base_url,
        model = %config.llm_model,
        timeout_secs = config.llm_timeout.as_secs(),
        "Completion client configured"
    );
    let llm = Arc::new(OpenAiCompatClient::new(
        &config.llm_base_url,
        &config.llm_model,
        config.llm_api_key.clone(),
        config.llm_timeout,
    ));

    let blobs = Arc::new(LocalBlobStore::new(&config.blob_dir, &config.blob_public_url));

    let app = Arc::new(App::new(
        repos.into(),
        llm,
        blobs,
        Arc::new(SystemRandom::new()),
        config.max_hint_chars,
    ));

    let mut router = api::http::routes().with_state(app);

    // Uploaded images are served from disk unless they live on another host.
    if config.blob_public_url.starts_with('/') && config.blob_public_url.len() > 1 {
        tracing::info!(
            dir = %config.blob_dir,
            path = %config.blob_public_url,
            "Serving uploaded images"
        );
        router = router.nest_service(&config.blob_public_url, ServeDir::new(&config.blob_dir));
    }

    let mut router = router.layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    tracing::info!("Listening on {}", config.server_addr);

    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        // JSON bodies trigger CORS preflights.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
