use std::sync::Arc;

use anyhow::Context;
use reqwest::Client as HttpClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reel_api::{
    api::{create_router, AppState},
    cache::{create_redis_client, Cache, CacheWriterHandle},
    config::Config,
    services::{
        artifacts::ensure_artifact, Dataset, NoopPosterProvider, PosterProvider, PosterSettings,
        TmdbPosterProvider,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reel_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let http_client = HttpClient::new();

    // Fetch artifacts that are not on disk yet, then load them once
    ensure_artifact(&http_client, &config.movies_path, config.movies_url.as_deref()).await?;
    ensure_artifact(
        &http_client,
        &config.similarity_path,
        config.similarity_url.as_deref(),
    )
    .await?;

    let movies_path = config.movies_path.clone();
    let similarity_path = config.similarity_path.clone();
    let dataset = tokio::task::spawn_blocking(move || Dataset::load(&movies_path, &similarity_path))
        .await
        .context("Dataset loading task failed")??;

    let (poster_provider, cache_handle) = build_poster_provider(&config, http_client)?;
    tracing::info!(provider = poster_provider.name(), "Poster provider ready");

    let state = AppState::new(
        Arc::new(dataset),
        poster_provider,
        PosterSettings {
            timeout: config.poster_timeout(),
            concurrency: config.poster_concurrency,
        },
        config.recommendation_count,
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

/// TMDB when an API key is configured, otherwise a provider with no posters
fn build_poster_provider(
    config: &Config,
    http_client: HttpClient,
) -> anyhow::Result<(Arc<dyn PosterProvider>, Option<CacheWriterHandle>)> {
    let api_key = match config.tmdb_api_key.as_deref() {
        Some(key) if config.posters_enabled() => key.to_string(),
        _ => {
            tracing::warn!("TMDB_API_KEY not set, recommendations will have no posters");
            let provider: Arc<dyn PosterProvider> = Arc::new(NoopPosterProvider);
            return Ok((provider, None));
        }
    };

    let (cache, handle) = Cache::new(create_redis_client(&config.redis_url)?);
    let provider: Arc<dyn PosterProvider> = Arc::new(TmdbPosterProvider::new(
        http_client,
        cache,
        api_key,
        config.tmdb_api_url.clone(),
        config.tmdb_image_base_url.clone(),
    ));

    Ok((provider, Some(handle)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
