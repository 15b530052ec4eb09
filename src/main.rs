use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reelpick::{
    config::Config,
    models::PreferenceVector,
    services::{HttpBackend, RequestBuilder, Session},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let backend = Arc::new(HttpBackend::new(&config)?);
    let session = Session::new(backend, config.catalog_per_page);

    let health = session.check_health().await?;
    if health.is_healthy() {
        let movies = health
            .dataset_stats
            .as_ref()
            .map(|stats| stats.movies)
            .unwrap_or(0);
        tracing::info!(movies, "Recommendation service ready");
    } else {
        tracing::warn!(status = %health.status, "Recommendation service not ready");
    }

    // Demo run: neutral preferences, default count
    let preferences = PreferenceVector::normalize_raw([]);
    let builder = RequestBuilder::new(preferences);
    let recommendations = session.submit(builder).await?;

    for (rank, item) in recommendations.iter().enumerate() {
        println!(
            "{:2}. {} ({:.1})",
            rank + 1,
            item.title,
            item.display_score().value()
        );
    }

    Ok(())
}
