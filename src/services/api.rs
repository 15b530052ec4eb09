/// Remote recommendation/catalog service client
///
/// The service exposes four endpoints the engine consumes:
/// POST /recommend, GET /movies/browse, GET /genres, GET /health.
/// The trait keeps the transport swappable so the session logic can be
/// exercised against a stub.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{CatalogPage, HealthReport, RecommendationRequest, ScoredItem},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Submits a recommendation request and returns the scored results
    async fn recommend(&self, request: &RecommendationRequest) -> AppResult<Vec<ScoredItem>>;

    /// Fetches one catalog page for the given query parameters
    async fn browse(&self, params: &[(String, String)]) -> AppResult<CatalogPage>;

    /// Lists the genres available for catalog filtering
    async fn genres(&self) -> AppResult<Vec<String>>;

    /// Queries service health and dataset statistics
    async fn health(&self) -> AppResult<HealthReport>;
}

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Parses a 2xx body from POST /recommend.
///
/// The service can return a logical error as `{"detail": ...}` with a
/// success status; that surfaces as a transport error. A body without a
/// `recommendations` array is a schema error, never an empty result.
fn parse_recommend_body(status: u16, body: &str) -> AppResult<Vec<ScoredItem>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::Schema(format!("recommend response is not JSON: {}", e)))?;

    if let Some(detail) = value.get("detail").and_then(Value::as_str) {
        return Err(AppError::Transport {
            status,
            message: detail.to_string(),
        });
    }

    #[derive(Deserialize)]
    struct RecommendResponse {
        recommendations: Vec<ScoredItem>,
    }

    let parsed: RecommendResponse = serde_json::from_value(value)
        .map_err(|e| AppError::Schema(format!("malformed recommend response: {}", e)))?;

    Ok(parsed.recommendations)
}

/// Parses a 2xx body from GET /movies/browse, treating a JSON `error`
/// field as a logical failure
fn parse_browse_body(status: u16, body: &str) -> AppResult<CatalogPage> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::Schema(format!("browse response is not JSON: {}", e)))?;

    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Err(AppError::Transport {
            status,
            message: error.to_string(),
        });
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::Schema(format!("malformed browse response: {}", e)))
}

async fn error_from_response(response: reqwest::Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::transport(status, &body)
}

#[async_trait]
impl RecommendationBackend for HttpBackend {
    async fn recommend(&self, request: &RecommendationRequest) -> AppResult<Vec<ScoredItem>> {
        let url = format!("{}/recommend", self.base_url);
        let response = self.http_client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let status = response.status().as_u16();
        let body = response.text().await?;
        let recommendations = parse_recommend_body(status, &body)?;

        tracing::info!(
            requested = request.num_recommendations,
            results = recommendations.len(),
            "Recommendations fetched"
        );

        Ok(recommendations)
    }

    async fn browse(&self, params: &[(String, String)]) -> AppResult<CatalogPage> {
        let url = format!("{}/movies/browse", self.base_url);
        let response = self.http_client.get(&url).query(params).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let status = response.status().as_u16();
        let body = response.text().await?;
        let page = parse_browse_body(status, &body)?;

        tracing::info!(
            page = page.pagination.page,
            total_pages = page.pagination.total_pages,
            movies = page.movies.len(),
            "Catalog page fetched"
        );

        Ok(page)
    }

    async fn genres(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/genres", self.base_url);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        #[derive(Deserialize)]
        struct GenresResponse {
            genres: Vec<String>,
        }

        let body = response.text().await?;
        let parsed: GenresResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Schema(format!("malformed genres response: {}", e)))?;

        Ok(parsed.genres)
    }

    async fn health(&self) -> AppResult<HealthReport> {
        let url = format!("{}/health", self.base_url);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::Schema(format!("malformed health response: {}", e)))
    }
}
