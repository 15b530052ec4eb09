use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogSnapshot, HealthReport, ScoredItem},
    services::{
        api::RecommendationBackend,
        catalog::CatalogQueryState,
        request::RequestBuilder,
        sorter::{self, SortKey},
    },
};

/// Client session owning the mutable engine state: current
/// recommendations, the last catalog snapshot, and the in-flight flag
/// guarding recommendation submission.
///
/// Everything lives behind one lock, held only across state mutation and
/// never across a backend call.
#[derive(Clone)]
pub struct Session {
    backend: Arc<dyn RecommendationBackend>,
    inner: Arc<RwLock<SessionInner>>,
}

struct SessionInner {
    recommendations: Vec<ScoredItem>,
    catalog: CatalogQueryState,
    last_catalog_page: Option<CatalogSnapshot>,
    loading: bool,
}

impl Session {
    pub fn new(backend: Arc<dyn RecommendationBackend>, catalog_per_page: u32) -> Self {
        Self {
            backend,
            inner: Arc::new(RwLock::new(SessionInner {
                recommendations: Vec::new(),
                catalog: CatalogQueryState::new(catalog_per_page),
                last_catalog_page: None,
                loading: false,
            })),
        }
    }

    /// Builds and submits a recommendation request.
    ///
    /// A submission while another is outstanding is rejected outright;
    /// there is no queuing and the in-flight call is not cancelled.
    /// Validation failures never reach the network.
    pub async fn submit(&self, builder: RequestBuilder) -> AppResult<Vec<ScoredItem>> {
        let request = builder.build()?;

        {
            let mut inner = self.inner.write().await;
            if inner.loading {
                tracing::warn!("Duplicate recommendation submission rejected");
                return Err(AppError::RequestInProgress);
            }
            inner.loading = true;
        }

        let result = self.backend.recommend(&request).await;

        let mut inner = self.inner.write().await;
        inner.loading = false;
        match result {
            Ok(items) => {
                inner.recommendations = items.clone();
                Ok(items)
            }
            Err(e) => {
                // Stale results would misrepresent the failed request
                inner.recommendations.clear();
                Err(e)
            }
        }
    }

    /// Fetches the catalog page described by the current query state.
    ///
    /// Concurrent fetches are allowed; whichever response lands last
    /// replaces the snapshot wholesale.
    pub async fn browse(&self) -> AppResult<CatalogSnapshot> {
        let params = self.inner.read().await.catalog.query_params();
        let page = self.backend.browse(&params).await?;

        let snapshot = CatalogSnapshot {
            page,
            fetched_at: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner.catalog.record_pagination(&snapshot.page.pagination);
        inner.last_catalog_page = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Applies a mutation to the catalog query state and refetches
    pub async fn update_catalog<F>(&self, mutate: F) -> AppResult<CatalogSnapshot>
    where
        F: FnOnce(&mut CatalogQueryState),
    {
        {
            let mut inner = self.inner.write().await;
            mutate(&mut inner.catalog);
        }
        self.browse().await
    }

    pub async fn load_genres(&self) -> AppResult<Vec<String>> {
        self.backend.genres().await
    }

    pub async fn check_health(&self) -> AppResult<HealthReport> {
        self.backend.health().await
    }

    /// Reorders the held recommendations and returns the new order
    pub async fn sort_recommendations(&self, key: SortKey) -> Vec<ScoredItem> {
        let mut inner = self.inner.write().await;
        inner.recommendations = sorter::sort_items(&inner.recommendations, key);
        inner.recommendations.clone()
    }

    pub async fn recommendations(&self) -> Vec<ScoredItem> {
        self.inner.read().await.recommendations.clone()
    }

    pub async fn catalog_query(&self) -> CatalogQueryState {
        self.inner.read().await.catalog.clone()
    }

    pub async fn last_catalog_page(&self) -> Option<CatalogSnapshot> {
        self.inner.read().await.last_catalog_page.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    /// Clears recommendations, the catalog snapshot, and the query state
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.recommendations.clear();
        inner.catalog = CatalogQueryState::new(inner.catalog.per_page());
        inner.last_catalog_page = None;
        inner.loading = false;
    }
}
