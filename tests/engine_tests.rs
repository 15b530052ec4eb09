use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio_test::assert_ok;

use reelpick::error::{AppError, AppResult};
use reelpick::models::{
    CatalogPage, HealthReport, Pagination, PreferenceVector, RecommendationRequest, ScoredItem,
};
use reelpick::services::{
    RecommendationBackend, RequestBuilder, SearchDebouncer, Session, SortKey,
};

fn item(title: &str, score: f64) -> ScoredItem {
    ScoredItem {
        title: title.to_string(),
        score: Some(score),
        ..Default::default()
    }
}

fn page_for(params: &[(String, String)], total_pages: u32) -> CatalogPage {
    let page: u32 = params
        .iter()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(1);
    CatalogPage {
        movies: vec![item("Alien", 8.0)],
        pagination: Pagination {
            page,
            per_page: 50,
            total_movies: u64::from(total_pages) * 50,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        },
    }
}

/// Stub backend that records the browse parameters it was called with
struct RecordingBackend {
    browse_calls: Mutex<Vec<Vec<(String, String)>>>,
    total_pages: u32,
}

impl RecordingBackend {
    fn new(total_pages: u32) -> Self {
        Self {
            browse_calls: Mutex::new(Vec::new()),
            total_pages,
        }
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for RecordingBackend {
    async fn recommend(&self, _request: &RecommendationRequest) -> AppResult<Vec<ScoredItem>> {
        Ok(vec![item("Inception", 9.0)])
    }

    async fn browse(&self, params: &[(String, String)]) -> AppResult<CatalogPage> {
        let page = page_for(params, self.total_pages);
        self.browse_calls.lock().await.push(params.to_vec());
        Ok(page)
    }

    async fn genres(&self) -> AppResult<Vec<String>> {
        Ok(vec!["Action".to_string(), "Drama".to_string()])
    }

    async fn health(&self) -> AppResult<HealthReport> {
        Ok(HealthReport {
            status: "healthy".to_string(),
            dataset_stats: None,
        })
    }
}

/// Stub backend whose recommend call blocks until released
struct GatedBackend {
    release: Notify,
}

#[async_trait::async_trait]
impl RecommendationBackend for GatedBackend {
    async fn recommend(&self, _request: &RecommendationRequest) -> AppResult<Vec<ScoredItem>> {
        self.release.notified().await;
        Ok(vec![item("Slow Movie", 6.0)])
    }

    async fn browse(&self, _params: &[(String, String)]) -> AppResult<CatalogPage> {
        Err(AppError::Schema("not under test".to_string()))
    }

    async fn genres(&self) -> AppResult<Vec<String>> {
        Ok(vec![])
    }

    async fn health(&self) -> AppResult<HealthReport> {
        Ok(HealthReport {
            status: "initializing".to_string(),
            dataset_stats: None,
        })
    }
}

fn request_builder() -> RequestBuilder {
    RequestBuilder::new(PreferenceVector::normalize_raw([]))
}

#[tokio::test]
async fn test_duplicate_submission_is_rejected_not_queued() {
    let backend = Arc::new(GatedBackend {
        release: Notify::new(),
    });
    let session = Session::new(backend.clone(), 50);

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.submit(request_builder()).await })
    };

    // Wait until the first submission is marked in flight
    while !session.is_loading().await {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    let second = session.submit(request_builder()).await;
    assert!(matches!(second, Err(AppError::RequestInProgress)));

    // The in-flight call is unaffected by the rejection
    backend.release.notify_one();
    let first = first.await.unwrap().unwrap();
    assert_eq!(first[0].title, "Slow Movie");
    assert!(!session.is_loading().await);
}

#[tokio::test]
async fn test_filter_change_on_deep_page_requeries_page_one() {
    let backend = Arc::new(RecordingBackend::new(10));
    let session = Session::new(backend.clone(), 50);

    session.browse().await.unwrap();
    session
        .update_catalog(|catalog| {
            catalog.go_to_page(3);
        })
        .await
        .unwrap();
    session
        .update_catalog(|catalog| catalog.set_genre("Horror"))
        .await
        .unwrap();

    let calls = backend.browse_calls.lock().await;
    let last = calls.last().unwrap();
    assert!(last.contains(&("page".to_string(), "1".to_string())));
    assert!(last.contains(&("genre".to_string(), "Horror".to_string())));
}

#[tokio::test]
async fn test_clear_filters_resets_query() {
    let backend = Arc::new(RecordingBackend::new(10));
    let session = Session::new(backend.clone(), 50);

    session
        .update_catalog(|catalog| {
            catalog.set_genre("Drama");
            catalog.set_rating_min(Some(7.0));
            catalog.set_sort_by("title");
        })
        .await
        .unwrap();
    session
        .update_catalog(|catalog| catalog.clear_filters())
        .await
        .unwrap();

    let calls = backend.browse_calls.lock().await;
    let last = calls.last().unwrap();
    assert!(last.contains(&("page".to_string(), "1".to_string())));
    assert!(last.contains(&("sort_by".to_string(), "popularity".to_string())));
    assert!(!last.iter().any(|(k, _)| k == "genre" || k == "rating_min"));
}

#[tokio::test]
async fn test_debounced_search_drives_single_catalog_query() {
    let backend = Arc::new(RecordingBackend::new(2));
    let session = Session::new(backend.clone(), 50);

    let (mut debouncer, mut rx) = SearchDebouncer::new(Duration::from_millis(20));
    debouncer.update("a");
    debouncer.update("al");
    debouncer.update("alien");

    // Only the final term of the burst arrives
    let term = rx.recv().await.unwrap();
    session
        .update_catalog(|catalog| catalog.set_search_term(&term))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(rx.try_recv().is_err());

    let calls = backend.browse_calls.lock().await;
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains(&("search".to_string(), "alien".to_string())));
}

#[tokio::test]
async fn test_recommend_sort_and_reset_flow() {
    let backend = Arc::new(RecordingBackend::new(1));
    let session = Session::new(backend, 50);

    let results = session.submit(request_builder()).await.unwrap();
    assert_eq!(results.len(), 1);

    let sorted = session.sort_recommendations(SortKey::Title).await;
    assert_eq!(sorted[0].title, "Inception");

    session.reset().await;
    assert!(session.recommendations().await.is_empty());
}

#[tokio::test]
async fn test_genres_and_health_passthrough() {
    let backend = Arc::new(RecordingBackend::new(1));
    let session = Session::new(backend, 50);

    let genres = assert_ok!(session.load_genres().await);
    assert_eq!(genres, vec!["Action".to_string(), "Drama".to_string()]);

    let health = assert_ok!(session.check_health().await);
    assert!(health.is_healthy());
}

#[tokio::test]
async fn test_navigation_respects_reported_page_count() {
    let backend = Arc::new(RecordingBackend::new(3));
    let session = Session::new(backend.clone(), 50);

    session.browse().await.unwrap();

    let mut query = session.catalog_query().await;
    assert_eq!(query.total_pages(), Some(3));
    assert!(!query.go_to_page(4));
    assert!(query.go_to_page(3));
}
