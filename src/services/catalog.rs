use crate::models::Pagination;

pub const DEFAULT_SORT: &str = "popularity";
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Filter and pagination state driving catalog retrieval.
///
/// Filter and search mutations reset the page to 1, since offsets into
/// the previous result set are meaningless after the set changes. Page
/// navigation is bounded by the page count last reported by the service;
/// the state never clamps beyond what the service said.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQueryState {
    page: u32,
    per_page: u32,
    sort_by: String,
    genre: Option<String>,
    year_min: Option<i32>,
    year_max: Option<i32>,
    rating_min: Option<f64>,
    search_term: Option<String>,
    /// Ground truth from the last response; bounds new navigation
    total_pages: Option<u32>,
}

impl Default for CatalogQueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl CatalogQueryState {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            sort_by: DEFAULT_SORT.to_string(),
            genre: None,
            year_min: None,
            year_max: None,
            rating_min: None,
            search_term: None,
            total_pages: None,
        }
    }

    // Filter mutations. Each one invalidates the current offset and the
    // reported page count, both of which belong to the old result set.

    pub fn set_sort_by(&mut self, sort_by: &str) {
        let sort_by = sort_by.trim();
        self.sort_by = if sort_by.is_empty() {
            DEFAULT_SORT.to_string()
        } else {
            sort_by.to_string()
        };
        self.filters_changed();
    }

    pub fn set_genre(&mut self, genre: &str) {
        self.genre = non_empty(genre);
        self.filters_changed();
    }

    pub fn set_year_min(&mut self, year: Option<i32>) {
        self.year_min = year;
        self.filters_changed();
    }

    pub fn set_year_max(&mut self, year: Option<i32>) {
        self.year_max = year;
        self.filters_changed();
    }

    pub fn set_rating_min(&mut self, rating: Option<f64>) {
        self.rating_min = rating;
        self.filters_changed();
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = non_empty(term);
        self.filters_changed();
    }

    /// Resets every filter to its default and returns to page 1
    pub fn clear_filters(&mut self) {
        self.sort_by = DEFAULT_SORT.to_string();
        self.genre = None;
        self.year_min = None;
        self.year_max = None;
        self.rating_min = None;
        self.search_term = None;
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        self.page = 1;
        self.total_pages = None;
    }

    // Page navigation leaves filters untouched.

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_add(1))
    }

    /// Jumps to `page` if it lies within [1, total_pages] as last
    /// reported. Before any response has been seen only `page >= 1` is
    /// enforced.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if page == 0 {
            return false;
        }
        if let Some(total) = self.total_pages {
            if page > total {
                return false;
            }
        }
        self.page = page;
        true
    }

    /// Records the pagination block of a response as ground truth
    pub fn record_pagination(&mut self, pagination: &Pagination) {
        self.total_pages = Some(pagination.total_pages);
    }

    /// Query parameters for GET /movies/browse.
    ///
    /// Only fields with a present, non-empty value are emitted; an
    /// empty-string filter parameter is never submitted.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
            ("sort_by".to_string(), self.sort_by.clone()),
        ];

        if let Some(genre) = &self.genre {
            params.push(("genre".to_string(), genre.clone()));
        }
        if let Some(year_min) = self.year_min {
            params.push(("year_min".to_string(), year_min.to_string()));
        }
        if let Some(year_max) = self.year_max {
            params.push(("year_max".to_string(), year_max.to_string()));
        }
        if let Some(rating_min) = self.rating_min {
            params.push(("rating_min".to_string(), rating_min.to_string()));
        }
        if let Some(term) = &self.search_term {
            params.push(("search".to_string(), term.clone()));
        }

        params
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
