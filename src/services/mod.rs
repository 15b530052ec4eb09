pub mod api;
pub mod catalog;
pub mod debounce;
pub mod presets;
pub mod request;
pub mod session;
pub mod sorter;

pub use api::{HttpBackend, RecommendationBackend};
pub use catalog::CatalogQueryState;
pub use debounce::SearchDebouncer;
pub use request::RequestBuilder;
pub use session::Session;
pub use sorter::SortKey;
