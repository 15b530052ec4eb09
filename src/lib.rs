//! Client engine for a hybrid movie recommendation service.
//!
//! Turns volatile, partially-valid UI state into well-formed requests for
//! the remote recommendation/catalog service and turns responses back
//! into ordered, paginated results: preference normalization, request
//! construction, result ordering, and catalog filter/pagination state
//! with debounced search.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
