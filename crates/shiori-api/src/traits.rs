//! Trait definitions for catalog backends.
//!
//! The runtime only talks to a [`CatalogSource`], so tests can swap the
//! Jikan client for an in-memory one.

use std::future::Future;
use std::sync::Arc;

use shiori_core::CatalogPage;

/// A paginated, read-only anime catalog.
pub trait CatalogSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch page `page` (1-based) holding at most `limit` rows.
    fn fetch_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<CatalogPage, Self::Error>> + Send;
}

impl<T: CatalogSource> CatalogSource for Arc<T> {
    type Error = T::Error;

    fn fetch_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<CatalogPage, Self::Error>> + Send {
        T::fetch_page(self, page, limit)
    }
}
