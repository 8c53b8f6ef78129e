//! Catalog loader: page accumulation and load status.
//!
//! The loader never performs I/O itself. [`CatalogLoader::begin`] hands out a
//! [`PageRequest`] for the caller to execute; the result comes back through
//! [`CatalogLoader::complete`]. Each request carries a number so a response
//! that was superseded (for instance by a retry) is recognised and dropped.

use crate::error::CatalogError;
use crate::models::{CatalogEntry, CatalogPage};

/// Where the loader is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    /// First page in flight.
    Loading,
    /// A follow-up page in flight; loaded entries stay visible.
    LoadingMore,
    Loaded,
    /// The last page came back short: nothing more to fetch.
    Exhausted,
    Error,
}

/// One page fetch handed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub id: u64,
    pub page: u32,
    pub append: bool,
}

/// Accumulated catalog pages plus load status.
#[derive(Debug)]
pub struct CatalogLoader {
    entries: Vec<CatalogEntry>,
    page_size: u32,
    page: u32,
    has_more: bool,
    phase: LoadPhase,
    error: Option<CatalogError>,
    in_flight: Option<PageRequest>,
    next_request_id: u64,
}

impl CatalogLoader {
    pub fn new(page_size: u32) -> Self {
        Self {
            entries: Vec::new(),
            page_size: page_size.max(1),
            page: 0,
            has_more: true,
            phase: LoadPhase::Idle,
            error: None,
            in_flight: None,
            next_request_id: 0,
        }
    }

    /// Base collection loaded so far, across all pages.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Last page that loaded successfully (0 before the first one).
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&CatalogError> {
        self.error.as_ref()
    }

    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    /// Start loading `page`. Any request still in flight is superseded.
    pub fn begin(&mut self, page: u32, append: bool) -> PageRequest {
        let page = page.max(1);
        self.next_request_id += 1;
        let request = PageRequest {
            id: self.next_request_id,
            page,
            append: append && page > 1,
        };
        if let Some(old) = self.in_flight.replace(request) {
            tracing::debug!(old = old.id, new = request.id, "superseding page request");
        }
        self.error = None;
        self.phase = if request.append {
            LoadPhase::LoadingMore
        } else {
            LoadPhase::Loading
        };
        request
    }

    /// Reload from the first page, replacing the collection on success.
    pub fn retry(&mut self) -> PageRequest {
        self.begin(1, false)
    }

    /// Request the page after the last loaded one, if the guards allow it.
    pub fn next_page(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            return None;
        }
        Some(self.begin(self.page + 1, true))
    }

    /// Guard for scroll-driven pagination.
    pub fn can_load_more(&self) -> bool {
        !self.is_loading() && self.has_more && self.phase == LoadPhase::Loaded
    }

    /// Apply the outcome of a page fetch.
    ///
    /// Returns `None` when `request_id` is not the request in flight; the
    /// state is left untouched in that case.
    pub fn complete(
        &mut self,
        request_id: u64,
        result: Result<CatalogPage, CatalogError>,
    ) -> Option<Result<(), CatalogError>> {
        let request = match self.in_flight {
            Some(r) if r.id == request_id => r,
            _ => {
                tracing::debug!(request_id, "ignoring stale page response");
                return None;
            }
        };
        self.in_flight = None;

        let outcome = match result {
            Ok(page) if page.returned == 0 && !request.append => Err(CatalogError::EmptyCatalog),
            Ok(page) if page.returned == 0 => {
                self.has_more = false;
                self.phase = LoadPhase::Exhausted;
                tracing::debug!(page = request.page, "catalog exhausted");
                Ok(())
            }
            Ok(page) => {
                self.has_more = page.returned == self.page_size as usize;
                if page.entries.len() < page.returned {
                    tracing::debug!(
                        page = request.page,
                        returned = page.returned,
                        kept = page.entries.len(),
                        "page had unusable rows"
                    );
                }
                if request.append {
                    self.entries.extend(page.entries);
                } else {
                    self.entries = page.entries;
                }
                self.page = request.page;
                self.phase = if self.has_more {
                    LoadPhase::Loaded
                } else {
                    LoadPhase::Exhausted
                };
                Ok(())
            }
            Err(e) => Err(e),
        };

        if let Err(ref e) = outcome {
            tracing::warn!(page = request.page, error = %e, "catalog load failed");
            self.error = Some(e.clone());
            self.phase = LoadPhase::Error;
        }
        Some(outcome)
    }
}
