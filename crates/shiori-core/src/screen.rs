//! Home screen state container.
//!
//! `HomeScreen` owns the catalog loader, search filter, favorites ledger and
//! toast slot of one screen instance. Every event goes through
//! [`HomeScreen::update`], which mutates state synchronously and returns the
//! [`Effect`]s the caller must carry out (network fetches, timers). Results of
//! those effects come back in as further [`Message`]s.

use std::time::Duration;

use crate::catalog::{CatalogLoader, LoadPhase, PageRequest};
use crate::config::AppConfig;
use crate::error::CatalogError;
use crate::favorites::{self, FavoritesLedger};
use crate::models::{CatalogEntry, CatalogPage, EntryId};
use crate::pagination::{PaginationTrigger, ScrollMetrics};
use crate::search::{QueryUpdate, SearchFilter};
use crate::toast::{Toast, ToastKind, ToastState};

/// Tunables for one screen instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSettings {
    pub page_size: u32,
    pub debounce: Duration,
    pub toast_auto_hide: Duration,
    pub scroll_threshold: f32,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ScreenSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            page_size: config.api.page_size,
            debounce: config.search.debounce(),
            toast_auto_hide: config.toast.auto_hide(),
            scroll_threshold: config.pagination.threshold,
        }
    }
}

/// Events the screen reacts to.
#[derive(Debug, Clone)]
pub enum Message {
    /// Screen shown: load the first page.
    Mount,
    /// User asked to reload after an error.
    Retry,
    QueryChanged(String),
    ClearQuery,
    SearchTimerFired(u64),
    ToggleFavorite(EntryId),
    ToastTimerFired(u64),
    Scrolled(ScrollMetrics),
    PageLoaded {
        request_id: u64,
        result: Result<CatalogPage, CatalogError>,
    },
    /// Screen torn down; everything after this is ignored.
    Unmount,
}

/// Side effects requested by [`HomeScreen::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch a page and answer with [`Message::PageLoaded`].
    Fetch(PageRequest),
    /// Answer with [`Message::SearchTimerFired`] after `delay`, replacing any
    /// pending search timer.
    ScheduleSearch { token: u64, delay: Duration },
    /// Answer with [`Message::ToastTimerFired`] after `delay`, replacing any
    /// pending toast timer.
    ScheduleToastHide { id: u64, delay: Duration },
}

/// What the screen body shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenBody {
    Loading,
    /// Full-screen error with a retry action; only when nothing is loaded.
    Error(String),
    List,
}

/// A displayed entry together with its favorite flag.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub entry: CatalogEntry,
    pub favorite: bool,
}

/// Owned copy of everything a presentation layer needs to draw the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSnapshot {
    pub phase: LoadPhase,
    pub body: ScreenBody,
    pub query: String,
    /// A typed query is waiting for its debounce timer.
    pub searching: bool,
    pub entries: Vec<EntryView>,
    pub total_loaded: usize,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub toast: Option<Toast>,
    pub favorite_count: usize,
}

pub struct HomeScreen {
    catalog: CatalogLoader,
    search: SearchFilter,
    favorites: FavoritesLedger,
    toast: ToastState,
    trigger: PaginationTrigger,
    mounted: bool,
}

impl HomeScreen {
    pub fn new(settings: ScreenSettings) -> Self {
        Self {
            catalog: CatalogLoader::new(settings.page_size),
            search: SearchFilter::new(settings.debounce),
            favorites: FavoritesLedger::new(),
            toast: ToastState::new(settings.toast_auto_hide),
            trigger: PaginationTrigger::new(settings.scroll_threshold),
            mounted: true,
        }
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        if !self.mounted {
            tracing::debug!(?message, "screen unmounted, dropping message");
            return Vec::new();
        }

        match message {
            Message::Mount | Message::Retry => {
                self.trigger.reset();
                vec![Effect::Fetch(self.catalog.retry())]
            }
            Message::QueryChanged(text) => {
                match self.search.set_query(text, self.catalog.entries()) {
                    QueryUpdate::Applied => Vec::new(),
                    QueryUpdate::Scheduled { token, delay } => {
                        vec![Effect::ScheduleSearch { token, delay }]
                    }
                }
            }
            Message::ClearQuery => {
                self.search.clear(self.catalog.entries());
                Vec::new()
            }
            Message::SearchTimerFired(token) => {
                if !self.search.fire(token, self.catalog.entries()) {
                    tracing::trace!(token, "search timer superseded");
                }
                Vec::new()
            }
            Message::ToggleFavorite(id) => self.toggle_favorite(id),
            Message::ToastTimerFired(id) => {
                self.toast.hide(id);
                Vec::new()
            }
            Message::Scrolled(metrics) => self.on_scroll(metrics),
            Message::PageLoaded { request_id, result } => {
                let Some(outcome) = self.catalog.complete(request_id, result) else {
                    return Vec::new();
                };
                if outcome.is_ok() {
                    self.search.refresh(self.catalog.entries());
                }
                Vec::new()
            }
            Message::Unmount => {
                self.mounted = false;
                Vec::new()
            }
        }
    }

    fn toggle_favorite(&mut self, id: EntryId) -> Vec<Effect> {
        if !self.catalog.entries().iter().any(|e| e.id == id) {
            tracing::debug!(id, "toggle for unknown entry ignored");
            return Vec::new();
        }
        let favorite = self.favorites.toggle(id);
        let kind = if favorite {
            ToastKind::Success
        } else {
            ToastKind::Info
        };
        let toast_id = self.toast.show(favorites::toggle_message(favorite), kind);
        vec![Effect::ScheduleToastHide {
            id: toast_id,
            delay: self.toast.auto_hide(),
        }]
    }

    fn on_scroll(&mut self, metrics: ScrollMetrics) -> Vec<Effect> {
        if self.search.is_active() || !self.catalog.can_load_more() {
            return Vec::new();
        }
        if !self.trigger.observe(metrics) {
            return Vec::new();
        }
        self.catalog
            .next_page()
            .map(Effect::Fetch)
            .into_iter()
            .collect()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn catalog(&self) -> &CatalogLoader {
        &self.catalog
    }

    pub fn search(&self) -> &SearchFilter {
        &self.search
    }

    pub fn favorites(&self) -> &FavoritesLedger {
        &self.favorites
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.current()
    }

    pub fn is_favorite(&self, id: EntryId) -> bool {
        self.favorites.is_favorite(id)
    }

    /// The filtered view, in base-collection order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.search.view(self.catalog.entries())
    }

    /// Loaded entries marked favorite, in base-collection order.
    pub fn favorite_entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        let favorites = &self.favorites;
        self.catalog
            .entries()
            .iter()
            .filter(move |e| favorites.is_favorite(e.id))
    }

    pub fn body(&self) -> ScreenBody {
        if !self.catalog.entries().is_empty() {
            return ScreenBody::List;
        }
        match self.catalog.error() {
            Some(e) if !self.catalog.is_loading() => ScreenBody::Error(e.to_string()),
            _ if self.catalog.phase() == LoadPhase::Exhausted => ScreenBody::List,
            _ => ScreenBody::Loading,
        }
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            phase: self.catalog.phase(),
            body: self.body(),
            query: self.search.query().to_string(),
            searching: self.search.is_pending(),
            entries: self
                .visible_entries()
                .map(|e| EntryView {
                    entry: e.clone(),
                    favorite: self.favorites.is_favorite(e.id),
                })
                .collect(),
            total_loaded: self.catalog.entries().len(),
            has_more: self.catalog.has_more(),
            loading: self.catalog.is_loading(),
            error: self.catalog.error().map(|e| e.to_string()),
            toast: self.toast.current().cloned(),
            favorite_count: self.favorites.count(),
        }
    }
}
