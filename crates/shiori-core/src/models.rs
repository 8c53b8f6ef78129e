use serde::{Deserialize, Serialize};

/// Catalog identifier, taken verbatim from the remote `mal_id`.
pub type EntryId = u64;

/// One anime title as returned by the remote catalog.
///
/// Entries are immutable once loaded; the screen only ever appends or
/// replaces whole pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub title: String,
    pub kind: String,
    pub episode_count: Option<u32>,
    pub score: Option<f32>,
    pub rank: Option<u32>,
    pub synopsis: Option<String>,
    pub image_url: Option<String>,
    pub genres: Vec<String>,
    pub release_year: Option<i32>,
    /// Airing status as reported upstream ("Finished Airing", ...).
    pub status: Option<String>,
}

impl CatalogEntry {
    /// Minimal entry with every optional field empty.
    pub fn new(id: EntryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            kind: String::new(),
            episode_count: None,
            score: None,
            rank: None,
            synopsis: None,
            image_url: None,
            genres: Vec::new(),
            release_year: None,
            status: None,
        }
    }

    /// Case-insensitive substring match against title, genres and synopsis.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .genres
                .iter()
                .any(|g| g.to_lowercase().contains(needle))
            || self
                .synopsis
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }
}

/// One fetched page.
///
/// `returned` is the number of rows the server sent, which can exceed
/// `entries.len()` when unusable rows were dropped during decoding. Paging
/// decisions are made on `returned`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,
    pub returned: usize,
}

impl CatalogPage {
    pub fn new(entries: Vec<CatalogEntry>, returned: usize) -> Self {
        Self { entries, returned }
    }
}

impl From<Vec<CatalogEntry>> for CatalogPage {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        let returned = entries.len();
        Self { entries, returned }
    }
}
