use chrono::{DateTime, Datelike, NaiveDate};
use serde::Deserialize;

use shiori_core::{CatalogEntry, CatalogPage};

// ── Top anime listing ───────────────────────────────────────────

/// Rows in `data` are kept undecoded so one malformed row can be skipped
/// without losing the page.
#[derive(Debug, Deserialize)]
pub struct JikanTopResponse {
    pub data: Vec<serde_json::Value>,
    pub pagination: Option<JikanPagination>,
}

#[derive(Debug, Deserialize)]
pub struct JikanPagination {
    pub last_visible_page: Option<u32>,
    #[serde(default)]
    pub has_next_page: bool,
    pub current_page: Option<u32>,
}

/// One anime object. Everything except the id is optional in practice.
#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: Option<u64>,
    pub title: Option<String>,
    pub title_english: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub episodes: Option<u32>,
    pub score: Option<f32>,
    pub rank: Option<u32>,
    pub synopsis: Option<String>,
    pub images: Option<JikanImages>,
    pub genres: Option<Vec<JikanNamed>>,
    pub year: Option<i32>,
    pub aired: Option<JikanAired>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
    pub webp: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanNamed {
    pub mal_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanAired {
    pub from: Option<String>,
    pub to: Option<String>,
    pub prop: Option<JikanAiredProp>,
    pub string: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanAiredProp {
    pub from: Option<JikanDateParts>,
    pub to: Option<JikanDateParts>,
}

#[derive(Debug, Deserialize)]
pub struct JikanDateParts {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

// ── Conversions to core types ───────────────────────────────────

impl JikanAnime {
    /// Release year: `year`, then `aired.prop.from.year`, then the parsed
    /// `aired.from` date.
    pub fn release_year(&self) -> Option<i32> {
        let aired = self.aired.as_ref();
        self.year
            .or_else(|| {
                aired
                    .and_then(|a| a.prop.as_ref())
                    .and_then(|p| p.from.as_ref())
                    .and_then(|d| d.year)
            })
            .or_else(|| aired.and_then(|a| a.from.as_deref()).and_then(parse_year))
    }

    fn cover_url(&self) -> Option<String> {
        let images = self.images.as_ref()?;
        [images.jpg.as_ref(), images.webp.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|set| set.image_url.clone().filter(|u| !u.is_empty()))
    }

    /// Convert to a catalog entry. Returns `None` without a `mal_id`.
    pub fn into_entry(self) -> Option<CatalogEntry> {
        let id = self.mal_id?;
        let release_year = self.release_year();
        let image_url = self.cover_url();
        Some(CatalogEntry {
            id,
            title: self
                .title
                .filter(|t| !t.trim().is_empty())
                .or(self.title_english)
                .unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            episode_count: self.episodes,
            score: self.score,
            rank: self.rank.filter(|&r| r > 0),
            synopsis: self.synopsis.filter(|s| !s.trim().is_empty()),
            image_url,
            genres: self
                .genres
                .map(|g| {
                    g.into_iter()
                        .filter_map(|x| x.name.filter(|n| !n.trim().is_empty()))
                        .collect()
                })
                .unwrap_or_default(),
            release_year,
            status: self.status.filter(|s| !s.trim().is_empty()),
        })
    }
}

impl JikanTopResponse {
    /// Decode every row into a catalog entry.
    ///
    /// Rows that fail to decode or carry no `mal_id` are skipped and logged;
    /// the page still reports how many rows the server sent.
    pub fn into_page(self) -> CatalogPage {
        let returned = self.data.len();
        let entries: Vec<CatalogEntry> = self
            .data
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<JikanAnime>(row) {
                Ok(anime) => anime.into_entry(),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed Jikan entry");
                    None
                }
            })
            .collect();
        if entries.len() < returned {
            tracing::warn!(
                skipped = returned - entries.len(),
                "dropped unusable Jikan entries"
            );
        }
        CatalogPage::new(entries, returned)
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.year())
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .map(|d| d.year())
        })
}
