//! Display formatting helpers for catalog values.
//!
//! Missing fields render as placeholders so one incomplete entry never
//! breaks a page.

use crate::models::CatalogEntry;

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN: &str = "Unknown";

pub fn media_type(s: &str) -> String {
    match s.to_ascii_lowercase().as_str() {
        "" => UNKNOWN.into(),
        "tv" => "TV".into(),
        "movie" => "Movie".into(),
        "ova" => "OVA".into(),
        "ona" => "ONA".into(),
        "special" => "Special".into(),
        "music" => "Music".into(),
        "tv_special" | "tv special" => "TV Special".into(),
        "cm" => "CM".into(),
        "pv" => "PV".into(),
        _ => s.to_string(),
    }
}

/// Airing status for display. Accepts both Jikan's labels and
/// MyAnimeList's snake_case values.
pub fn airing_status(status: Option<&str>) -> String {
    match status.map(str::trim) {
        None | Some("") => UNKNOWN.into(),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "finished airing" | "finished_airing" => "Finished".into(),
            "currently airing" | "currently_airing" => "Airing".into(),
            "not yet aired" | "not_yet_aired" => "Not Yet Aired".into(),
            _ => s.to_string(),
        },
    }
}

pub fn year(year: Option<i32>) -> String {
    year.map_or_else(|| UNKNOWN.into(), |y| y.to_string())
}

pub fn episodes(count: Option<u32>) -> String {
    match count {
        Some(1) => "1 ep".into(),
        Some(n) => format!("{n} eps"),
        None => format!("{NOT_AVAILABLE} eps"),
    }
}

pub fn score(score: Option<f32>) -> String {
    score.map_or_else(|| NOT_AVAILABLE.into(), |s| format!("{s:.2}"))
}

pub fn rank(rank: Option<u32>) -> String {
    rank.map_or_else(|| format!("#{NOT_AVAILABLE}"), |r| format!("#{r}"))
}

pub fn image(entry: &CatalogEntry) -> &str {
    entry
        .image_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

pub fn title(entry: &CatalogEntry) -> &str {
    if entry.title.trim().is_empty() {
        UNKNOWN
    } else {
        &entry.title
    }
}

/// One-line summary, e.g. `Movie • 2006 • 37 eps`.
pub fn detail_line(entry: &CatalogEntry) -> String {
    format!(
        "{} • {} • {}",
        media_type(&entry.kind),
        year(entry.release_year),
        episodes(entry.episode_count)
    )
}

/// Genres joined for display, or a placeholder when there are none.
pub fn genres(entry: &CatalogEntry) -> String {
    if entry.genres.is_empty() {
        NOT_AVAILABLE.into()
    } else {
        entry.genres.join(", ")
    }
}

/// Truncate `text` to at most `max` characters, appending an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_line_complete() {
        let entry = CatalogEntry {
            kind: "Movie".into(),
            release_year: Some(2016),
            episode_count: Some(1),
            ..CatalogEntry::new(32281, "Kimi no Na wa.")
        };
        assert_eq!(detail_line(&entry), "Movie • 2016 • 1 ep");
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let entry = CatalogEntry::new(1, "");
        assert_eq!(detail_line(&entry), "Unknown • Unknown • N/A eps");
        assert_eq!(score(entry.score), "N/A");
        assert_eq!(rank(entry.rank), "#N/A");
        assert_eq!(image(&entry), "N/A");
        assert_eq!(title(&entry), "Unknown");
        assert_eq!(genres(&entry), "N/A");
    }

    #[test]
    fn test_score_and_rank() {
        assert_eq!(score(Some(9.1)), "9.10");
        assert_eq!(rank(Some(25)), "#25");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_airing_status() {
        assert_eq!(airing_status(Some("Finished Airing")), "Finished");
        assert_eq!(airing_status(Some("Currently Airing")), "Airing");
        assert_eq!(airing_status(Some("not_yet_aired")), "Not Yet Aired");
        assert_eq!(airing_status(Some("Hiatus")), "Hiatus");
        assert_eq!(airing_status(None), UNKNOWN);
        assert_eq!(airing_status(Some("  ")), UNKNOWN);
    }
}
