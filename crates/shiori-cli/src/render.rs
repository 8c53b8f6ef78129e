//! Plain-text rendering of screen state.

use std::fmt::Write;

use shiori_core::format;
use shiori_core::screen::{ScreenBody, ScreenSnapshot};
use shiori_core::CatalogEntry;

const SYNOPSIS_WIDTH: usize = 100;

pub fn entry_line(entry: &CatalogEntry, favorite: bool) -> String {
    let star = if favorite { '★' } else { '☆' };
    format!(
        "{star} [{id}] {title}\n    {detail} | score {score} | {rank} | {genres}",
        id = entry.id,
        title = format::title(entry),
        detail = format::detail_line(entry),
        score = format::score(entry.score),
        rank = format::rank(entry.rank),
        genres = format::genres(entry),
    )
}

pub fn entry_block(entry: &CatalogEntry, favorite: bool) -> String {
    let mut out = entry_line(entry, favorite);
    let _ = write!(
        out,
        "\n    status: {} | image: {}",
        format::airing_status(entry.status.as_deref()),
        format::image(entry)
    );
    if let Some(ref synopsis) = entry.synopsis {
        let _ = write!(out, "\n    {}", format::truncate(synopsis, SYNOPSIS_WIDTH));
    }
    out
}

pub fn snapshot(snap: &ScreenSnapshot) -> String {
    let mut out = String::new();
    match snap.body {
        ScreenBody::Loading => out.push_str("Loading…\n"),
        ScreenBody::Error(ref message) => {
            let _ = writeln!(out, "Error: {message}");
            out.push_str("Type `retry` to try again.\n");
        }
        ScreenBody::List => {
            for view in &snap.entries {
                let _ = writeln!(out, "{}", entry_block(&view.entry, view.favorite));
            }
            out.push_str(&footer(snap));
        }
    }
    out
}

fn footer(snap: &ScreenSnapshot) -> String {
    let mut out = String::new();
    if snap.query.trim().is_empty() {
        let _ = write!(out, "{} loaded", snap.total_loaded);
    } else {
        let _ = write!(
            out,
            "{} of {} match \"{}\"",
            snap.entries.len(),
            snap.total_loaded,
            snap.query.trim()
        );
    }
    if snap.loading {
        out.push_str(" · loading more…");
    } else if snap.has_more {
        out.push_str(" · `more` for the next page");
    } else {
        out.push_str(" · end of catalog");
    }
    out.push('\n');
    if let Some(ref error) = snap.error {
        let _ = writeln!(out, "Error: {error} (`retry` reloads from the first page)");
    }
    out
}

#[cfg(test)]
mod tests {
    use shiori_core::catalog::LoadPhase;
    use shiori_core::screen::EntryView;

    use super::*;

    fn snap(body: ScreenBody) -> ScreenSnapshot {
        ScreenSnapshot {
            phase: LoadPhase::Loaded,
            body,
            query: String::new(),
            searching: false,
            entries: vec![EntryView {
                entry: CatalogEntry {
                    kind: "Movie".into(),
                    release_year: Some(2016),
                    episode_count: Some(1),
                    score: Some(8.93),
                    rank: Some(20),
                    genres: vec!["Drama".into()],
                    ..CatalogEntry::new(28851, "Koe no Katachi")
                },
                favorite: true,
            }],
            total_loaded: 1,
            has_more: true,
            loading: false,
            error: None,
            toast: None,
            favorite_count: 1,
        }
    }

    #[test]
    fn test_entry_line() {
        let s = snap(ScreenBody::List);
        let line = entry_line(&s.entries[0].entry, true);
        assert_eq!(
            line,
            "★ [28851] Koe no Katachi\n    Movie • 2016 • 1 ep | score 8.93 | #20 | Drama"
        );
    }

    #[test]
    fn test_entry_block_shows_status_and_image() {
        let entry = CatalogEntry {
            status: Some("Finished Airing".into()),
            ..CatalogEntry::new(28851, "Koe no Katachi")
        };
        let block = entry_block(&entry, false);
        assert!(block.contains("status: Finished | image: N/A"), "{block}");
    }

    #[test]
    fn test_list_footer() {
        let out = snapshot(&snap(ScreenBody::List));
        assert!(out.ends_with("1 loaded · `more` for the next page\n"));
    }

    #[test]
    fn test_error_view_replaces_list() {
        let out = snapshot(&snap(ScreenBody::Error("no anime found in the catalog".into())));
        assert!(out.starts_with("Error: no anime found in the catalog"));
        assert!(!out.contains("Koe no Katachi"));
    }
}
