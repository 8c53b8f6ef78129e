//! Line-driven interactive browser on top of a screen actor.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use shiori_api::JikanClient;
use shiori_core::pagination::ScrollMetrics;
use shiori_core::screen::{ScreenSettings, ScreenSnapshot};
use shiori_runtime::ScreenHandle;

use crate::error::CliError;
use crate::render;

/// Row height and viewport size used to turn `more` into scroll metrics.
const ROW_HEIGHT: f32 = 10.0;
const VISIBLE_ROWS: f32 = 20.0;

const HELP: &str = "\
commands:
  list            show the current view
  more            scroll to the bottom (loads the next page)
  search <text>   filter loaded titles, genres and synopses
  clear           clear the search
  fav <id>        toggle a favorite
  favs            list favorites
  retry           reload from the first page
  help            this text
  quit            exit";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    List,
    More,
    Search(String),
    Clear,
    Favorite(u64),
    Favorites,
    Retry,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let (cmd, rest) = line
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((line, ""));
    match cmd {
        "" => Input::Empty,
        "list" | "ls" => Input::List,
        "more" | "m" => Input::More,
        "search" | "s" if !rest.is_empty() => Input::Search(rest.to_string()),
        "search" | "s" | "clear" => Input::Clear,
        "fav" | "f" => match rest.parse() {
            Ok(id) => Input::Favorite(id),
            Err(_) => Input::Unknown(line.to_string()),
        },
        "favs" => Input::Favorites,
        "retry" | "r" => Input::Retry,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

/// Metrics for a viewport resting at the end of `rows` rendered rows.
fn bottom_of(rows: usize) -> ScrollMetrics {
    let total = rows as f32 * ROW_HEIGHT;
    let viewport = total.min(VISIBLE_ROWS * ROW_HEIGHT);
    ScrollMetrics::new(viewport, total - viewport, total)
}

/// Why `more` did not start a load, judged on the state before the scroll.
fn more_blocked_reason(before: &ScreenSnapshot) -> Option<&'static str> {
    if !before.query.trim().is_empty() {
        Some("Clear the search to load more pages.")
    } else if before.error.is_some() {
        Some("The last load failed. Type `retry` to reload from the first page.")
    } else if !before.has_more {
        Some("End of catalog.")
    } else {
        None
    }
}

pub async fn run(client: JikanClient, settings: ScreenSettings) -> Result<(), CliError> {
    let handle = ScreenHandle::spawn(Arc::new(client), settings);
    println!("{HELP}\n");
    print!("{}", render::snapshot(&handle.wait_idle().await?));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Empty => {}
            Input::List => print!("{}", render::snapshot(&handle.snapshot().await?)),
            Input::More => {
                let before = handle.snapshot().await?;
                handle.scrolled(bottom_of(before.entries.len()))?;
                let after = handle.snapshot().await?;
                if !after.loading {
                    if let Some(reason) = more_blocked_reason(&before) {
                        println!("{reason}");
                    }
                    continue;
                }
                print!("{}", render::snapshot(&handle.wait_idle().await?));
            }
            Input::Search(text) => {
                handle.set_query(text)?;
                handle.snapshot().await?;
                let snap = handle.wait_until(|s| !s.searching).await?;
                print!("{}", render::snapshot(&snap));
            }
            Input::Clear => {
                handle.clear_query()?;
                print!("{}", render::snapshot(&handle.snapshot().await?));
            }
            Input::Favorite(id) => {
                handle.toggle_favorite(id)?;
                let snap = handle.snapshot().await?;
                match snap.toast {
                    Some(toast) => println!("» {}", toast.message),
                    None => println!("No loaded entry with id {id}."),
                }
            }
            Input::Favorites => {
                let favorites = handle.favorite_entries().await?;
                if favorites.is_empty() {
                    println!("No favorites yet.");
                }
                for entry in &favorites {
                    println!("{}", render::entry_line(entry, true));
                }
            }
            Input::Retry => {
                handle.retry()?;
                handle.snapshot().await?;
                print!("{}", render::snapshot(&handle.wait_idle().await?));
            }
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
            Input::Unknown(line) => println!("Unknown command: {line} (try `help`)"),
        }
    }

    handle.unmount().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use shiori_core::catalog::LoadPhase;
    use shiori_core::screen::ScreenBody;

    use super::*;

    fn idle_list() -> ScreenSnapshot {
        ScreenSnapshot {
            phase: LoadPhase::Loaded,
            body: ScreenBody::List,
            query: String::new(),
            searching: false,
            entries: Vec::new(),
            total_loaded: 25,
            has_more: true,
            loading: false,
            error: None,
            toast: None,
            favorite_count: 0,
        }
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  "), Input::Empty);
        assert_eq!(parse_input("more"), Input::More);
        assert_eq!(parse_input("search  death note "), Input::Search("death note".into()));
        assert_eq!(parse_input("search"), Input::Clear);
        assert_eq!(parse_input("fav 42"), Input::Favorite(42));
        assert_eq!(parse_input("fav x"), Input::Unknown("fav x".into()));
        assert_eq!(parse_input("q"), Input::Quit);
    }

    #[test]
    fn test_bottom_of_reaches_end() {
        let metrics = bottom_of(25);
        assert_eq!(metrics.offset + metrics.viewport_height, metrics.total_height);

        let short = bottom_of(3);
        assert_eq!(short.offset, 0.0);
        assert!(short.near_end(20.0));
    }

    #[test]
    fn test_more_after_failed_page_points_to_retry() {
        let before = ScreenSnapshot {
            phase: LoadPhase::Error,
            error: Some("HTTP 503".into()),
            ..idle_list()
        };
        let reason = more_blocked_reason(&before).unwrap();
        assert!(reason.contains("retry"), "{reason}");
    }

    #[test]
    fn test_more_blocked_reasons() {
        let searching = ScreenSnapshot {
            query: "death".into(),
            ..idle_list()
        };
        assert_eq!(
            more_blocked_reason(&searching),
            Some("Clear the search to load more pages.")
        );

        let exhausted = ScreenSnapshot {
            phase: LoadPhase::Exhausted,
            has_more: false,
            ..idle_list()
        };
        assert_eq!(more_blocked_reason(&exhausted), Some("End of catalog."));
        assert_eq!(more_blocked_reason(&idle_list()), None);
    }
}
