//! Debounced free-text filter over the loaded catalog.

use std::time::Duration;

use crate::models::CatalogEntry;

/// What the caller has to do after a query change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryUpdate {
    /// The view was recomputed on the spot.
    Applied,
    /// Recompute after `delay` by calling [`SearchFilter::fire`] with `token`.
    Scheduled { token: u64, delay: Duration },
}

/// Entries of `entries` matching `query`, in their original order.
///
/// A blank query matches everything.
pub fn filter<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    let needle = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| needle.is_empty() || e.matches(&needle))
        .collect()
}

/// Query text plus the filtered view derived from it.
///
/// The view is stored as indices into the base collection and must be
/// refreshed with [`SearchFilter::refresh`] whenever that collection changes.
#[derive(Debug)]
pub struct SearchFilter {
    query: String,
    applied: String,
    filtered_indices: Vec<usize>,
    pending: Option<u64>,
    next_token: u64,
    debounce: Duration,
}

impl SearchFilter {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            applied: String::new(),
            filtered_indices: Vec::new(),
            pending: None,
            next_token: 0,
            debounce,
        }
    }

    /// Query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Lowercased needle the current view was computed from.
    pub fn applied_query(&self) -> &str {
        &self.applied
    }

    /// True while any non-blank query is typed, applied or not.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Update the query. Blank queries apply immediately; anything else
    /// restarts the debounce window.
    pub fn set_query(&mut self, text: impl Into<String>, base: &[CatalogEntry]) -> QueryUpdate {
        self.query = text.into();
        if self.query.trim().is_empty() {
            self.pending = None;
            self.applied.clear();
            self.refresh(base);
            return QueryUpdate::Applied;
        }
        self.next_token += 1;
        self.pending = Some(self.next_token);
        QueryUpdate::Scheduled {
            token: self.next_token,
            delay: self.debounce,
        }
    }

    pub fn clear(&mut self, base: &[CatalogEntry]) {
        self.set_query(String::new(), base);
    }

    /// Debounce timer fired. Returns `false` if `token` was superseded.
    pub fn fire(&mut self, token: u64, base: &[CatalogEntry]) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        self.applied = self.query.trim().to_lowercase();
        self.refresh(base);
        true
    }

    /// Recompute the view against a changed base collection.
    pub fn refresh(&mut self, base: &[CatalogEntry]) {
        let needle = self.applied.as_str();
        self.filtered_indices = base
            .iter()
            .enumerate()
            .filter(|(_, e)| needle.is_empty() || e.matches(needle))
            .map(|(i, _)| i)
            .collect();
    }

    /// The filtered view over `base`.
    pub fn view<'a>(&'a self, base: &'a [CatalogEntry]) -> impl Iterator<Item = &'a CatalogEntry> {
        self.filtered_indices.iter().filter_map(move |&i| base.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry {
                genres: vec!["Action".into(), "Adventure".into()],
                ..CatalogEntry::new(21, "One Piece")
            },
            CatalogEntry {
                genres: vec!["Suspense".into()],
                synopsis: Some("A notebook grants its owner power over death.".into()),
                ..CatalogEntry::new(1535, "Death Note")
            },
            CatalogEntry {
                genres: vec!["Action".into()],
                ..CatalogEntry::new(269, "Bleach")
            },
        ]
    }

    fn titles<'a>(entries: impl Iterator<Item = &'a CatalogEntry>) -> Vec<&'a str> {
        entries.map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_filter_by_title() {
        let base = vec![CatalogEntry::new(1535, "Death Note"), CatalogEntry::new(269, "Bleach")];
        assert_eq!(titles(filter(&base, "death").into_iter()), vec!["Death Note"]);
    }

    #[test]
    fn test_filter_is_ordered_subsequence() {
        let base = catalog();
        assert_eq!(
            titles(filter(&base, "ACTION").into_iter()),
            vec!["One Piece", "Bleach"]
        );
    }

    #[test]
    fn test_blank_filter_is_identity() {
        let base = catalog();
        assert_eq!(filter(&base, "").len(), base.len());
        assert_eq!(filter(&base, "   ").len(), base.len());
    }

    #[test]
    fn test_query_is_debounced() {
        let base = catalog();
        let mut search = SearchFilter::new(DEBOUNCE);
        search.refresh(&base);

        let update = search.set_query("death", &base);
        let QueryUpdate::Scheduled { token, delay } = update else {
            panic!("expected a scheduled recompute, got {update:?}");
        };
        assert_eq!(delay, DEBOUNCE);
        assert!(search.is_active());
        assert_eq!(search.view(&base).count(), 3);

        assert!(search.fire(token, &base));
        assert_eq!(titles(search.view(&base)), vec!["Death Note"]);
    }

    #[test]
    fn test_newer_query_supersedes_pending_one() {
        let base = catalog();
        let mut search = SearchFilter::new(DEBOUNCE);
        search.refresh(&base);

        let QueryUpdate::Scheduled { token: first, .. } = search.set_query("de", &base) else {
            panic!("expected a scheduled recompute");
        };
        let QueryUpdate::Scheduled { token: second, .. } = search.set_query("bleach", &base) else {
            panic!("expected a scheduled recompute");
        };

        assert!(!search.fire(first, &base));
        assert_eq!(search.view(&base).count(), 3);
        assert!(search.fire(second, &base));
        assert_eq!(titles(search.view(&base)), vec!["Bleach"]);
    }

    #[test]
    fn test_clear_applies_immediately_and_cancels_pending() {
        let base = catalog();
        let mut search = SearchFilter::new(DEBOUNCE);
        let QueryUpdate::Scheduled { token, .. } = search.set_query("piece", &base) else {
            panic!("expected a scheduled recompute");
        };
        search.fire(token, &base);
        assert_eq!(search.view(&base).count(), 1);

        let QueryUpdate::Scheduled { token, .. } = search.set_query("bleach", &base) else {
            panic!("expected a scheduled recompute");
        };
        search.clear(&base);
        assert!(!search.is_active());
        assert!(!search.is_pending());
        assert_eq!(search.view(&base).count(), 3);
        assert!(!search.fire(token, &base));
    }

    #[test]
    fn test_refresh_tracks_base_changes() {
        let mut base = catalog();
        let mut search = SearchFilter::new(DEBOUNCE);
        let QueryUpdate::Scheduled { token, .. } = search.set_query("action", &base) else {
            panic!("expected a scheduled recompute");
        };
        search.fire(token, &base);
        assert_eq!(search.view(&base).count(), 2);

        base.push(CatalogEntry {
            genres: vec!["Action".into()],
            ..CatalogEntry::new(5114, "Fullmetal Alchemist: Brotherhood")
        });
        search.refresh(&base);
        assert_eq!(search.view(&base).count(), 3);
    }
}
