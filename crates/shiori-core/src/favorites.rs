use std::collections::HashMap;

use crate::models::EntryId;

pub const SAVED_MESSAGE: &str = "Saved to favorites";
pub const REMOVED_MESSAGE: &str = "Removed from favorites";

/// In-memory favorite flags keyed by catalog id.
///
/// Keys are never removed: un-favoriting keeps the id mapped to `false`.
#[derive(Debug, Default)]
pub struct FavoritesLedger {
    flags: HashMap<EntryId, bool>,
}

impl FavoritesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag for `id` and return the new value.
    pub fn toggle(&mut self, id: EntryId) -> bool {
        let flag = self.flags.entry(id).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_favorite(&self, id: EntryId) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    /// Number of ids currently marked favorite.
    pub fn count(&self) -> usize {
        self.flags.values().filter(|&&v| v).count()
    }

    /// Number of ids ever toggled, favorite or not.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Toast text for a toggle that produced `favorite`.
pub fn toggle_message(favorite: bool) -> &'static str {
    if favorite {
        SAVED_MESSAGE
    } else {
        REMOVED_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_toggle_saves() {
        let mut ledger = FavoritesLedger::new();
        assert!(!ledger.is_favorite(42));
        assert!(ledger.toggle(42));
        assert!(ledger.is_favorite(42));
        assert_eq!(toggle_message(true), "Saved to favorites");
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut ledger = FavoritesLedger::new();
        ledger.toggle(7);
        let before = ledger.is_favorite(7);
        ledger.toggle(7);
        ledger.toggle(7);
        assert_eq!(ledger.is_favorite(7), before);
    }

    #[test]
    fn test_unfavorite_keeps_key() {
        let mut ledger = FavoritesLedger::new();
        ledger.toggle(42);
        assert!(!ledger.toggle(42));
        assert_eq!(toggle_message(false), "Removed from favorites");
        assert!(!ledger.is_favorite(42));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.count(), 0);
    }
}
