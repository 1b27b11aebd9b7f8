use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serenity::all::UserId;

use crate::{normalize_game_name, Preference};

/// Per-user ratings. A user with no entry here has never interacted, which is
/// not the same thing as a user whose entries are all Unrated.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceStore {
    users: BTreeMap<UserId, BTreeMap<String, Preference>>,
}

impl PreferenceStore {
    /// Lookup with default: no record or no entry both resolve to Unrated.
    pub fn get(&self, user: UserId, game: &str) -> Preference {
        self.users
            .get(&user)
            .and_then(|ratings| ratings.get(&normalize_game_name(game)))
            .copied()
            .unwrap_or_default()
    }

    pub fn has_any(&self, user: UserId) -> bool {
        self.users.contains_key(&user)
    }

    pub fn set(&mut self, user: UserId, game: &str, preference: Preference) {
        self.users.entry(user).or_default().insert(normalize_game_name(game), preference);
    }

    /// Every game the user has an explicit entry for, orphans included.
    pub fn ratings(&self, user: UserId) -> Option<&BTreeMap<String, Preference>> {
        self.users.get(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: UserId = UserId::new(101);
    const BOB: UserId = UserId::new(102);

    #[test]
    fn missing_records_resolve_to_unrated() {
        let store = PreferenceStore::default();
        assert_eq!(store.get(ALICE, "catan"), Preference::Unrated);
        assert!(!store.has_any(ALICE));
        assert!(store.ratings(ALICE).is_none());
    }

    #[test]
    fn set_creates_the_record_on_first_use() {
        let mut store = PreferenceStore::default();
        store.set(ALICE, "catan", Preference::WantPlay);
        assert!(store.has_any(ALICE));
        assert!(!store.has_any(BOB));
        assert_eq!(store.get(ALICE, "catan"), Preference::WantPlay);
        assert_eq!(store.get(BOB, "catan"), Preference::Unrated);
    }

    #[test]
    fn an_explicit_unrated_entry_still_counts_as_a_record() {
        let mut store = PreferenceStore::default();
        store.set(ALICE, "catan", Preference::Unrated);
        assert!(store.has_any(ALICE));
        assert_eq!(store.ratings(ALICE).unwrap().len(), 1);
    }

    #[test]
    fn names_are_normalized_on_both_sides() {
        let mut store = PreferenceStore::default();
        store.set(ALICE, "  Catan ", Preference::PrefNot);
        assert_eq!(store.get(ALICE, "CATAN"), Preference::PrefNot);
    }

    #[test]
    fn set_overwrites() {
        let mut store = PreferenceStore::default();
        store.set(ALICE, "catan", Preference::WontPlay);
        store.set(ALICE, "catan", Preference::NoPref);
        assert_eq!(store.get(ALICE, "catan"), Preference::NoPref);
        assert_eq!(store.ratings(ALICE).unwrap().len(), 1);
    }
}
