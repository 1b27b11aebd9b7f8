use std::collections::HashMap;

use serenity::all::UserId;

use crate::{DataStore, GameRegistry, GobError, PreferenceStore, RatingMenu};

/// Everything the bot knows, loaded once at startup and owned by the event
/// handler behind a single lock. Commands get a `&mut BotState` for the
/// duration of one event, so reads and writes never interleave.
pub struct BotState {
    pub registry: GameRegistry,
    pub preferences: PreferenceStore,
    pub menus: HashMap<UserId, RatingMenu>,
    store: DataStore,
}

impl BotState {
    pub fn load(store: DataStore) -> Result<Self, GobError> {
        let (registry, preferences) = store.load()?;
        Ok(Self {
            registry,
            preferences,
            menus: HashMap::new(),
            store,
        })
    }

    /// Called after every mutating command. The failure detail goes to the
    /// log, the caller gets the generic persistence error to show the user;
    /// in-memory state stays as mutated either way.
    pub fn save(&self) -> Result<(), GobError> {
        if let Err(e) = self.store.save(&self.registry, &self.preferences) {
            log::error!("error saving data to {}: {:?}", self.store.path().display(), e);
            return Err(e);
        }
        Ok(())
    }

    /// One menu per user. Opening a second one is refused rather than
    /// detected later, duplicates cannot exist in this table.
    pub fn begin_menu(&mut self, menu: RatingMenu) -> Result<(), GobError> {
        if self.menus.contains_key(&menu.user()) {
            return Err(GobError::MenuAlreadyActive);
        }
        self.menus.insert(menu.user(), menu);
        Ok(())
    }

    pub fn end_menu(&mut self, user: UserId) {
        self.menus.remove(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Preference;
    use serenity::all::MessageId;

    const ALICE: UserId = UserId::new(101);

    fn fresh_state(dir: &tempfile::TempDir) -> BotState {
        BotState::load(DataStore::new(dir.path().join("gob.json"))).unwrap()
    }

    #[test]
    fn duplicate_menus_are_refused_at_creation() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fresh_state(&dir);
        state.begin_menu(RatingMenu::new(ALICE, MessageId::new(1))).unwrap();
        assert!(matches!(state.begin_menu(RatingMenu::new(ALICE, MessageId::new(2))), Err(GobError::MenuAlreadyActive)));
        state.end_menu(ALICE);
        state.begin_menu(RatingMenu::new(ALICE, MessageId::new(3))).unwrap();
    }

    #[test]
    fn state_survives_a_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fresh_state(&dir);
        state.registry.add("catan").unwrap();
        state.preferences.set(ALICE, "catan", Preference::WantPlay);
        state.save().unwrap();

        let reloaded = fresh_state(&dir);
        assert!(reloaded.registry.contains("catan"));
        assert_eq!(reloaded.preferences.get(ALICE, "catan"), Preference::WantPlay);
        assert!(reloaded.menus.is_empty());
    }
}
