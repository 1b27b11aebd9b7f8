use serenity::all::{MessageId, UserId};

use crate::{GameRegistry, Preference, PreferenceStore};

/// The games a user still has to rate: explicitly-unrated entries that still
/// exist in the registry first, then registry games they never touched.
pub fn unrated_queue(registry: &GameRegistry, preferences: &PreferenceStore, user: UserId) -> Vec<String> {
    match preferences.ratings(user) {
        Some(ratings) => {
            let mut queue: Vec<String> = ratings
                .iter()
                .filter(|(game, rating)| **rating == Preference::Unrated && registry.contains(game))
                .map(|(game, _)| game.clone())
                .collect();
            queue.extend(registry.games().filter(|game| !ratings.contains_key(*game)).map(str::to_owned));
            queue
        }
        None => registry.games().map(str::to_owned).collect(),
    }
}

/// One user's walk through their unrated games. Instances live in
/// `BotState.menus`, keyed by user, so a second menu for the same user cannot
/// exist.
#[derive(Debug)]
pub struct RatingMenu {
    user: UserId,
    message: MessageId,
    current: Option<String>,
}

impl RatingMenu {
    pub fn new(user: UserId, message: MessageId) -> Self {
        Self {
            user,
            message,
            current: None,
        }
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn message(&self) -> MessageId {
        self.message
    }

    pub fn current_game(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Moves on to the next unrated game, or `None` once everything is rated.
    /// Whatever was current before is forgotten, answers never apply to a
    /// game the menu already moved past.
    pub fn advance(&mut self, registry: &GameRegistry, preferences: &PreferenceStore) -> Option<&str> {
        self.current = unrated_queue(registry, preferences, self.user).into_iter().next();
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: UserId = UserId::new(101);
    const MESSAGE: MessageId = MessageId::new(900);

    fn registry_of(names: &[&str]) -> GameRegistry {
        let mut registry = GameRegistry::default();
        for name in names {
            registry.add(name).unwrap();
        }
        registry
    }

    #[test]
    fn queue_lists_every_game_for_a_new_user() {
        let registry = registry_of(&["azul", "catan", "wingspan"]);
        let preferences = PreferenceStore::default();
        assert_eq!(unrated_queue(&registry, &preferences, ALICE), vec!["azul", "catan", "wingspan"]);
    }

    #[test]
    fn queue_puts_explicitly_unrated_before_untouched() {
        let registry = registry_of(&["azul", "catan", "wingspan"]);
        let mut preferences = PreferenceStore::default();
        preferences.set(ALICE, "azul", Preference::WantPlay);
        preferences.set(ALICE, "wingspan", Preference::Unrated);
        // wingspan was explicitly cleared, catan was never touched
        assert_eq!(unrated_queue(&registry, &preferences, ALICE), vec!["wingspan", "catan"]);
    }

    #[test]
    fn queue_skips_orphaned_unrated_entries() {
        let mut registry = registry_of(&["azul", "catan"]);
        let mut preferences = PreferenceStore::default();
        preferences.set(ALICE, "catan", Preference::Unrated);
        registry.remove("catan").unwrap();
        assert_eq!(unrated_queue(&registry, &preferences, ALICE), vec!["azul"]);
    }

    #[test]
    fn walking_the_menu_asks_about_every_game_once() {
        let registry = registry_of(&["azul", "catan", "wingspan"]);
        let mut preferences = PreferenceStore::default();
        let mut menu = RatingMenu::new(ALICE, MESSAGE);

        let mut prompts = Vec::new();
        while let Some(game) = menu.advance(&registry, &preferences).map(str::to_owned) {
            prompts.push(game.clone());
            preferences.set(ALICE, &game, Preference::NoPref);
        }
        assert_eq!(prompts, vec!["azul", "catan", "wingspan"]);
        assert_eq!(menu.current_game(), None);
    }

    #[test]
    fn late_answers_never_change_an_earlier_game() {
        let registry = registry_of(&["azul", "catan"]);
        let mut preferences = PreferenceStore::default();
        let mut menu = RatingMenu::new(ALICE, MESSAGE);

        assert_eq!(menu.advance(&registry, &preferences), Some("azul"));
        preferences.set(ALICE, "azul", Preference::WantPlay);

        // the menu has moved on, a second answer lands on the new current game
        assert_eq!(menu.advance(&registry, &preferences), Some("catan"));
        preferences.set(ALICE, "catan", Preference::WontPlay);

        assert_eq!(preferences.get(ALICE, "azul"), Preference::WantPlay);
        assert_eq!(preferences.get(ALICE, "catan"), Preference::WontPlay);
    }

    #[test]
    fn menu_is_done_immediately_when_everything_is_rated() {
        let registry = registry_of(&["azul"]);
        let mut preferences = PreferenceStore::default();
        preferences.set(ALICE, "azul", Preference::WantPlay);
        let mut menu = RatingMenu::new(ALICE, MESSAGE);
        assert_eq!(menu.advance(&registry, &preferences), None);
    }
}
