use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::GobError;

/// Trimmed + lowercased names are the only game identity there is.
pub fn normalize_game_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRange {
    min: u32,
    max: u32,
}

impl PlayerRange {
    pub fn new(min: i64, max: i64) -> Result<Self, GobError> {
        if min < 1 || max < min || max > i64::from(u32::MAX) {
            return Err(GobError::InvalidPlayerRange { min, max });
        }
        Ok(Self {
            min: min as u32,
            max: max as u32,
        })
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min as usize..=self.max as usize).contains(&count)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl std::fmt::Display for PlayerRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey {
    PlayerCount,
    IdealPlayerCount,
}

impl PropertyKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKey::PlayerCount => "playercount",
            PropertyKey::IdealPlayerCount => "idealplayercount",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProperties {
    #[serde(rename = "playercount", default, skip_serializing_if = "Option::is_none")]
    pub player_count: Option<PlayerRange>,
    #[serde(rename = "idealplayercount", default, skip_serializing_if = "Option::is_none")]
    pub ideal_player_count: Option<PlayerRange>,
}

impl GameProperties {
    pub fn is_empty(&self) -> bool {
        self.player_count.is_none() && self.ideal_player_count.is_none()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GameRegistry {
    games: BTreeSet<String>,
    properties: BTreeMap<String, GameProperties>,
}

impl GameRegistry {
    pub fn add(&mut self, name: &str) -> Result<String, GobError> {
        let name = normalize_game_name(name);
        if name.is_empty() {
            return Err(GobError::EmptyGameName);
        }
        if self.games.contains(&name) {
            return Err(GobError::GameAlreadyExists(name));
        }
        self.games.insert(name.clone());
        Ok(name)
    }

    /// Removes the name only. Properties and preferences recorded for it are
    /// left behind, orphans are accepted.
    pub fn remove(&mut self, name: &str) -> Result<String, GobError> {
        let name = normalize_game_name(name);
        if !self.games.remove(&name) {
            return Err(GobError::GameNotFound(name));
        }
        Ok(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.games.contains(&normalize_game_name(name))
    }

    /// Normalizes and checks in one go, the error already carries the name.
    pub fn validate(&self, name: &str) -> Result<String, GobError> {
        let name = normalize_game_name(name);
        if self.games.contains(&name) {
            Ok(name)
        } else {
            Err(GobError::GameNotFound(name))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Names iterate in sorted order, which keeps list and suggestion output
    /// deterministic.
    pub fn games(&self) -> impl Iterator<Item = &str> {
        self.games.iter().map(String::as_str)
    }

    pub fn set_property(&mut self, name: &str, key: PropertyKey, range: PlayerRange) -> Result<String, GobError> {
        let name = self.validate(name)?;
        let properties = self.properties.entry(name.clone()).or_default();
        match key {
            PropertyKey::PlayerCount => properties.player_count = Some(range),
            PropertyKey::IdealPlayerCount => properties.ideal_player_count = Some(range),
        }
        Ok(name)
    }

    pub fn properties(&self, name: &str) -> Option<&GameProperties> {
        self.properties.get(&normalize_game_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_normalizes_and_rejects_duplicates() {
        let mut registry = GameRegistry::default();
        assert_eq!(registry.add("  Catan ").unwrap(), "catan");
        assert!(matches!(registry.add("CATAN"), Err(GobError::GameAlreadyExists(name)) if name == "catan"));
        assert!(registry.contains("catan"));
        assert!(registry.contains("Catan  "));
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut registry = GameRegistry::default();
        assert!(matches!(registry.add("   "), Err(GobError::EmptyGameName)));
    }

    #[test]
    fn remove_requires_presence() {
        let mut registry = GameRegistry::default();
        assert!(matches!(registry.remove("catan"), Err(GobError::GameNotFound(_))));
        registry.add("catan").unwrap();
        assert_eq!(registry.remove("Catan").unwrap(), "catan");
        assert!(!registry.contains("catan"));
    }

    #[test]
    fn removing_a_game_keeps_its_properties() {
        let mut registry = GameRegistry::default();
        registry.add("catan").unwrap();
        registry.set_property("catan", PropertyKey::PlayerCount, PlayerRange::new(2, 4).unwrap()).unwrap();
        registry.remove("catan").unwrap();
        assert!(registry.properties("catan").is_some());
    }

    #[test]
    fn games_iterate_sorted() {
        let mut registry = GameRegistry::default();
        registry.add("wingspan").unwrap();
        registry.add("azul").unwrap();
        registry.add("catan").unwrap();
        let names: Vec<&str> = registry.games().collect();
        assert_eq!(names, vec!["azul", "catan", "wingspan"]);
    }

    #[test]
    fn properties_require_a_known_game() {
        let mut registry = GameRegistry::default();
        let range = PlayerRange::new(2, 4).unwrap();
        assert!(matches!(registry.set_property("catan", PropertyKey::PlayerCount, range), Err(GobError::GameNotFound(_))));
    }

    #[test]
    fn set_property_overwrites() {
        let mut registry = GameRegistry::default();
        registry.add("catan").unwrap();
        registry.set_property("catan", PropertyKey::PlayerCount, PlayerRange::new(2, 4).unwrap()).unwrap();
        registry.set_property("catan", PropertyKey::PlayerCount, PlayerRange::new(3, 6).unwrap()).unwrap();
        let properties = registry.properties("catan").unwrap();
        assert_eq!(properties.player_count, Some(PlayerRange::new(3, 6).unwrap()));
        assert_eq!(properties.ideal_player_count, None);
    }

    #[test]
    fn ranges_must_be_ordered_and_positive() {
        assert!(matches!(PlayerRange::new(0, 4), Err(GobError::InvalidPlayerRange { .. })));
        assert!(matches!(PlayerRange::new(3, 2), Err(GobError::InvalidPlayerRange { .. })));
        assert!(matches!(PlayerRange::new(-1, 2), Err(GobError::InvalidPlayerRange { .. })));
        let range = PlayerRange::new(2, 2).unwrap();
        assert!(range.contains(2));
        assert!(!range.contains(1));
        assert!(!range.contains(3));
    }
}
