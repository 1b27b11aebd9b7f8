use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{GameRegistry, GobError, PreferenceStore};

const FORMAT_VERSION: u32 = 1;

// On disk everything is one JSON document:
// { "version": 1,
//   "registry": { "games": [...], "properties": { name: { "playercount": { "min": 2, "max": 4 } } } },
//   "preferences": { user id: { name: "wantplay" } } }

#[derive(Serialize)]
struct SaveFileRef<'a> {
    version: u32,
    registry: &'a GameRegistry,
    preferences: &'a PreferenceStore,
}

#[derive(Deserialize)]
struct SaveFile {
    version: u32,
    registry: GameRegistry,
    preferences: PreferenceStore,
}

#[derive(Debug, Clone)]
pub struct DataStore {
    path: PathBuf,
}

impl DataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a fresh install, not an error. A file we cannot
    /// parse is an error, silently starting empty would clobber it on the
    /// next save.
    pub fn load(&self) -> Result<(GameRegistry, PreferenceStore), GobError> {
        if !self.path.exists() {
            log::info!("note: data file {} not found, starting empty", self.path.display());
            return Ok((GameRegistry::default(), PreferenceStore::default()));
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| GobError::Load {
            path: self.path.clone(),
            source,
        })?;
        let data: SaveFile = serde_json::from_str(&raw).map_err(|source| GobError::Load {
            path: self.path.clone(),
            source: source.into(),
        })?;
        if data.version != FORMAT_VERSION {
            return Err(GobError::UnsupportedVersion {
                path: self.path.clone(),
                version: data.version,
            });
        }
        Ok((data.registry, data.preferences))
    }

    /// Rewrites everything unconditionally. Goes through a sibling temp file
    /// and a rename so a crash mid-write never truncates the data.
    pub fn save(&self, registry: &GameRegistry, preferences: &PreferenceStore) -> Result<(), GobError> {
        let data = SaveFileRef {
            version: FORMAT_VERSION,
            registry,
            preferences,
        };
        let raw = serde_json::to_vec_pretty(&data).map_err(|source| GobError::Persistence(source.into()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(GobError::Persistence)?;
        fs::rename(&tmp, &self.path).map_err(GobError::Persistence)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlayerRange, Preference, PropertyKey};
    use serenity::all::UserId;

    fn store_in(dir: &tempfile::TempDir) -> DataStore {
        DataStore::new(dir.path().join("gob.json"))
    }

    #[test]
    fn missing_file_loads_empty_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, preferences) = store_in(&dir).load().unwrap();
        assert!(registry.is_empty());
        assert!(!preferences.has_any(UserId::new(1)));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut registry = GameRegistry::default();
        registry.add("catan").unwrap();
        registry.add("azul").unwrap();
        registry.set_property("catan", PropertyKey::PlayerCount, PlayerRange::new(2, 4).unwrap()).unwrap();
        registry.set_property("catan", PropertyKey::IdealPlayerCount, PlayerRange::new(3, 4).unwrap()).unwrap();
        let mut preferences = PreferenceStore::default();
        preferences.set(UserId::new(7), "catan", Preference::WantPlay);
        preferences.set(UserId::new(7), "azul", Preference::Unrated);

        store.save(&registry, &preferences).unwrap();
        let (loaded_registry, loaded_preferences) = store.load().unwrap();

        assert_eq!(loaded_registry.games().collect::<Vec<_>>(), vec!["azul", "catan"]);
        assert_eq!(loaded_registry.properties("catan"), registry.properties("catan"));
        assert_eq!(loaded_preferences.get(UserId::new(7), "catan"), Preference::WantPlay);
        assert_eq!(loaded_preferences.get(UserId::new(7), "azul"), Preference::Unrated);
        assert!(loaded_preferences.has_any(UserId::new(7)));
    }

    #[test]
    fn unknown_versions_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"version": 99, "registry": {"games": [], "properties": {}}, "preferences": {}}"#).unwrap();
        assert!(matches!(store.load(), Err(GobError::UnsupportedVersion { version: 99, .. })));
    }

    #[test]
    fn garbage_files_are_an_error_not_an_empty_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "definitely not json").unwrap();
        assert!(matches!(store.load(), Err(GobError::Load { .. })));
    }
}
