use std::path::{Path, PathBuf};

use log::warn;
use sled::IVec;

use super::errors::ProgressionError;
use super::types::{Player, QuestLog};

const TREE_SNAPSHOTS: &str = "shadowquest";

/// Key used when none is configured.
pub const DEFAULT_SNAPSHOT_KEY: &str = "player";

/// Load/save contract for the progression snapshot.
///
/// `Ok(None)` means "no saved state"; callers then start from a fresh player.
pub trait SnapshotStore {
    fn load_player(&self) -> Result<Option<Player>, ProgressionError>;
    fn save_player(&self, player: &Player) -> Result<(), ProgressionError>;
    fn load_quest_log(&self) -> Result<Option<QuestLog>, ProgressionError>;
    fn save_quest_log(&self, quests: &QuestLog) -> Result<(), ProgressionError>;
    /// Forget everything saved under this store's key.
    fn clear(&self) -> Result<(), ProgressionError>;
}

/// Builder so tests can create throwaway stores with custom paths and keys.
pub struct SledSnapshotStoreBuilder {
    path: PathBuf,
    key: String,
}

impl SledSnapshotStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn open(self) -> Result<SledSnapshotStore, ProgressionError> {
        SledSnapshotStore::open_with_key(self.path, self.key)
    }
}

/// Sled-backed snapshot store. The player and quest log are JSON documents
/// under `<key>` and `<key>:quests`.
pub struct SledSnapshotStore {
    _db: sled::Db,
    snapshots: sled::Tree,
    key: String,
}

impl SledSnapshotStore {
    fn open_with_key<P: AsRef<Path>>(path: P, key: String) -> Result<Self, ProgressionError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let snapshots = db.open_tree(TREE_SNAPSHOTS)?;
        Ok(Self {
            _db: db,
            snapshots,
            key,
        })
    }

    fn quest_log_key(&self) -> String {
        format!("{}:quests", self.key)
    }

    fn put<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), ProgressionError> {
        let bytes = serde_json::to_vec(value)?;
        self.snapshots.insert(key.as_bytes(), bytes)?;
        self.snapshots.flush()?;
        Ok(())
    }

    /// A missing record is `None`; so is one that no longer decodes.
    fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ProgressionError> {
        let Some(bytes) = self.snapshots.get(key.as_bytes())? else {
            return Ok(None);
        };
        Ok(Self::decode(key, bytes))
    }

    fn decode<T: serde::de::DeserializeOwned>(key: &str, bytes: IVec) -> Option<T> {
        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("discarding malformed snapshot '{}': {}", key, e);
                None
            }
        }
    }

    /// Raw write, used to exercise the malformed-record path.
    #[cfg(test)]
    fn put_raw(&self, key: &str, bytes: &[u8]) -> Result<(), ProgressionError> {
        self.snapshots.insert(key.as_bytes(), bytes)?;
        Ok(())
    }
}

impl SnapshotStore for SledSnapshotStore {
    fn load_player(&self) -> Result<Option<Player>, ProgressionError> {
        self.get(&self.key)
    }

    fn save_player(&self, player: &Player) -> Result<(), ProgressionError> {
        self.put(&self.key, player)
    }

    fn load_quest_log(&self) -> Result<Option<QuestLog>, ProgressionError> {
        self.get(&self.quest_log_key())
    }

    fn save_quest_log(&self, quests: &QuestLog) -> Result<(), ProgressionError> {
        self.put(&self.quest_log_key(), quests)
    }

    fn clear(&self) -> Result<(), ProgressionError> {
        self.snapshots.remove(self.key.as_bytes())?;
        self.snapshots.remove(self.quest_log_key().as_bytes())?;
        self.snapshots.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::types::ShadowRank;
    use tempfile::TempDir;

    #[test]
    fn test_empty_store_has_no_saved_state() {
        let dir = TempDir::new().expect("tempdir");
        let store = SledSnapshotStoreBuilder::new(dir.path()).open().expect("store");
        assert!(store.load_player().expect("load").is_none());
        assert!(store.load_quest_log().expect("load").is_none());
    }

    #[test]
    fn test_player_round_trip() {
        let dir = TempDir::new().expect("tempdir");
        let store = SledSnapshotStoreBuilder::new(dir.path()).open().expect("store");
        let mut player = Player::new("Jin-Woo");
        player.level = 7;
        player.shadow_points = 120;
        player.shadow_rank = ShadowRank::SS;
        store.save_player(&player).expect("save");
        assert_eq!(store.load_player().expect("load"), Some(player));
    }

    #[test]
    fn test_malformed_record_is_treated_as_missing() {
        let dir = TempDir::new().expect("tempdir");
        let store = SledSnapshotStoreBuilder::new(dir.path())
            .with_key("save")
            .open()
            .expect("store");
        store.put_raw("save", b"{not json").expect("raw");
        store.put_raw("save:quests", b"[1,2,3]").expect("raw");
        assert!(store.load_player().expect("load").is_none());
        assert!(store.load_quest_log().expect("load").is_none());
    }

    #[test]
    fn test_keys_are_isolated_and_clear_removes_both() {
        let dir = TempDir::new().expect("tempdir");
        let store = SledSnapshotStoreBuilder::new(dir.path())
            .with_key("a")
            .open()
            .expect("store");
        store.save_player(&Player::default()).expect("save");
        store.save_quest_log(&QuestLog::default()).expect("save");
        drop(store);

        let other = SledSnapshotStoreBuilder::new(dir.path())
            .with_key("b")
            .open()
            .expect("store");
        assert!(other.load_player().expect("load").is_none());
        drop(other);

        let store = SledSnapshotStoreBuilder::new(dir.path())
            .with_key("a")
            .open()
            .expect("store");
        assert!(store.load_player().expect("load").is_some());
        store.clear().expect("clear");
        assert!(store.load_player().expect("load").is_none());
        assert!(store.load_quest_log().expect("load").is_none());
    }
}
