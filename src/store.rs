use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// A persistent string-keyed store with JSON values.
///
/// Thin wrapper around sled: `set` serializes and overwrites, `get`
/// deserializes. A missing key and a corrupt payload look the same to the
/// caller (`None`); corruption is logged and never raised, so a bad record
/// degrades to "nothing stored" instead of breaking the host page.
pub struct KvStore {
    db: sled::Db,
}

impl KvStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(KvStore { db })
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let payload = serde_json::to_vec(value)?;
        self.db.insert(key, payload)?;

        // block until the write is stable on disk
        self.db.flush()?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.db.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("store: read of {key:?} failed: {e}");
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("store: discarding corrupt payload for {key:?}: {e}");
                None
            }
        }
    }
}
