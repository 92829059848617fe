use std::path::Path;
use std::path::PathBuf;

use super::InterestMap;
use super::InterestStore;
use super::stats_from_map;
use crate::error::StorageError;
use crate::types::InterestKey;
use crate::types::InterestRecord;
use crate::types::ListingKind;

/// File-backed store holding the whole interest map as one JSON object,
/// the single well-known key the portal screens persist under.
#[derive(Debug, Clone)]
pub struct JsonInterestStore {
    path: PathBuf,
}

impl JsonInterestStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_map(&self) -> Result<InterestMap, StorageError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(InterestMap::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        if data.trim().is_empty() {
            return Ok(InterestMap::new());
        }
        let mut map: InterestMap = serde_json::from_str(&data)?;
        let before = map.len();
        for rec in map.values_mut() {
            rec.normalize();
        }
        map.retain(|_, rec| !rec.is_empty());
        if map.len() != before {
            let dropped = before - map.len();
            tracing::debug!("interest store: dropped {dropped} empty records on read");
        }
        Ok(map)
    }

    fn write_map(&self, map: &InterestMap) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }
        let mut data = serde_json::to_string_pretty(map)?;
        data.push('\n');
        std::fs::write(&self.path, data).map_err(|e| StorageError::io(&self.path, e))
    }
}

impl InterestStore for JsonInterestStore {
    fn get(&self, key: &InterestKey) -> Result<Option<InterestRecord>, StorageError> {
        Ok(self.read_map()?.get(key).copied())
    }

    fn put(&self, key: &InterestKey, record: &InterestRecord) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(*key, *record);
        self.write_map(&map)
    }

    fn remove(&self, key: &InterestKey) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    fn list(&self, kind: Option<ListingKind>) -> Result<InterestMap, StorageError> {
        let mut map = self.read_map()?;
        if let Some(kind) = kind {
            map.retain(|k, _| k.kind == kind);
        }
        Ok(map)
    }

    fn export(&self, out: &mut dyn std::io::Write) -> Result<(), StorageError> {
        let map = self.read_map()?;
        let mut data = serde_json::to_string_pretty(&map)?;
        data.push('\n');
        out.write_all(data.as_bytes())
            .map_err(|e| StorageError::io(&self.path, e))
    }

    fn import(&self, input: &mut dyn std::io::Read) -> Result<usize, StorageError> {
        let mut data = String::new();
        input
            .read_to_string(&mut data)
            .map_err(|e| StorageError::io(&self.path, e))?;
        let mut incoming: InterestMap = serde_json::from_str(&data)?;
        for rec in incoming.values_mut() {
            rec.normalize();
        }
        incoming.retain(|_, rec| !rec.is_empty());
        let count = incoming.len();
        // Last writer wins per key; existing records not named in the
        // import are kept.
        let mut map = self.read_map()?;
        map.extend(incoming);
        self.write_map(&map)?;
        Ok(count)
    }

    fn stats(&self) -> Result<serde_json::Value, StorageError> {
        Ok(stats_from_map(&self.read_map()?))
    }
}
