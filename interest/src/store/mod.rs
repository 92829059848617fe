use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::types::InterestKey;
use crate::types::InterestRecord;
use crate::types::ListingKind;

/// The full persisted map: composite key → record.
pub type InterestMap = BTreeMap<InterestKey, InterestRecord>;

/// Durable mapping from composite key to interest record, shared across
/// all list/detail screens.
///
/// A missing key reads as `Ok(None)`; "no interest yet" is not an error.
pub trait InterestStore: Send + Sync {
    fn get(&self, key: &InterestKey) -> Result<Option<InterestRecord>, StorageError>;
    fn put(&self, key: &InterestKey, record: &InterestRecord) -> Result<(), StorageError>;
    fn remove(&self, key: &InterestKey) -> Result<(), StorageError>;
    fn list(&self, kind: Option<ListingKind>) -> Result<InterestMap, StorageError>;
    fn export(&self, out: &mut dyn std::io::Write) -> Result<(), StorageError>;
    fn import(&self, input: &mut dyn std::io::Read) -> Result<usize, StorageError>;
    fn stats(&self) -> Result<serde_json::Value, StorageError>;
}

/// Stats shape shared by the backends.
pub(crate) fn stats_from_map(map: &InterestMap) -> serde_json::Value {
    let saved = map.values().filter(|r| r.saved).count();
    let applied = map.values().filter(|r| r.applied).count();
    let by_kind = {
        let mut m = serde_json::Map::new();
        for kind in ListingKind::ALL {
            let saved = map
                .iter()
                .filter(|(k, r)| k.kind == kind && r.saved)
                .count();
            let applied = map
                .iter()
                .filter(|(k, r)| k.kind == kind && r.applied)
                .count();
            m.insert(
                kind.as_str().to_string(),
                serde_json::json!({ "saved": saved, "applied": applied }),
            );
        }
        serde_json::Value::Object(m)
    };
    serde_json::json!({
        "total": map.len(),
        "saved": saved,
        "applied": applied,
        "by_kind": by_kind,
    })
}

pub mod json;

#[cfg(feature = "sqlite")]
pub mod sqlite;
