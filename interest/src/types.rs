use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Catalog a listing belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Job,
    Training,
    Scholarship,
}

impl ListingKind {
    pub const ALL: [ListingKind; 3] = [
        ListingKind::Job,
        ListingKind::Training,
        ListingKind::Scholarship,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ListingKind::Job => "job",
            ListingKind::Training => "training",
            ListingKind::Scholarship => "scholarship",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job" => Ok(ListingKind::Job),
            "training" => Ok(ListingKind::Training),
            "scholarship" => Ok(ListingKind::Scholarship),
            other => Err(format!(
                "unknown listing kind: {other} (expected job, training or scholarship)"
            )),
        }
    }
}

/// Composite key `"<kind>-<listingId>"` identifying one listing's record.
///
/// Serializes as that string; it is the map key in the persisted JSON
/// object.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct InterestKey {
    pub kind: ListingKind,
    pub id: u64,
}

impl InterestKey {
    pub fn new(kind: ListingKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for InterestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind;
        let id = self.id;
        write!(f, "{kind}-{id}")
    }
}

impl From<InterestKey> for String {
    fn from(key: InterestKey) -> String {
        key.to_string()
    }
}

impl TryFrom<String> for InterestKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let Some((kind, id)) = s.split_once('-') else {
            return Err(format!("malformed interest key: {s}"));
        };
        let kind: ListingKind = kind.parse()?;
        let id: u64 = id
            .parse()
            .map_err(|_| format!("malformed listing id in interest key: {s}"))?;
        Ok(InterestKey { kind, id })
    }
}

/// Per-listing interest state.
///
/// Invariant: `applied_at_ms` is present if and only if `applied` is true.
/// Stored data that violates it is repaired by [`InterestRecord::normalize`]
/// on read rather than failing the whole load.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterestRecord {
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub applied: bool,
    /// Wall-clock time of the application, epoch milliseconds.
    #[serde(default)]
    pub applied_at_ms: Option<i64>,
}

impl InterestRecord {
    /// Repair the applied/applied_at_ms invariant in place: an applied flag
    /// without a timestamp is demoted to not-applied, a stray timestamp
    /// without the flag is dropped.
    pub fn normalize(&mut self) {
        if self.applied && self.applied_at_ms.is_none() {
            self.applied = false;
        }
        if !self.applied {
            self.applied_at_ms = None;
        }
    }

    /// A record carrying no interest at all; the store drops these.
    pub fn is_empty(&self) -> bool {
        !self.saved && !self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_as_string() {
        let key = InterestKey::new(ListingKind::Job, 42);
        assert_eq!(key.to_string(), "job-42");
        assert_eq!(InterestKey::try_from("job-42".to_string()).unwrap(), key);
    }

    #[test]
    fn key_rejects_garbage() {
        assert!(InterestKey::try_from("job42".to_string()).is_err());
        assert!(InterestKey::try_from("internship-1".to_string()).is_err());
        assert!(InterestKey::try_from("job-x".to_string()).is_err());
    }

    #[test]
    fn normalize_repairs_invariant() {
        let mut rec = InterestRecord {
            saved: false,
            applied: true,
            applied_at_ms: None,
        };
        rec.normalize();
        assert!(!rec.applied);
        assert!(rec.is_empty());

        let mut rec = InterestRecord {
            saved: true,
            applied: false,
            applied_at_ms: Some(1_000),
        };
        rec.normalize();
        assert_eq!(rec.applied_at_ms, None);
        assert!(!rec.is_empty());
    }
}
