use std::path::Path;

use jobdesk_interest::types::ListingKind;
use serde::Deserialize;
use serde::Serialize;

use crate::fixtures;
use crate::types::Listing;

/// Injected listing source, so the same views and tracker logic work
/// whether the catalog is static demo data or a file standing in for a
/// live backend.
pub trait CatalogSource: Send + Sync {
    fn kind(&self) -> ListingKind;
    fn list(&self) -> anyhow::Result<Vec<Listing>>;
    fn get(&self, id: u64) -> anyhow::Result<Option<Listing>>;
}

/// In-memory catalog for one listing kind.
pub struct StaticCatalog {
    kind: ListingKind,
    listings: Vec<Listing>,
}

impl StaticCatalog {
    pub fn new(kind: ListingKind, listings: Vec<Listing>) -> Self {
        Self { kind, listings }
    }

    /// Catalog seeded with the built-in demo listings for `kind`.
    pub fn demo(kind: ListingKind) -> Self {
        Self::new(kind, fixtures::demo_listings(kind))
    }

    /// Catalog loaded from a JSON catalog file (one object keyed by kind).
    pub fn from_file(path: &Path, kind: ListingKind) -> anyhow::Result<Self> {
        let file = CatalogFile::load(path)?;
        Ok(Self::new(kind, file.listings(kind).to_vec()))
    }
}

impl CatalogSource for StaticCatalog {
    fn kind(&self) -> ListingKind {
        self.kind
    }

    fn list(&self) -> anyhow::Result<Vec<Listing>> {
        Ok(self.listings.clone())
    }

    fn get(&self, id: u64) -> anyhow::Result<Option<Listing>> {
        Ok(self.listings.iter().find(|l| l.id == id).cloned())
    }
}

/// On-disk catalog shape: one JSON object with a listing array per kind.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub jobs: Vec<Listing>,
    #[serde(default)]
    pub trainings: Vec<Listing>,
    #[serde(default)]
    pub scholarships: Vec<Listing>,
}

impl CatalogFile {
    pub fn load(path: &Path) -> anyhow::Result<CatalogFile> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read catalog {}: {e}", path.display()))?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn listings(&self, kind: ListingKind) -> &[Listing] {
        match kind {
            ListingKind::Job => &self.jobs,
            ListingKind::Training => &self.trainings,
            ListingKind::Scholarship => &self.scholarships,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalogs_are_seeded_per_kind() {
        for kind in ListingKind::ALL {
            let catalog = StaticCatalog::demo(kind);
            let listings = catalog.list().unwrap();
            assert!(!listings.is_empty());
            assert_eq!(catalog.kind(), kind);
            let first = &listings[0];
            assert_eq!(catalog.get(first.id).unwrap().as_ref(), Some(first));
        }
    }

    #[test]
    fn missing_id_reads_as_none() {
        let catalog = StaticCatalog::demo(ListingKind::Job);
        assert_eq!(catalog.get(u64::MAX).unwrap(), None);
    }

    #[test]
    fn catalog_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let file = CatalogFile {
            jobs: crate::fixtures::demo_listings(ListingKind::Job),
            trainings: Vec::new(),
            scholarships: Vec::new(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&file).unwrap()).unwrap();

        let catalog = StaticCatalog::from_file(&path, ListingKind::Job).unwrap();
        assert_eq!(catalog.list().unwrap(), file.jobs);
        // kinds absent from the file read as empty catalogs
        let trainings = StaticCatalog::from_file(&path, ListingKind::Training).unwrap();
        assert!(trainings.list().unwrap().is_empty());
    }
}
