//! List/detail view composition: the catalog joined with the interest
//! tracker, run through the filter/sort/page pipeline. Every screen reads
//! through here; rendering stays in the callers.

use jobdesk_catalog::query::ListingQuery;
use jobdesk_catalog::query::matches_filter;
use jobdesk_catalog::query::page_slice;
use jobdesk_catalog::query::sort_listings;
use jobdesk_catalog::source::CatalogSource;
use jobdesk_catalog::types::Listing;
use jobdesk_interest::tracker::InterestTracker;
use jobdesk_interest::types::InterestKey;
use jobdesk_interest::types::InterestRecord;
use jobdesk_interest::window::WindowStatus;

/// One list row: a catalog entry joined with its tracker state.
#[derive(Clone, Debug)]
pub struct ListingRow {
    pub listing: Listing,
    pub saved: bool,
    pub applied: bool,
}

/// Which tracker-state slice of the catalog a list screen shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListScope {
    #[default]
    All,
    Saved,
    Applied,
}

/// List screen over one catalog kind.
pub struct ListingsView<'a> {
    catalog: &'a dyn CatalogSource,
    tracker: &'a InterestTracker,
}

impl<'a> ListingsView<'a> {
    pub fn new(catalog: &'a dyn CatalogSource, tracker: &'a InterestTracker) -> Self {
        Self { catalog, tracker }
    }

    /// Filter → sort → join with the tracker → scope → page slice.
    /// The scope cut happens before pagination so "Saved" and
    /// "Applications" pages number their own results.
    pub fn rows(&self, scope: ListScope, query: &ListingQuery) -> anyhow::Result<Vec<ListingRow>> {
        let mut listings = self.catalog.list()?;
        if let Some(needle) = &query.filter {
            listings.retain(|l| matches_filter(l, needle));
        }
        sort_listings(&mut listings, query.sort);

        let snapshot = self.tracker.snapshot()?;
        let kind = self.catalog.kind();
        let mut rows: Vec<ListingRow> = listings
            .into_iter()
            .map(|listing| {
                let record = snapshot.get(&InterestKey::new(kind, listing.id));
                ListingRow {
                    saved: record.is_some_and(|r| r.saved),
                    applied: record.is_some_and(|r| r.applied),
                    listing,
                }
            })
            .collect();
        match scope {
            ListScope::All => {}
            ListScope::Saved => rows.retain(|r| r.saved),
            ListScope::Applied => rows.retain(|r| r.applied),
        }
        let range = page_slice(rows.len(), query.page, query.page_size);
        Ok(rows[range].to_vec())
    }
}

/// Detail screen composition for one listing.
#[derive(Clone, Debug)]
pub struct ListingDetail {
    pub listing: Listing,
    pub record: Option<InterestRecord>,
    pub window: WindowStatus,
}

/// Join one catalog entry with its record and the evaluated withdrawal
/// window. `Ok(None)` when the id is not in the catalog.
pub fn detail(
    catalog: &dyn CatalogSource,
    tracker: &InterestTracker,
    id: u64,
) -> anyhow::Result<Option<ListingDetail>> {
    let Some(listing) = catalog.get(id)? else {
        return Ok(None);
    };
    let kind = catalog.kind();
    let record = tracker.record(kind, id)?;
    let window = tracker.window_status(kind, id)?;
    Ok(Some(ListingDetail {
        listing,
        record,
        window,
    }))
}
