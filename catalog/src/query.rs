//! The list-screen pipeline: case-insensitive substring filter over a
//! fixed set of text fields, a fixed set of named sort criteria, and a
//! page slice clamped to the result bounds.

use std::ops::Range;
use std::str::FromStr;

use crate::types::Listing;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Named sort criteria for the list screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Title,
    Provider,
    Newest,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Provider => "provider",
            SortKey::Newest => "newest",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortKey::Title),
            "provider" => Ok(SortKey::Provider),
            "newest" => Ok(SortKey::Newest),
            other => Err(format!(
                "unknown sort key: {other} (expected title, provider or newest)"
            )),
        }
    }
}

/// One list-screen query: filter, then sort, then the page slice.
#[derive(Clone, Debug)]
pub struct ListingQuery {
    pub filter: Option<String>,
    pub sort: SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            filter: None,
            sort: SortKey::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListingQuery {
    /// Run the pipeline over a full catalog listing set.
    pub fn apply(&self, listings: &[Listing]) -> Vec<Listing> {
        let mut out: Vec<Listing> = match &self.filter {
            Some(needle) => listings
                .iter()
                .filter(|l| matches_filter(l, needle))
                .cloned()
                .collect(),
            None => listings.to_vec(),
        };
        sort_listings(&mut out, self.sort);
        let range = page_slice(out.len(), self.page, self.page_size);
        out[range].to_vec()
    }
}

/// Case-insensitive substring match over title, provider and description.
pub fn matches_filter(listing: &Listing, needle: &str) -> bool {
    let needle = needle.to_ascii_lowercase();
    [&listing.title, &listing.provider, &listing.description]
        .into_iter()
        .any(|field| field.to_ascii_lowercase().contains(&needle))
}

/// Stable ordering for one of the named criteria, with the listing id as
/// the final tiebreak.
pub fn sort_listings(listings: &mut [Listing], key: SortKey) {
    match key {
        SortKey::Title => listings.sort_by(|a, b| {
            a.title
                .to_ascii_lowercase()
                .cmp(&b.title.to_ascii_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortKey::Provider => listings.sort_by(|a, b| {
            a.provider
                .to_ascii_lowercase()
                .cmp(&b.provider.to_ascii_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        }),
        // Descending by posted_at (string compare OK for RFC3339);
        // listings without a date land at the end.
        SortKey::Newest => listings.sort_by(|a, b| {
            b.posted_at
                .cmp(&a.posted_at)
                .then_with(|| a.id.cmp(&b.id))
        }),
    }
}

/// The slice for `page` of `page_size`, clamped to `[0, total]`. An
/// out-of-range page yields an empty range; a trailing partial page is
/// returned as-is.
pub fn page_slice(total: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: u64, title: &str, provider: &str, posted_at: Option<&str>) -> Listing {
        Listing {
            id,
            title: title.to_string(),
            provider: provider.to_string(),
            description: format!("{title} at {provider}"),
            location: None,
            salary: None,
            employment_type: None,
            requirements: None,
            posted_at: posted_at.map(|s| s.to_string()),
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing(1, "Software Developer", "TechServe", Some("2025-06-01T00:00:00Z")),
            listing(2, "Accounting Staff", "Crestline", Some("2025-07-15T00:00:00Z")),
            listing(3, "Field Technician", "TechServe", None),
            listing(4, "developer advocate", "Northbridge", Some("2025-05-20T00:00:00Z")),
        ]
    }

    #[test]
    fn filter_is_case_insensitive_over_the_fixed_fields() {
        let all = sample();
        let hits: Vec<u64> = all
            .iter()
            .filter(|l| matches_filter(l, "DEVELOPER"))
            .map(|l| l.id)
            .collect();
        assert_eq!(hits, vec![1, 4]);

        // provider and description are searched too
        assert!(matches_filter(&all[2], "techserve"));
        assert!(matches_filter(&all[0], "at techserve"));
        assert!(!matches_filter(&all[1], "developer"));
    }

    #[test]
    fn sort_newest_puts_undated_listings_last() {
        let mut all = sample();
        sort_listings(&mut all, SortKey::Newest);
        let ids: Vec<u64> = all.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1, 4, 3]);
    }

    #[test]
    fn sort_title_ignores_case() {
        let mut all = sample();
        sort_listings(&mut all, SortKey::Title);
        let ids: Vec<u64> = all.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn page_slice_clamps_to_bounds() {
        assert_eq!(page_slice(10, 0, 4), 0..4);
        assert_eq!(page_slice(10, 2, 4), 8..10); // trailing partial page
        assert_eq!(page_slice(10, 3, 4), 10..10); // out of range → empty
        assert_eq!(page_slice(0, 0, 4), 0..0);
        assert_eq!(page_slice(10, usize::MAX, 4), 10..10); // no overflow
    }

    #[test]
    fn query_runs_filter_sort_page_in_order() {
        let all = sample();
        let query = ListingQuery {
            filter: Some("techserve".to_string()),
            sort: SortKey::Title,
            page: 0,
            page_size: 1,
        };
        let out = query.apply(&all);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 3); // "Field Technician" sorts before "Software Developer"

        let page_two = ListingQuery {
            page: 1,
            ..query
        };
        let out = page_two.apply(&all);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }
}
