//! Listing catalogs for the employment-portal screens: the listing type,
//! injectable catalog sources (demo fixtures or a JSON file), and the
//! filter/sort/pagination pipeline the list screens run.

pub mod fixtures;
pub mod query;
pub mod source;
pub mod types;
