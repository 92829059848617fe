use serde::Deserialize;
use serde::Serialize;

/// One catalog posting: a job, training, or scholarship.
///
/// The identifier is unique within its catalog kind. Listings are
/// immutable from the tracker's perspective; whatever supplies the
/// catalog owns them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub id: u64,
    pub title: String,
    pub provider: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    /// RFC3339; drives the `newest` sort. Missing dates sort last.
    #[serde(default)]
    pub posted_at: Option<String>,
}
