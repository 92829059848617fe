use std::path::Path;
use std::path::PathBuf;

use crate::store::InterestStore;
use crate::store::json::JsonInterestStore;

#[cfg(feature = "sqlite")]
use crate::store::sqlite::SqliteInterestStore;

/// Backend selection for interest persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Json,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Choose backend using env `JOBDESK_INTEREST_BACKEND` if present: `sqlite`
/// or `json`. Defaults to JSON; if `sqlite` is requested but not compiled
/// in, falls back to JSON.
pub fn choose_backend_from_env() -> Backend {
    let v = std::env::var("JOBDESK_INTEREST_BACKEND").unwrap_or_default();
    match v.as_str() {
        #[cfg(feature = "sqlite")]
        "sqlite" | "SQLITE" => Backend::Sqlite,
        _ => Backend::Json,
    }
}

/// Build a store rooted under `<data_dir>/.jobdesk/interest/`.
/// Paths can be overridden via env:
/// - `JOBDESK_INTEREST_JSON` for the JSON map file path
/// - `JOBDESK_INTEREST_DB` for the SQLite file path
pub fn open_store(
    data_dir: &Path,
    backend: Option<Backend>,
) -> anyhow::Result<Box<dyn InterestStore>> {
    let base = data_dir.join(".jobdesk").join("interest");
    let be = backend.unwrap_or_else(choose_backend_from_env);
    Ok(match be {
        Backend::Json => {
            let path = std::env::var("JOBDESK_INTEREST_JSON")
                .map(PathBuf::from)
                .unwrap_or_else(|_| base.join("interests.json"));
            Box::new(JsonInterestStore::new(path))
        }
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let path = std::env::var("JOBDESK_INTEREST_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| base.join("interests.db"));
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            Box::new(SqliteInterestStore::new(path))
        }
    })
}
