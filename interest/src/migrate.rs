/// Migrate a JSON interest-map file into a SQLite database file.
///
/// - `json_path`: source file holding one JSON object (key → record)
/// - `sqlite_path`: destination SQLite DB (created if missing)
///
/// Returns the count of imported records.
#[cfg(feature = "sqlite")]
pub fn migrate_json_to_sqlite(
    json_path: &std::path::Path,
    sqlite_path: &std::path::Path,
) -> anyhow::Result<usize> {
    use std::io::Read as _;

    use crate::store::InterestStore;
    use crate::store::sqlite::SqliteInterestStore;

    let mut data = String::new();
    std::fs::File::open(json_path)?.read_to_string(&mut data)?;

    let store = SqliteInterestStore::new(sqlite_path);
    let mut cursor = std::io::Cursor::new(data);
    Ok(store.import(&mut cursor)?)
}

#[cfg(not(feature = "sqlite"))]
pub fn migrate_json_to_sqlite(
    _json_path: &std::path::Path,
    _sqlite_path: &std::path::Path,
) -> anyhow::Result<usize> {
    anyhow::bail!("sqlite backend not compiled; enable with `--features jobdesk-interest/sqlite`");
}
