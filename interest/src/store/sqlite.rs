use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

use super::InterestMap;
use super::InterestStore;
use super::stats_from_map;
use crate::error::StorageError;
use crate::types::InterestKey;
use crate::types::InterestRecord;
use crate::types::ListingKind;

fn init_db(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        CREATE TABLE IF NOT EXISTS interest_records (
            key TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            saved INTEGER NOT NULL,
            applied INTEGER NOT NULL,
            applied_at_ms INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_interest_kind ON interest_records(kind);
        "#,
    )?;
    Ok(())
}

fn open_conn(path: &std::path::Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<(InterestKey, InterestRecord)> {
    use rusqlite::types::Type;
    let key_s: String = row.get(0)?;
    let key = InterestKey::try_from(key_s).map_err(|msg| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, msg)),
        )
    })?;
    let mut record = InterestRecord {
        saved: row.get::<_, i64>(2)? != 0,
        applied: row.get::<_, i64>(3)? != 0,
        applied_at_ms: row.get::<_, Option<i64>>(4)?,
    };
    record.normalize();
    Ok((key, record))
}

const UPSERT_SQL: &str = "INSERT INTO interest_records (key, kind, saved, applied, applied_at_ms)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT(key) DO UPDATE SET
            kind=excluded.kind,
            saved=excluded.saved,
            applied=excluded.applied,
            applied_at_ms=excluded.applied_at_ms";

/// SQLite-backed interest store, one row per composite key.
#[derive(Debug, Clone)]
pub struct SqliteInterestStore {
    path: std::path::PathBuf,
}

impl SqliteInterestStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_map(&self, kind: Option<ListingKind>) -> Result<InterestMap, StorageError> {
        let conn = open_conn(&self.path)?;
        let base = "SELECT key, kind, saved, applied, applied_at_ms FROM interest_records";
        let mut out = InterestMap::new();
        let mut insert = |row: &rusqlite::Row<'_>| -> rusqlite::Result<()> {
            let (key, record) = row_to_entry(row)?;
            if !record.is_empty() {
                out.insert(key, record);
            }
            Ok(())
        };
        match kind {
            None => {
                let mut stmt = conn.prepare(base)?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    insert(row)?;
                }
            }
            Some(kind) => {
                let sql = format!("{base} WHERE kind = ?1");
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query(params![kind.as_str()])?;
                while let Some(row) = rows.next()? {
                    insert(row)?;
                }
            }
        }
        Ok(out)
    }
}

impl InterestStore for SqliteInterestStore {
    fn get(&self, key: &InterestKey) -> Result<Option<InterestRecord>, StorageError> {
        let conn = open_conn(&self.path)?;
        let entry = conn
            .query_row(
                "SELECT key, kind, saved, applied, applied_at_ms
                 FROM interest_records WHERE key=?1",
                params![key.to_string()],
                row_to_entry,
            )
            .optional()?;
        Ok(entry.map(|(_, record)| record))
    }

    fn put(&self, key: &InterestKey, record: &InterestRecord) -> Result<(), StorageError> {
        let conn = open_conn(&self.path)?;
        conn.execute(
            UPSERT_SQL,
            params![
                key.to_string(),
                key.kind.as_str(),
                record.saved as i64,
                record.applied as i64,
                record.applied_at_ms,
            ],
        )?;
        Ok(())
    }

    fn remove(&self, key: &InterestKey) -> Result<(), StorageError> {
        let conn = open_conn(&self.path)?;
        conn.execute(
            "DELETE FROM interest_records WHERE key=?1",
            params![key.to_string()],
        )?;
        Ok(())
    }

    fn list(&self, kind: Option<ListingKind>) -> Result<InterestMap, StorageError> {
        self.read_map(kind)
    }

    fn export(&self, out: &mut dyn std::io::Write) -> Result<(), StorageError> {
        let map = self.read_map(None)?;
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
        let mut conn = open_conn(&self.path)?;
        let tx = conn.transaction()?;
        let mut count = 0usize;
        for (key, record) in &incoming {
            tx.execute(
                UPSERT_SQL,
                params![
                    key.to_string(),
                    key.kind.as_str(),
                    record.saved as i64,
                    record.applied as i64,
                    record.applied_at_ms,
                ],
            )?;
            count += 1;
        }
        tx.commit()?;
        Ok(count)
    }

    fn stats(&self) -> Result<serde_json::Value, StorageError> {
        Ok(stats_from_map(&self.read_map(None)?))
    }
}
