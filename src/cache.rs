use crate::error::{LochistError, Result};
use crate::history::load::{load_log, LoadOptions, ParsedLog};
use crate::model::EditRecord;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::{debug, info};

/// Bumped whenever the table layout changes.
pub const CACHE_SCHEMA_VERSION: u32 = 2;

/// SQLite snapshot of parsed edit logs, keyed by log path and invalidated
/// when the log's size or modification time changes.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn new<CP: AsRef<Path>, LP: AsRef<Path>>(cache_dir: Option<CP>, log_path: LP) -> Result<Self> {
        let cache_dir = match cache_dir {
            Some(path) => path.as_ref().to_path_buf(),
            None => log_path
                .as_ref()
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(".lochist"),
        };
        std::fs::create_dir_all(&cache_dir)?;
        let db_path = cache_dir.join("cache.db");
        debug!(path = %db_path.display(), "opening cache");
        let conn = Connection::open(&db_path)?;
        let mut cache = Self { conn };
        cache.initialize()?;
        Ok(cache)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS sources (
                path TEXT PRIMARY KEY,
                fingerprint TEXT NOT NULL,
                skipped INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS records (
                source TEXT NOT NULL,
                seq INTEGER NOT NULL,
                commit_id TEXT NOT NULL,
                file TEXT NOT NULL,
                kind TEXT NOT NULL,
                line INTEGER NOT NULL,
                depth INTEGER NOT NULL,
                length INTEGER NOT NULL,
                author TEXT NOT NULL,
                datetime TEXT NOT NULL,
                date TEXT NOT NULL,
                timezone TEXT NOT NULL,
                PRIMARY KEY (source, seq),
                FOREIGN KEY (source) REFERENCES sources(path)
            );
            CREATE INDEX IF NOT EXISTS idx_records_commit ON records(source, commit_id);
            ",
        )?;
        self.check_schema_version()?;
        Ok(())
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            let set_stmt = format!("PRAGMA user_version = {CACHE_SCHEMA_VERSION};");
            self.conn.execute_batch(&set_stmt)?;
        } else if user_version != CACHE_SCHEMA_VERSION as i64 {
            return Err(LochistError::Cache(format!(
                "Schema version mismatch: expected {}, found {}",
                CACHE_SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }

    /// Size and modification time of the log, as stored in `sources`.
    pub fn fingerprint<P: AsRef<Path>>(log_path: P) -> Result<String> {
        let meta = std::fs::metadata(log_path)?;
        let modified = meta
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map_err(|e| LochistError::Cache(format!("Modification time before epoch: {e}")))?;
        Ok(format!("{}:{}", meta.len(), modified.as_nanos()))
    }

    /// Fingerprint of the stored snapshot and how many malformed rows were
    /// dropped when it was imported.
    pub fn stored_snapshot(&self, source: &str) -> Result<Option<(String, usize)>> {
        let entry = self
            .conn
            .query_row(
                "SELECT fingerprint, skipped FROM sources WHERE path = ?",
                params![source],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize)),
            )
            .optional()?;
        Ok(entry)
    }

    pub fn get_records(&self, source: &str) -> Result<Vec<EditRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT commit_id, file, kind, line, depth, length, author, datetime, date, timezone
             FROM records WHERE source = ? ORDER BY seq",
        )?;
        let rows = stmt.query_map(params![source], |row| {
            let datetime: DateTime<FixedOffset> = row.get(7)?;
            let date: NaiveDate = row.get(8)?;
            Ok(EditRecord {
                commit: row.get(0)?,
                file: row.get(1)?,
                kind: row.get(2)?,
                line: row.get(3)?,
                depth: row.get(4)?,
                length: row.get(5)?,
                author: row.get(6)?,
                datetime,
                date,
                timezone: row.get(9)?,
            })
        })?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Replaces the snapshot for `source` in a single transaction.
    pub fn store_records(&mut self, source: &str, fingerprint: &str, log: &ParsedLog) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM records WHERE source = ?", params![source])?;
        tx.execute(
            "INSERT OR REPLACE INTO sources (path, fingerprint, skipped) VALUES (?, ?, ?)",
            params![source, fingerprint, log.skipped as i64],
        )?;

        let mut insert_stmt = tx.prepare(
            "INSERT INTO records (source, seq, commit_id, file, kind, line, depth, length, author, datetime, date, timezone)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )?;
        for (seq, r) in log.records.iter().enumerate() {
            insert_stmt.execute(params![
                source,
                seq as i64,
                r.commit,
                r.file,
                r.kind,
                r.line,
                r.depth,
                r.length,
                r.author,
                r.datetime,
                r.date,
                r.timezone
            ])?;
        }
        drop(insert_stmt);

        tx.commit()?;
        Ok(())
    }

    /// Returns the cached records for `log_path`, importing the CSV when the
    /// snapshot is missing or stale. A snapshot that dropped malformed rows
    /// only serves loads that allow skipping; a strict load re-parses.
    pub fn load_records<P: AsRef<Path>>(&mut self, log_path: P, opts: LoadOptions) -> Result<Vec<EditRecord>> {
        let log_path = log_path.as_ref();
        let source = source_key(log_path)?;
        let fingerprint = Self::fingerprint(log_path)?;

        match self.stored_snapshot(&source)? {
            Some((stored, skipped)) if stored == fingerprint && (skipped == 0 || opts.skip_invalid) => {
                let records = self.get_records(&source)?;
                debug!(source = %source, rows = records.len(), skipped, "cache hit");
                return Ok(records);
            }
            Some((stored, skipped)) if stored == fingerprint => {
                debug!(source = %source, skipped, "snapshot is partial; re-parsing strictly");
            }
            _ => {}
        }

        let log = load_log(log_path, opts)?;
        self.store_records(&source, &fingerprint, &log)?;
        info!(source = %source, rows = log.records.len(), skipped = log.skipped, "imported edit log into cache");
        Ok(log.records)
    }
}

fn source_key(log_path: &Path) -> Result<String> {
    let canonical = std::fs::canonicalize(log_path)?;
    Ok(canonical.to_string_lossy().to_string())
}
