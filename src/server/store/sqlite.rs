use std::{fs, path::Path, sync::Mutex};

use chrono::DateTime;
use rusqlite::{Connection, params};
use uuid::Uuid;

use super::{ContactRepository, ScoreRepository, StoreError, new_entry, new_message};
use crate::leaderboard::{LeaderboardEntry, NewScore};
use crate::server::contact::{ContactMessage, NewContact};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS dino_scores (
        seq         INTEGER PRIMARY KEY AUTOINCREMENT,
        id          TEXT NOT NULL UNIQUE,
        player_name TEXT NOT NULL,
        score       INTEGER NOT NULL,
        created_at  INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_dino_scores_rank
        ON dino_scores(score DESC, created_at ASC, seq ASC);
    CREATE TABLE IF NOT EXISTS contact_messages (
        seq        INTEGER PRIMARY KEY AUTOINCREMENT,
        id         TEXT NOT NULL UNIQUE,
        name       TEXT NOT NULL,
        email      TEXT NOT NULL,
        message    TEXT NOT NULL,
        created_at INTEGER NOT NULL
    );";

/// SQLite-backed store
///
/// Timestamps are unix milliseconds. `seq` keeps insertion order so exact
/// ties rank the same way as in the memory store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file and its parent directory
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::DataDir {
                path: dir.display().to_string(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;
             PRAGMA synchronous=NORMAL;",
        )?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(super) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&conn)
    }

    pub fn contact_count(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM contact_messages", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }
}

type ScoreRow = (String, String, i64, i64);

fn entry_from_row(
    (id, player_name, score, created_at): ScoreRow,
) -> Result<LeaderboardEntry, StoreError> {
    let id = Uuid::parse_str(&id).map_err(|e| StoreError::Corrupt(format!("id {id:?}: {e}")))?;
    let score =
        u64::try_from(score).map_err(|_| StoreError::Corrupt(format!("negative score {score}")))?;
    let created_at = DateTime::from_timestamp_millis(created_at)
        .ok_or_else(|| StoreError::Corrupt(format!("created_at {created_at} out of range")))?;
    Ok(LeaderboardEntry {
        id,
        player_name,
        score,
        created_at,
    })
}

impl ScoreRepository for SqliteStore {
    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, player_name, score, created_at FROM dino_scores
                 ORDER BY score DESC, created_at ASC, seq ASC
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?;

            let mut entries = Vec::new();
            for row in rows {
                entries.push(entry_from_row(row?)?);
            }
            Ok(entries)
        })
    }

    fn insert_score(&self, score: NewScore) -> Result<LeaderboardEntry, StoreError> {
        let entry = new_entry(score);
        let stored_score = i64::try_from(entry.score)
            .map_err(|_| StoreError::Corrupt(format!("score {} too large", entry.score)))?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO dino_scores (id, player_name, score, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    entry.id.to_string(),
                    entry.player_name,
                    stored_score,
                    entry.created_at.timestamp_millis(),
                ],
            )?;
            Ok(())
        })?;
        Ok(entry)
    }

    fn score_count(&self) -> Result<u64, StoreError> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM dino_scores", [], |row| row.get(0))?;
            Ok(count as u64)
        })
    }
}

impl ContactRepository for SqliteStore {
    fn insert_contact(&self, contact: NewContact) -> Result<ContactMessage, StoreError> {
        let message = new_message(contact);
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO contact_messages (id, name, email, message, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    message.id.to_string(),
                    message.name,
                    message.email,
                    message.message,
                    message.created_at.timestamp_millis(),
                ],
            )?;
            Ok(())
        })?;
        Ok(message)
    }
}
