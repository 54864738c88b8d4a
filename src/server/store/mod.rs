//! Leaderboard and contact storage
//!
//! Handlers only see the repository traits; `run` picks SQLite when a
//! database path is configured and the in-memory store otherwise.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::contact::{ContactMessage, NewContact};
use crate::leaderboard::{LeaderboardEntry, NewScore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to create data dir {path}: {source}")]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("store lock poisoned")]
    Poisoned,
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Ranked score storage
pub trait ScoreRepository: Send + Sync {
    /// Best `limit` entries, highest score first, earliest first on ties
    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError>;

    /// Persist a validated score, assigning id and timestamp
    fn insert_score(&self, score: NewScore) -> Result<LeaderboardEntry, StoreError>;

    fn score_count(&self) -> Result<u64, StoreError>;
}

/// Write-only contact message storage
pub trait ContactRepository: Send + Sync {
    fn insert_contact(&self, contact: NewContact) -> Result<ContactMessage, StoreError>;
}

/// Current time at the millisecond precision both stores keep
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn new_entry(score: NewScore) -> LeaderboardEntry {
    LeaderboardEntry {
        id: Uuid::new_v4(),
        player_name: score.player_name,
        score: score.score,
        created_at: now_millis(),
    }
}

fn new_message(contact: NewContact) -> ContactMessage {
    ContactMessage {
        id: Uuid::new_v4(),
        name: contact.name,
        email: contact.email,
        message: contact.message,
        created_at: now_millis(),
    }
}
