use std::sync::Mutex;

use super::{ContactRepository, ScoreRepository, StoreError, new_entry, new_message};
use crate::leaderboard::{self, LeaderboardEntry, NewScore};
use crate::server::contact::{ContactMessage, NewContact};

#[derive(Default)]
struct Tables {
    scores: Vec<LeaderboardEntry>,
    contacts: Vec<ContactMessage>,
}

/// Process-local store, emptied on restart
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> Result<T, StoreError> {
        let mut tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&mut tables))
    }

    pub fn contact_count(&self) -> Result<usize, StoreError> {
        self.with_tables(|t| t.contacts.len())
    }
}

impl ScoreRepository for MemoryStore {
    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        // Insertion order is kept, so the stable rank breaks exact ties by it
        self.with_tables(|t| leaderboard::top(t.scores.clone(), limit))
    }

    fn insert_score(&self, score: NewScore) -> Result<LeaderboardEntry, StoreError> {
        let entry = new_entry(score);
        self.with_tables(|t| t.scores.push(entry.clone()))?;
        Ok(entry)
    }

    fn score_count(&self) -> Result<u64, StoreError> {
        self.with_tables(|t| t.scores.len() as u64)
    }
}

impl ContactRepository for MemoryStore {
    fn insert_contact(&self, contact: NewContact) -> Result<ContactMessage, StoreError> {
        let message = new_message(contact);
        self.with_tables(|t| t.contacts.push(message.clone()))?;
        Ok(message)
    }
}
