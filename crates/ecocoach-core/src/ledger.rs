//! Per-user carbon ledger.
//!
//! Tracks cumulative carbon saved and an activity streak for every user that
//! has logged at least one activity. Reads of unknown users return a
//! zero-valued record and never insert.

use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Running totals for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    /// Kilograms of CO2 saved across all logged activities.
    pub total_carbon_saved: f64,
    /// Number of activities logged. Not time-windowed.
    pub streak: u64,
}

impl UserRecord {
    /// Zero-valued record for a user with no logged activity.
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            total_carbon_saved: 0.0,
            streak: 0,
        }
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub total_carbon_saved: f64,
}

/// Thread-safe user ledger.
///
/// Keyed by user id in first-insertion order so leaderboard ties are
/// deterministic.
#[derive(Debug, Default)]
pub struct UserLedger {
    users: Mutex<IndexMap<String, UserRecord>>,
}

impl UserLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> MutexGuard<'_, IndexMap<String, UserRecord>> {
        // Records are updated field-by-field with no fallible step in between.
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `carbon_saved` to the user's total and bump the streak.
    ///
    /// The record is created on first use. A zero amount still counts
    /// toward the streak.
    pub fn log_activity(&self, user_id: &str, carbon_saved: f64) -> UserRecord {
        let mut users = self.users();
        let record = users
            .entry(user_id.to_string())
            .or_insert_with(|| UserRecord::empty(user_id));
        record.total_carbon_saved += carbon_saved;
        record.streak += 1;

        debug!(
            user_id,
            carbon_saved,
            total = record.total_carbon_saved,
            streak = record.streak,
            "activity logged"
        );
        record.clone()
    }

    /// Stored record, or zeros for an unknown user.
    pub fn get_user(&self, user_id: &str) -> UserRecord {
        self.users()
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserRecord::empty(user_id))
    }

    /// All known users ranked by total carbon saved, highest first.
    ///
    /// Users with equal totals keep the order in which they first logged.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self
            .users()
            .values()
            .map(|r| LeaderboardEntry {
                user_id: r.user_id.clone(),
                total_carbon_saved: r.total_carbon_saved,
            })
            .collect();

        // sort_by is stable
        entries.sort_by(|a, b| b.total_carbon_saved.total_cmp(&a.total_carbon_saved));
        entries
    }

    pub fn len(&self) -> usize {
        self.users().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users().is_empty()
    }
}
