//! Habit reminders, grouped per user in insertion order.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A habit reminder. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEntry {
    pub user_id: String,
    pub habit: String,
    /// Free-form cadence such as "daily" or "every monday".
    pub frequency: String,
    pub enabled: bool,
}

/// Thread-safe reminder store.
#[derive(Debug, Default)]
pub struct ReminderBook {
    entries: Mutex<HashMap<String, Vec<ReminderEntry>>>,
}

impl ReminderBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Vec<ReminderEntry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an enabled reminder to the user's list.
    pub fn add_reminder(&self, user_id: &str, habit: &str, frequency: &str) -> ReminderEntry {
        let entry = ReminderEntry {
            user_id: user_id.to_string(),
            habit: habit.to_string(),
            frequency: frequency.to_string(),
            enabled: true,
        };

        let mut entries = self.entries();
        let list = entries.entry(user_id.to_string()).or_default();
        list.push(entry.clone());
        debug!(user_id, habit, frequency, count = list.len(), "reminder added");

        entry
    }

    /// The user's reminders in the order they were added.
    pub fn list_reminders(&self, user_id: &str) -> Vec<ReminderEntry> {
        self.entries().get(user_id).cloned().unwrap_or_default()
    }
}
