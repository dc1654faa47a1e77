//! Service facade composing the in-memory stores and the coach gateway.
//!
//! This is the surface a transport layer (HTTP handlers, the CLI session)
//! calls. Every operation is a direct read or mutation of one store; `chat`
//! is the only async operation and never touches a store lock.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::challenge::{Challenge, ChallengeCache};
use crate::coach::CoachGateway;
use crate::error::{GatewayError, Result, ValidationError};
use crate::ledger::{LeaderboardEntry, UserLedger, UserRecord};
use crate::reminders::{ReminderBook, ReminderEntry};
use crate::storage::{CoachConfig, Config};

/// Confirmation returned after logging an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogReceipt {
    pub message: String,
    pub activity: String,
    /// Totals after this log was applied.
    pub user: UserRecord,
}

/// The EcoCoach service.
///
/// Shared across request handlers behind an `Arc`; all methods take `&self`.
pub struct EcoService {
    ledger: UserLedger,
    reminders: ReminderBook,
    challenges: ChallengeCache,
    gateway: Arc<dyn CoachGateway>,
    chat_timeout: Duration,
    fallback_reply: String,
}

impl EcoService {
    /// Build a service with empty stores and the configured challenge catalog.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configured catalog is empty.
    pub fn new(config: &Config, gateway: Arc<dyn CoachGateway>) -> Result<Self> {
        let challenges = ChallengeCache::new(config.challenges.clone())?;
        Ok(Self::from_parts(
            UserLedger::new(),
            ReminderBook::new(),
            challenges,
            gateway,
            &config.coach,
        ))
    }

    /// Assemble a service from pre-built stores.
    pub fn from_parts(
        ledger: UserLedger,
        reminders: ReminderBook,
        challenges: ChallengeCache,
        gateway: Arc<dyn CoachGateway>,
        coach: &CoachConfig,
    ) -> Self {
        Self {
            ledger,
            reminders,
            challenges,
            gateway,
            chat_timeout: coach.timeout(),
            fallback_reply: coach.fallback_reply.clone(),
        }
    }

    /// Record an activity and report the new totals.
    ///
    /// # Errors
    ///
    /// Rejects an empty user id and negative or non-finite carbon values
    /// before the ledger is touched.
    pub fn log_and_report(
        &self,
        user_id: &str,
        carbon_saved: f64,
        activity: &str,
    ) -> Result<LogReceipt> {
        validate_user_id(user_id)?;
        if !carbon_saved.is_finite() || carbon_saved < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "carbon_saved".to_string(),
                message: format!("must be a finite number >= 0, got {carbon_saved}"),
            }
            .into());
        }

        let user = self.ledger.log_activity(user_id, carbon_saved);
        Ok(LogReceipt {
            message: format!("Activity logged! +{carbon_saved:?} kg CO2"),
            activity: activity.to_string(),
            user,
        })
    }

    pub fn user_stats(&self, user_id: &str) -> UserRecord {
        self.ledger.get_user(user_id)
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.ledger.leaderboard()
    }

    /// Challenge for the local calendar date.
    pub fn todays_challenge(&self) -> Challenge {
        self.challenge_on(Local::now().date_naive())
    }

    /// Challenge for a caller-supplied date.
    pub fn challenge_on(&self, date: NaiveDate) -> Challenge {
        self.challenges.daily_challenge(date)
    }

    pub fn add_reminder(&self, user_id: &str, habit: &str, frequency: &str) -> ReminderEntry {
        self.reminders.add_reminder(user_id, habit, frequency)
    }

    pub fn list_reminders(&self, user_id: &str) -> Vec<ReminderEntry> {
        self.reminders.list_reminders(user_id)
    }

    /// Ask the coach. Gateway failures and timeouts yield the fallback reply.
    pub async fn chat(&self, user_id: &str, message: &str) -> String {
        match self.ask_coach(message).await {
            Ok(reply) => {
                debug!(user_id, reply_len = reply.len(), "coach replied");
                reply
            }
            Err(e) => {
                warn!(user_id, "coach gateway failed, sending fallback reply: {e}");
                self.fallback_reply.clone()
            }
        }
    }

    async fn ask_coach(&self, message: &str) -> Result<String, GatewayError> {
        tokio::time::timeout(self.chat_timeout, self.gateway.complete(message))
            .await
            .map_err(|_| GatewayError::Timeout {
                timeout_secs: self.chat_timeout.as_secs(),
            })?
    }
}

fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: "user_id".to_string(),
        });
    }
    Ok(())
}
