//! # EcoCoach Core Library
//!
//! Business logic for EcoCoach, a small sustainability tracker: users log
//! carbon-saving activities, compete on a leaderboard, get a daily challenge,
//! keep habit reminders and chat with an AI eco coach.
//!
//! All domain state lives in memory for the lifetime of the process. A
//! transport layer (HTTP handlers, or the bundled CLI) owns one
//! [`EcoService`] behind an `Arc` and calls into it concurrently.
//!
//! ## Architecture
//!
//! - **Ledger**: per-user carbon totals and streaks, ranked leaderboard
//! - **Reminders**: per-user habit reminders in insertion order
//! - **Challenge**: date-keyed cache holding the challenge of the day
//! - **Coach**: [`CoachGateway`] trait plus an OpenAI-compatible HTTP client
//! - **Storage**: TOML configuration (coach settings, challenge catalog)
//!
//! ## Key Components
//!
//! - [`EcoService`]: Facade composing the stores and the gateway
//! - [`UserLedger`], [`ReminderBook`], [`ChallengeCache`]: Thread-safe stores
//! - [`Config`]: Application configuration management

pub mod challenge;
pub mod coach;
pub mod error;
pub mod ledger;
pub mod reminders;
pub mod service;
pub mod storage;

pub use challenge::{Challenge, ChallengeCache, ChallengeCacheEntry};
pub use coach::{ChatCompletionsGateway, CoachGateway};
pub use error::{ConfigError, CoreError, GatewayError, ValidationError};
pub use ledger::{LeaderboardEntry, UserLedger, UserRecord};
pub use reminders::{ReminderBook, ReminderEntry};
pub use service::{EcoService, LogReceipt};
pub use storage::{CoachConfig, Config};
