//! Challenge of the day.
//!
//! A single cached challenge keyed by calendar date. The first access on a
//! new date draws uniformly from the catalog; every later access on that
//! date sees the same challenge.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ValidationError;

/// A suggested eco-activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub title: String,
    pub description: String,
    /// Estimated kilograms of CO2 saved by completing the challenge.
    pub carbon_value: f64,
}

impl Challenge {
    pub fn new(title: &str, description: &str, carbon_value: f64) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            carbon_value,
        }
    }
}

/// Built-in catalog used when the config file does not list any challenges.
pub fn default_catalog() -> Vec<Challenge> {
    vec![
        Challenge::new(
            "Use public transport",
            "Take bus/train instead of car today",
            2.5,
        ),
        Challenge::new("Plant a tree", "Plant a tree in your area", 5.0),
        Challenge::new("Recycle waste", "Separate recyclables from trash", 1.5),
    ]
}

/// The active challenge and the date it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeCacheEntry {
    pub date: NaiveDate,
    pub challenge: Challenge,
}

#[derive(Debug)]
struct CacheState {
    rng: Mcg128Xsl64,
    current: Option<ChallengeCacheEntry>,
}

/// Date-keyed, size-one challenge cache.
#[derive(Debug)]
pub struct ChallengeCache {
    catalog: Vec<Challenge>,
    state: Mutex<CacheState>,
}

impl ChallengeCache {
    /// Create a cache drawing from `catalog` with an entropy-seeded generator.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCollection` if the catalog is empty.
    pub fn new(catalog: Vec<Challenge>) -> Result<Self, ValidationError> {
        Self::with_rng(catalog, Mcg128Xsl64::from_entropy())
    }

    /// Create a cache whose draws are reproducible for a given seed.
    pub fn with_seed(catalog: Vec<Challenge>, seed: u64) -> Result<Self, ValidationError> {
        Self::with_rng(catalog, Mcg128Xsl64::seed_from_u64(seed))
    }

    fn with_rng(catalog: Vec<Challenge>, rng: Mcg128Xsl64) -> Result<Self, ValidationError> {
        if catalog.is_empty() {
            return Err(ValidationError::EmptyCollection(
                "challenge catalog".to_string(),
            ));
        }
        Ok(Self {
            catalog,
            state: Mutex::new(CacheState { rng, current: None }),
        })
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Challenges the daily draw picks from.
    pub fn catalog(&self) -> &[Challenge] {
        &self.catalog
    }

    /// Challenge for `today`, drawing a new one if the cached date differs.
    ///
    /// The date check and the store happen under one lock, so exactly one
    /// draw is made per date.
    pub fn daily_challenge(&self, today: NaiveDate) -> Challenge {
        let mut state = self.state();
        if let Some(entry) = &state.current {
            if entry.date == today {
                return entry.challenge.clone();
            }
        }

        let idx = state.rng.gen_range(0..self.catalog.len());
        let challenge = self.catalog[idx].clone();
        info!(%today, title = %challenge.title, "drew daily challenge");

        state.current = Some(ChallengeCacheEntry {
            date: today,
            challenge: challenge.clone(),
        });
        challenge
    }

    /// Current cache entry, if any draw has happened yet.
    pub fn cached(&self) -> Option<ChallengeCacheEntry> {
        self.state().current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = ChallengeCache::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyCollection(_)));
    }

    #[test]
    fn same_date_returns_same_challenge() {
        let cache = ChallengeCache::new(default_catalog()).unwrap();
        let today = date(2026, 10, 17);
        let first = cache.daily_challenge(today);
        for _ in 0..20 {
            assert_eq!(cache.daily_challenge(today), first);
        }
    }

    #[test]
    fn new_date_replaces_cached_entry() {
        let cache = ChallengeCache::with_seed(default_catalog(), 7).unwrap();
        assert!(cache.cached().is_none());

        cache.daily_challenge(date(2026, 10, 17));
        let next = cache.daily_challenge(date(2026, 10, 18));

        let entry = cache.cached().unwrap();
        assert_eq!(entry.date, date(2026, 10, 18));
        assert_eq!(entry.challenge, next);
    }

    #[test]
    fn seeded_caches_agree() {
        let a = ChallengeCache::with_seed(default_catalog(), 42).unwrap();
        let b = ChallengeCache::with_seed(default_catalog(), 42).unwrap();
        let start = date(2026, 1, 1);
        for offset in 0..30 {
            let day = start + chrono::Duration::days(offset);
            assert_eq!(a.daily_challenge(day), b.daily_challenge(day));
        }
    }

    #[test]
    fn draws_cover_whole_catalog() {
        let catalog = default_catalog();
        let cache = ChallengeCache::with_seed(catalog.clone(), 1).unwrap();
        let start = date(2026, 1, 1);

        let mut seen: HashMap<String, usize> = HashMap::new();
        for offset in 0..600 {
            let day = start + chrono::Duration::days(offset);
            let drawn = cache.daily_challenge(day);
            assert!(cache.catalog().contains(&drawn));
            *seen.entry(drawn.title).or_default() += 1;
        }

        // 600 draws over 3 items; each should land well above zero
        assert_eq!(seen.len(), catalog.len());
        for count in seen.values() {
            assert!(*count > 100, "skewed draw counts: {seen:?}");
        }
    }

    #[test]
    fn single_item_catalog_always_wins() {
        let only = Challenge::new("Air-dry laundry", "Skip the dryer today", 2.0);
        let cache = ChallengeCache::new(vec![only.clone()]).unwrap();
        assert_eq!(cache.daily_challenge(date(2026, 3, 1)), only);
        assert_eq!(cache.daily_challenge(date(2026, 3, 2)), only);
    }
}
