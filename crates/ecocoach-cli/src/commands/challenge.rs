use chrono::Local;
use ecocoach_core::{ChallengeCache, Config};

/// Draws from a fresh cache, so separate runs on the same day may disagree.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let cache = ChallengeCache::new(config.challenges)?;
    let challenge = cache.daily_challenge(Local::now().date_naive());
    println!("{}", serde_json::to_string_pretty(&challenge)?);
    Ok(())
}
