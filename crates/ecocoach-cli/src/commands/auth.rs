use clap::Subcommand;
use ecocoach_core::coach::{keyring_store, resolve_api_key, KeySource, API_KEY_ENTRY};
use ecocoach_core::Config;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the completion API key in the OS keyring
    SetKey {
        /// API key for the completion service
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show where the API key would be read from
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            if key.trim().is_empty() {
                return Err("API key must not be empty".into());
            }
            keyring_store::set(API_KEY_ENTRY, key.trim())?;
            println!("API key stored");
        }
        AuthAction::Clear => {
            keyring_store::delete(API_KEY_ENTRY)?;
            println!("API key removed");
        }
        AuthAction::Status => {
            let config = Config::load()?;
            let env_var = &config.coach.api_key_env;
            match resolve_api_key(env_var) {
                Some((_, KeySource::Env)) => println!("configured (from ${env_var})"),
                Some((_, KeySource::Keyring)) => println!("configured (from keyring)"),
                None => println!("not configured"),
            }
        }
    }
    Ok(())
}
