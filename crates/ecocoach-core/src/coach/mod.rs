//! Eco coach: the chat-completion collaborator behind `EcoService::chat`.

pub mod completions;

pub use completions::ChatCompletionsGateway;

use async_trait::async_trait;

use crate::error::GatewayError;

/// Sends one user message to a completion service and returns its reply.
///
/// Implementations own their transport and credentials. Callers treat any
/// error as recoverable.
#[async_trait]
pub trait CoachGateway: Send + Sync {
    async fn complete(&self, message: &str) -> Result<String, GatewayError>;
}

/// Keyring entry holding the completion API key.
pub const API_KEY_ENTRY: &str = "coach_api_key";

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "ecocoach";

    pub fn get(key: &str) -> Result<Option<String>, keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)
    }

    pub fn delete(key: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Where the API key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Env,
    Keyring,
}

/// Look up the API key: the named env var first, then the keyring.
pub fn resolve_api_key(env_var: &str) -> Option<(String, KeySource)> {
    if let Ok(key) = std::env::var(env_var) {
        if !key.trim().is_empty() {
            return Some((key, KeySource::Env));
        }
    }

    match keyring_store::get(API_KEY_ENTRY) {
        Ok(Some(key)) if !key.is_empty() => Some((key, KeySource::Keyring)),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("keyring lookup for coach API key failed: {e}");
            None
        }
    }
}
