use super::Result;
use crate::error::StorageError;
use std::sync::Mutex;

#[cfg(not(test))]
use keyring::Entry;

const SERVICE_NAME: &str = "gym-cli";

/// Owner of the session credential: one opaque token under one fixed key.
/// The token's presence is the sole marker of an active session.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Session store backed by the OS keyring, one entry per profile.
pub struct KeyringSessionStore {
    profile_name: String,
}

impl KeyringSessionStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            profile_name: profile_name.to_string(),
        }
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry> {
        Entry::new(SERVICE_NAME, &format!("session-{}", self.profile_name))
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }
}

#[cfg(not(test))]
impl SessionStore for KeyringSessionStore {
    fn token(&self) -> Option<String> {
        let entry = self.entry().ok()?;
        match entry.get_password() {
            Ok(token) => Some(token),
            Err(_) => None,
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        let entry = self.entry()?;
        entry
            .set_password(token)
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(_) => Ok(()),
            // Entry doesn't exist, which is fine for logout
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }
}

#[cfg(test)]
impl SessionStore for KeyringSessionStore {
    fn token(&self) -> Option<String> {
        println!("MOCK: Loading session for profile {}", self.profile_name);
        None
    }

    fn store(&self, _token: &str) -> Result<()> {
        println!("MOCK: Saving session for profile {}", self.profile_name);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        println!("MOCK: Clearing session for profile {}", self.profile_name);
        Ok(())
    }
}

/// In-memory session store. Used by tests, where the keyring is
/// unavailable, and usable anywhere a throwaway session is enough.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn store(&self, token: &str) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_| StorageError::KeyringError("session store poisoned".to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_| StorageError::KeyringError("session store poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
