//! Credential storage, chosen once per session.
//!
//! Callers never decide per call site where credentials live: they pick a
//! backend once, via [`store_for`] and the remember-me flag, and go
//! through the one [`CredentialStore`] contract from then on.
//! [`DurableStore`] keeps a JSON file under the user data directory;
//! [`EphemeralStore`] lasts for the process.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::api::Credentials;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no data directory available for credentials")]
    NoDataDir,

    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode credentials: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One get/set/clear contract over the saved sign-in state.
pub trait CredentialStore {
    fn get(&self) -> Result<Option<Credentials>, StoreError>;
    fn set(&mut self, credentials: &Credentials) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;

    /// The stored credentials, if present and still valid. An expired
    /// credential is cleared on the way out, so the next read is cheap.
    fn current(&mut self) -> Result<Option<Credentials>, StoreError> {
        match self.get()? {
            Some(credentials) if credentials.token.is_expired() => {
                debug!("stored credential has expired, clearing it");
                self.clear()?;
                Ok(None)
            }
            other => Ok(other),
        }
    }
}

/// Pick the session's store: durable when the user asked to be
/// remembered, process-lifetime otherwise.
pub fn store_for(remember: bool) -> Result<Box<dyn CredentialStore>, StoreError> {
    if remember {
        Ok(Box::new(DurableStore::open_default()?))
    } else {
        Ok(Box::new(EphemeralStore::default()))
    }
}

/// Credentials in a JSON file that outlives the process.
#[derive(Debug, Clone)]
pub struct DurableStore {
    path: PathBuf,
}

impl DurableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional location under the user data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs_next::data_dir()
            .ok_or(StoreError::NoDataDir)?
            .join("vaani-nyay");
        Ok(Self::new(dir.join("credentials.json")))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CredentialStore for DurableStore {
    fn get(&self) -> Result<Option<Credentials>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&text) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(err) => {
                // An unreadable file means logged out, not a crash.
                warn!("ignoring unreadable credential file: {err}");
                Ok(None)
            }
        }
    }

    fn set(&mut self, credentials: &Credentials) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(credentials)?)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Credentials that last only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct EphemeralStore {
    slot: Option<Credentials>,
}

impl CredentialStore for EphemeralStore {
    fn get(&self) -> Result<Option<Credentials>, StoreError> {
        Ok(self.slot.clone())
    }

    fn set(&mut self, credentials: &Credentials) -> Result<(), StoreError> {
        self.slot = Some(credentials.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserProfile;
    use crate::token::AuthToken;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn credentials_with_exp(exp: u64) -> Credentials {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
        Credentials {
            token: AuthToken::new(format!("{header}.{payload}.sig")),
            user: UserProfile {
                name: "Asha Devi".to_string(),
                email: "asha@example.in".to_string(),
                phone: "9876543210".to_string(),
                role: "user".to_string(),
                active: true,
            },
        }
    }

    #[test]
    fn durable_store_round_trips_credentials() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = DurableStore::new(dir.path().join("auth/credentials.json"));

        assert!(store.get().unwrap().is_none());

        let credentials = credentials_with_exp(4102444800);
        store.set(&credentials).unwrap();
        assert_eq!(store.get().unwrap(), Some(credentials));

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn an_unreadable_file_reads_as_logged_out() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{ not json").unwrap();

        let store = DurableStore::new(&path);
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn current_clears_an_expired_credential() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = DurableStore::new(dir.path().join("credentials.json"));
        store.set(&credentials_with_exp(1000)).unwrap();

        assert!(store.current().unwrap().is_none());
        // The expired entry is gone from disk too.
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn current_passes_a_live_credential_through() {
        let mut store = EphemeralStore::default();
        let credentials = credentials_with_exp(4102444800);
        store.set(&credentials).unwrap();

        assert_eq!(store.current().unwrap(), Some(credentials));
    }

    #[test]
    fn the_ephemeral_store_forgets_on_clear() {
        let mut store = EphemeralStore::default();
        store.set(&credentials_with_exp(4102444800)).unwrap();
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn a_session_that_declines_remembering_stays_in_memory() {
        let mut store = store_for(false).unwrap();
        store.set(&credentials_with_exp(4102444800)).unwrap();
        assert!(store.get().unwrap().is_some());
    }
}
