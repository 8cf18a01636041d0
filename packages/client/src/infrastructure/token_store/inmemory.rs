//! In-memory token store for tests and throwaway sessions.

use std::sync::RwLock;

use crate::domain::{AuthToken, TokenStore, TokenStoreError};

#[derive(Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<AuthToken>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Option<AuthToken> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().unwrap_or_else(|p| p.into_inner());
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().unwrap_or_else(|p| p.into_inner());
        *guard = None;
        Ok(())
    }
}
