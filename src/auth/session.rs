//! Bearer token state for one client.

use std::sync::Arc;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::{Error, Result};

use super::TokenStore;

/// The bearer token currently in use, plus the store it is persisted to.
///
/// Every outgoing request reads the token from here when it builds its
/// headers; a renewal writes the new one here and then hands it to the
/// [`TokenStore`].
///
/// # Thread Safety
///
/// `Session` is cheap to clone and shared by every in-flight call. A call
/// that already built its headers keeps using the token it read, even if
/// another call rotates the token meanwhile.
#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<SecretString>>,
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Create a session from the token the store currently holds.
    pub async fn from_store(store: Arc<dyn TokenStore>) -> Result<Self> {
        let token = store.get_token().await?;

        Ok(Self {
            token: Arc::new(RwLock::new(SecretString::from(token))),
            store,
        })
    }

    /// Whether a non-empty token is present.
    pub async fn is_authenticated(&self) -> bool {
        !self.token.read().await.expose_secret().is_empty()
    }

    /// The `Authorization` header value for the current token.
    ///
    /// `None` while there is no token yet (before the first login).
    pub(crate) async fn authorization(&self) -> Result<Option<HeaderValue>> {
        let token = self.token.read().await;
        let token = token.expose_secret();
        if token.is_empty() {
            return Ok(None);
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    /// Adopt a token issued by the server and persist it.
    ///
    /// The in-memory token is replaced first, so calls issued after this
    /// point use it whether or not the store succeeds.
    pub async fn renew(&self, token: &str) -> Result<()> {
        *self.token.write().await = SecretString::from(token.to_string());
        self.store.store_token(token).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
