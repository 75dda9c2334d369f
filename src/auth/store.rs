//! Caller-supplied token persistence.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;

/// Where the embedding application keeps the bearer token.
///
/// The client reads the token once at initialization and writes it back
/// every time the server rotates it (login, or an `x-renewed-jwt-token`
/// response header). Both operations may perform I/O, e.g. secure storage.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Return the token to authenticate with. An empty string means no
    /// session yet.
    async fn get_token(&self) -> Result<String>;

    /// Persist a token the server just issued.
    async fn store_token(&self, token: &str) -> Result<()>;
}

/// A [`TokenStore`] that only keeps the token in memory.
///
/// # Example
///
/// ```
/// use septotrip::auth::{MemoryTokenStore, TokenStore};
///
/// # async fn example() -> septotrip::Result<()> {
/// let store = MemoryTokenStore::with_token("abc");
/// store.store_token("def").await?;
/// assert_eq!(store.get_token().await?, "def");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<String>,
}

impl MemoryTokenStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(token.into()),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get_token(&self) -> Result<String> {
        Ok(self.token.read().await.clone())
    }

    async fn store_token(&self, token: &str) -> Result<()> {
        *self.token.write().await = token.to_string();
        Ok(())
    }
}
