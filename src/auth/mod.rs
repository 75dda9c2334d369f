//! Bearer token lifecycle.
//!
//! The Septotrip API authenticates every call with `Authorization: Bearer
//! <token>`. The token has three sources:
//!
//! 1. the caller's [`TokenStore`], read once when the client is created;
//! 2. a successful login, which returns a fresh session token;
//! 3. sliding-session renewal: any response may carry an
//!    `x-renewed-jwt-token` header that supersedes the current token.
//!
//! In the last two cases the client adopts the token for every later call
//! and writes it back through [`TokenStore::store_token`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use septotrip::auth::MemoryTokenStore;
//! use septotrip::{ClientConfig, SeptotripClient};
//!
//! # async fn example() -> septotrip::Result<()> {
//! let store = Arc::new(MemoryTokenStore::with_token("saved-token"));
//! let client = SeptotripClient::initialize(
//!     ClientConfig::new("https://api.septotrip.test")?,
//!     store,
//! ).await?;
//! # Ok(())
//! # }
//! ```

mod session;
mod store;

pub use session::Session;
pub use store::{MemoryTokenStore, TokenStore};

/// Response header through which the server rotates the bearer token.
pub const RENEWED_TOKEN_HEADER: &str = "x-renewed-jwt-token";
