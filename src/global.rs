//! Process-wide client slot.
//!
//! Applications that want a single shared client call [`init`] once at
//! startup and fetch it anywhere with [`client`]. Calling [`init`] again
//! replaces the slot wholesale; clients already handed out keep their own
//! configuration and session.

use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;

use crate::auth::TokenStore;
use crate::client::{ClientConfig, SeptotripClient};
use crate::{Error, Result};

static CLIENT: OnceCell<RwLock<Option<SeptotripClient>>> = OnceCell::new();

fn cell() -> &'static RwLock<Option<SeptotripClient>> {
    CLIENT.get_or_init(|| RwLock::new(None))
}

/// Build a client from `config` and `store` and install it as the shared
/// client.
///
/// The initial token is read from `store` before the slot is touched, so a
/// failing store leaves any previous client in place.
///
/// ```no_run
/// use std::sync::Arc;
/// use septotrip::auth::MemoryTokenStore;
/// use septotrip::ClientConfig;
///
/// # async fn example() -> septotrip::Result<()> {
/// septotrip::init(
///     ClientConfig::new("https://api.septotrip.test")?,
///     Arc::new(MemoryTokenStore::new()),
/// ).await?;
///
/// let trips = septotrip::client()?.trips().public().await?;
/// # Ok(())
/// # }
/// ```
pub async fn init(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<()> {
    let client = SeptotripClient::initialize(config, store).await?;
    install(client);
    Ok(())
}

/// Install an already built client as the shared client.
pub fn install(client: SeptotripClient) {
    tracing::debug!(base_url = client.config().base_url(), "installing shared client");
    let mut slot = cell().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = Some(client);
}

/// The shared client.
///
/// Fails with [`Error::NotInitialized`] until [`init`] or [`install`] has
/// run.
pub fn client() -> Result<SeptotripClient> {
    cell()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
        .ok_or(Error::NotInitialized)
}
