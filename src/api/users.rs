//! Registration and login.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::error::StatusMap;
use crate::models::{ApiMessage, LoginCredentials, LoginResponse, RegisterCredentials};
use crate::{JsonBody, Result};

/// Service for account operations.
///
/// # Example
///
/// ```no_run
/// use septotrip::models::LoginCredentials;
///
/// # async fn example(client: septotrip::SeptotripClient) -> septotrip::Result<()> {
/// let login = client.users().login(&LoginCredentials {
///     email: "ada@example.com".into(),
///     password: "hunter2".into(),
/// }).await?;
/// println!("Logged in as {}", login.email);
/// # Ok(())
/// # }
/// ```
pub struct UsersService {
    inner: Arc<ClientInner>,
}

impl UsersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create an account.
    ///
    /// Fails with `ResourceAlreadyExistError` if the email is taken.
    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<ApiMessage> {
        self.inner
            .post("/register", JsonBody::from_serialize(credentials)?, StatusMap::REGISTER)
            .await
    }

    /// Log in and adopt the returned session token.
    ///
    /// The token is used for every later call and handed to the token
    /// store. A wrong password fails with `InvalidPasswordError`, an
    /// unknown email with `InexistantResourceError`.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        let response: LoginResponse = self
            .inner
            .post("/login", JsonBody::from_serialize(credentials)?, StatusMap::LOGIN)
            .await?;

        if let Err(err) = self.inner.session.renew(&response.session.token).await {
            tracing::warn!(error = %err, "failed to store login token");
        }
        Ok(response)
    }

    /// Authenticated ping; fails with `InvalidTokenError` when the current
    /// token is not accepted.
    pub async fn private(&self) -> Result<ApiMessage> {
        self.inner.get("/private", StatusMap::NONE).await
    }
}
