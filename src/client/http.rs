//! HTTP client implementation for the Septotrip API.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{
    DaysService, FilesService, LogbooksService, PathsService, PointsService, SpendsService,
    StepsService, TodosService, TripsService, UsersService,
};
use crate::auth::{Session, TokenStore, RENEWED_TOKEN_HEADER};
use crate::error::StatusMap;
use crate::validate;
use crate::{Error, Result};

use super::body::JsonBody;
use super::config::ClientConfig;
use super::multipart::{FileResolver, FsResolver, UploadBody};

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// The main client for interacting with the Septotrip API.
///
/// Holds the configuration and the bearer token [`Session`]; every resource
/// service goes through [`send`](Self::send) or [`upload`](Self::upload), so
/// token renewal and 401/403 mapping apply to all of them.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use septotrip::auth::MemoryTokenStore;
/// use septotrip::{ClientConfig, SeptotripClient};
///
/// # async fn example() -> septotrip::Result<()> {
/// let client = SeptotripClient::initialize(
///     ClientConfig::new("https://api.septotrip.test")?,
///     Arc::new(MemoryTokenStore::with_token("saved-token")),
/// ).await?;
///
/// for trip in client.trips().mine().await? {
///     println!("{}: {}", trip.id, trip.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SeptotripClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
    pub(crate) resolver: Arc<dyn FileResolver>,
}

impl SeptotripClient {
    /// Create a client, reading the initial bearer token from `store`.
    pub async fn initialize(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        Self::initialize_with_resolver(config, store, Arc::new(FsResolver)).await
    }

    /// Like [`initialize`](Self::initialize), with a custom way of reading
    /// mobile file references (e.g. an Android content resolver).
    pub async fn initialize_with_resolver(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
        resolver: Arc<dyn FileResolver>,
    ) -> Result<Self> {
        let session = Session::from_store(store).await?;
        Self::with_session(session, config, resolver)
    }

    /// Create a client around an existing session.
    pub fn with_session(
        session: Session,
        config: ClientConfig,
        resolver: Arc<dyn FileResolver>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                http: builder.build()?,
                session,
                config,
                resolver,
            }),
        })
    }

    /// Send a JSON request and return the decoded payload.
    ///
    /// Absent-marked body fields go out as `null`. A 401 becomes
    /// `InvalidTokenError`, a 403 `UnauthorizedError`; every other non-2xx
    /// status is returned as [`Error::Status`] and transport failures as
    /// [`Error::Http`].
    pub async fn send(&self, path: &str, method: Method, body: Option<JsonBody>) -> Result<Value> {
        self.inner.send(path, method, body).await
    }

    /// Send a multipart request and return the decoded payload.
    ///
    /// A [`FormFields`](crate::FormFields) body is encoded first; an
    /// encoded [`MultipartPayload`](crate::MultipartPayload) is sent as-is.
    pub async fn upload(&self, path: &str, method: Method, body: impl Into<UploadBody>) -> Result<Value> {
        self.inner.upload(path, method, body.into()).await
    }

    /// Get the users service (registration and login).
    pub fn users(&self) -> UsersService {
        UsersService::new(self.inner.clone())
    }

    /// Get the trips service.
    pub fn trips(&self) -> TripsService {
        TripsService::new(self.inner.clone())
    }

    /// Get the steps service.
    pub fn steps(&self) -> StepsService {
        StepsService::new(self.inner.clone())
    }

    /// Get the paths service.
    pub fn paths(&self) -> PathsService {
        PathsService::new(self.inner.clone())
    }

    /// Get the days service.
    pub fn days(&self) -> DaysService {
        DaysService::new(self.inner.clone())
    }

    /// Get the points of interest service.
    pub fn points(&self) -> PointsService {
        PointsService::new(self.inner.clone())
    }

    /// Get the logbooks service.
    pub fn logbooks(&self) -> LogbooksService {
        LogbooksService::new(self.inner.clone())
    }

    /// Get the spends service.
    pub fn spends(&self) -> SpendsService {
        SpendsService::new(self.inner.clone())
    }

    /// Get the todo list service.
    pub fn todos(&self) -> TodosService {
        TodosService::new(self.inner.clone())
    }

    /// Get the files service.
    pub fn files(&self) -> FilesService {
        FilesService::new(self.inner.clone())
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Get the configuration this client was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Build request headers with authentication.
    async fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(authorization) = self.session.authorization().await? {
            headers.insert(AUTHORIZATION, authorization);
        }
        Ok(headers)
    }

    pub(crate) async fn send(&self, path: &str, method: Method, body: Option<JsonBody>) -> Result<Value> {
        tracing::debug!(%method, path, "request");

        let mut headers = self.build_headers().await?;
        let mut request = self.http.request(method.as_reqwest(), self.url(path));

        if let Some(body) = body {
            let body = body.into_value();
            tracing::trace!(%body, "request body");
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            request = request.body(serde_json::to_vec(&body)?);
        }

        let response = request.headers(headers).send().await?;
        self.handle_response(response).await
    }

    pub(crate) async fn upload(&self, path: &str, method: Method, body: UploadBody) -> Result<Value> {
        tracing::debug!(%method, path, "upload");

        let payload = body.encode()?;
        tracing::trace!(parts = payload.len(), "multipart body");

        // reqwest sets `multipart/form-data; boundary=...` and streams the
        // parts untouched
        let form = payload.into_form(self.resolver.as_ref()).await?;
        let headers = self.build_headers().await?;

        let response = self
            .http
            .request(method.as_reqwest(), self.url(path))
            .headers(headers)
            .multipart(form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Adopt a renewed token, then decode the payload or map the status.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        self.apply_renewal(response.headers()).await;

        let status = response.status();
        let bytes = response.bytes().await?;
        if bytes.is_empty() && status.is_success() {
            return Ok(Value::Null);
        }

        // plain-text bodies come through as a JSON string
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        if status.is_success() {
            Ok(body)
        } else {
            tracing::debug!(status = status.as_u16(), "request failed");
            Err(Error::from_status(status.as_u16(), body))
        }
    }

    async fn apply_renewal(&self, headers: &HeaderMap) {
        let Some(value) = headers.get(RENEWED_TOKEN_HEADER) else {
            return;
        };
        let token = match value.to_str() {
            Ok(token) if !token.is_empty() => token.to_string(),
            _ => {
                tracing::warn!("ignoring unreadable {RENEWED_TOKEN_HEADER} header");
                return;
            }
        };

        tracing::debug!("bearer token renewed by server");
        if let Err(err) = self.session.renew(&token).await {
            tracing::warn!(error = %err, "failed to store renewed token");
        }
    }

    /// Dispatch a JSON call, map the endpoint's statuses, validate the
    /// payload as `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonBody>,
        statuses: StatusMap,
    ) -> Result<T> {
        let value = self
            .send(path, method, body)
            .await
            .map_err(|err| statuses.apply(err))?;
        validate::decode(value)
    }

    /// Multipart counterpart of [`call`](Self::call).
    pub(crate) async fn call_upload<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: UploadBody,
        statuses: StatusMap,
    ) -> Result<T> {
        let value = self
            .upload(path, method, body)
            .await
            .map_err(|err| statuses.apply(err))?;
        validate::decode(value)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, statuses: StatusMap) -> Result<T> {
        self.call(Method::Get, path, None, statuses).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: JsonBody,
        statuses: StatusMap,
    ) -> Result<T> {
        self.call(Method::Post, path, Some(body), statuses).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: JsonBody,
        statuses: StatusMap,
    ) -> Result<T> {
        self.call(Method::Put, path, Some(body), statuses).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str, statuses: StatusMap) -> Result<T> {
        self.call(Method::Delete, path, None, statuses).await
    }
}

impl fmt::Debug for SeptotripClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeptotripClient")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
