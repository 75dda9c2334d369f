//! HTTP client and request encoding for the Septotrip API.
//!
//! [`SeptotripClient`] is the main entry point. Request bodies are either
//! JSON ([`JsonBody`]) or multipart ([`FormFields`], encoded into a
//! [`MultipartPayload`]).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use septotrip::auth::MemoryTokenStore;
//! use septotrip::{ClientConfig, JsonBody, Method, SeptotripClient};
//!
//! # async fn example() -> septotrip::Result<()> {
//! let client = SeptotripClient::initialize(
//!     ClientConfig::from_env()?,
//!     Arc::new(MemoryTokenStore::new()),
//! ).await?;
//!
//! // Raw dispatch, without a typed service
//! let body = JsonBody::new().field("name", "Iceland")?.absent("description");
//! let trip = client.send("/trips/42", Method::Put, Some(body)).await?;
//! # Ok(())
//! # }
//! ```

mod body;
mod config;
mod http;
mod multipart;

pub use body::JsonBody;
pub use config::{ClientConfig, Platform, PLATFORM_ENV, URL_ENV};
pub use http::{Method, SeptotripClient};
pub use multipart::{
    FieldValue, FileHandle, FileResolver, FormFields, FsResolver, MobileUri, MultipartPart,
    MultipartPayload, PartBody, UploadBody,
};
pub(crate) use http::ClientInner;
