//! # septotrip-rs
//!
//! An async Rust client for the Septotrip trip-planning API.
//!
//! The crate covers the request/response contract between an application
//! and the Septotrip server: bearer token authentication with sliding
//! renewal, JSON and multipart request bodies, typed error mapping and
//! structural validation of every payload before it reaches the caller.
//!
//! ## Features
//!
//! - **Authentication**: bearer tokens read from a caller-supplied
//!   [`TokenStore`](auth::TokenStore), renewed from the
//!   `x-renewed-jwt-token` response header
//! - **Trips**: trips, travelers, steps, paths, days and points of interest
//! - **Journal**: logbooks, shared spends, todo lists and file uploads
//! - **Typed errors**: recognized statuses become an [`ApiError`] with a
//!   stable [`ErrorKind`]
//! - **Validated payloads**: a response that does not match its model is
//!   an [`Error::Decode`], never a half-filled value
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use septotrip::auth::MemoryTokenStore;
//! use septotrip::models::{LoginCredentials, NewTrip};
//! use septotrip::{ClientConfig, SeptotripClient};
//!
//! #[tokio::main]
//! async fn main() -> septotrip::Result<()> {
//!     let client = SeptotripClient::initialize(
//!         ClientConfig::new("https://api.septotrip.test")?,
//!         Arc::new(MemoryTokenStore::new()),
//!     ).await?;
//!
//!     client.users().login(&LoginCredentials {
//!         email: "ada@example.com".into(),
//!         password: "hunter2".into(),
//!     }).await?;
//!
//!     let trip = client.trips().create(&NewTrip {
//!         name: "Iceland".into(),
//!         description: None,
//!         start_date: None,
//!         end_date: None,
//!         is_public: false,
//!     }).await?;
//!     println!("Created trip {}", trip.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use septotrip::{Error, ErrorKind};
//! use septotrip::models::TripId;
//!
//! # async fn example(client: septotrip::SeptotripClient) -> septotrip::Result<()> {
//! match client.trips().get(TripId::new(42)).await {
//!     Ok(trip) => println!("{}", trip.name),
//!     Err(Error::Api(err)) if err.kind == ErrorKind::InexistantResource => {
//!         println!("no such trip: {}", err.message);
//!     }
//!     Err(err) if err.is_auth_error() => println!("log in again"),
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
mod global;
pub mod models;
pub mod validate;

// Re-export primary types at crate root for convenience
pub use auth::{Session, TokenStore};
pub use client::{
    ClientConfig, FieldValue, FileHandle, FileResolver, FormFields, FsResolver, JsonBody, Method,
    MobileUri, MultipartPart, MultipartPayload, PartBody, Platform, SeptotripClient, UploadBody,
};
pub use error::{ApiError, Error, ErrorKind, Result, StatusMap, StatusRule};
pub use global::{client, init, install};

/// Prelude module for convenient imports.
///
/// ```rust
/// use septotrip::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{MemoryTokenStore, Session, TokenStore};
    pub use crate::client::{
        ClientConfig, FileHandle, FormFields, JsonBody, Method, Platform, SeptotripClient,
    };
    pub use crate::error::{ApiError, Error, ErrorKind, Result};
    pub use crate::models::{
        // Identifiers
        DayId, LogbookId, PathId, PointId, SpendId, StepId, TodoId, TripId, UserId,
        // Updates
        Patch,
        // Resources
        Day, Logbook, LogbookEntry, Path, Point, Spend, Step, TodoEntry, Trip, User,
    };
}
