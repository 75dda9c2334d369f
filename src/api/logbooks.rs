//! Logbooks service.

use std::sync::Arc;

use serde::de::IgnoredAny;

use crate::client::ClientInner;
use crate::error::StatusMap;
use crate::models::{
    Logbook, LogbookEntry, LogbookId, LogbookUpdate, NewLogbook, NewLogbookEntry, TripId,
};
use crate::{JsonBody, Result};

/// Service for travel journals and their entries.
///
/// # Example
///
/// ```no_run
/// use septotrip::models::{NewLogbookEntry, TripId};
///
/// # async fn example(client: septotrip::SeptotripClient) -> septotrip::Result<()> {
/// for logbook in client.logbooks().for_trip(TripId::new(42)).await? {
///     client.logbooks().add_entry(&NewLogbookEntry {
///         logbook_id: logbook.id,
///         content: "Arrived in Reykjavik".into(),
///     }).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct LogbooksService {
    inner: Arc<ClientInner>,
}

impl LogbooksService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a logbook for a trip.
    pub async fn create(&self, logbook: &NewLogbook) -> Result<Logbook> {
        self.inner
            .post(
                &format!("/trips/{}/logbooks", logbook.trip_id),
                JsonBody::from_serialize(logbook)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Logbooks written by the current user.
    pub async fn mine(&self) -> Result<Vec<Logbook>> {
        self.inner.get("/logbooks", StatusMap::NONE).await
    }

    /// The current user's logbooks for a trip.
    pub async fn for_trip(&self, trip: TripId) -> Result<Vec<Logbook>> {
        self.inner
            .get(&format!("/trips/{}/logbooks", trip), StatusMap::LOOKUP)
            .await
    }

    /// Get a logbook by id.
    pub async fn get(&self, id: LogbookId) -> Result<Logbook> {
        self.inner.get(&format!("/logbooks/{}", id), StatusMap::LOOKUP).await
    }

    /// Update a logbook.
    pub async fn update(&self, id: LogbookId, update: &LogbookUpdate) -> Result<Logbook> {
        self.inner
            .put(
                &format!("/logbooks/{}", id),
                JsonBody::from_serialize(update)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Delete a logbook.
    pub async fn delete(&self, id: LogbookId) -> Result<()> {
        let _: IgnoredAny = self
            .inner
            .delete(&format!("/logbooks/{}", id), StatusMap::LOOKUP)
            .await?;
        Ok(())
    }

    /// Add an entry to a logbook.
    pub async fn add_entry(&self, entry: &NewLogbookEntry) -> Result<LogbookEntry> {
        self.inner
            .post(
                &format!("/logbooks/{}/entries", entry.logbook_id),
                JsonBody::from_serialize(entry)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// All entries of a logbook.
    pub async fn entries(&self, id: LogbookId) -> Result<Vec<LogbookEntry>> {
        self.inner
            .get(&format!("/logbooks/{}/entries", id), StatusMap::LOOKUP)
            .await
    }
}
