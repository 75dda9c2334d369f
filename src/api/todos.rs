//! Todo list service.

use std::sync::Arc;

use serde::de::IgnoredAny;

use crate::client::ClientInner;
use crate::error::StatusMap;
use crate::models::{NewTodoEntry, TodoEntry, TodoId, TodoUpdate, TripId};
use crate::{JsonBody, Result};

/// Service for a trip's todo list.
pub struct TodosService {
    inner: Arc<ClientInner>,
}

impl TodosService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// All todo entries of a trip.
    pub async fn for_trip(&self, trip: TripId) -> Result<Vec<TodoEntry>> {
        self.inner
            .get(&format!("/trips/{}/todo", trip), StatusMap::LOOKUP)
            .await
    }

    /// Add a todo entry.
    pub async fn add(&self, entry: &NewTodoEntry) -> Result<TodoEntry> {
        self.inner
            .post(
                &format!("/trips/{}/todo", entry.trip_id),
                JsonBody::from_serialize(entry)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Get a todo entry by id.
    pub async fn get(&self, id: TodoId) -> Result<TodoEntry> {
        self.inner.get(&format!("/todo/{}", id), StatusMap::LOOKUP).await
    }

    /// Update a todo entry.
    pub async fn update(&self, id: TodoId, update: &TodoUpdate) -> Result<TodoEntry> {
        self.inner
            .put(
                &format!("/todo/{}", id),
                JsonBody::from_serialize(update)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Delete a todo entry.
    pub async fn delete(&self, id: TodoId) -> Result<()> {
        let _: IgnoredAny = self
            .inner
            .delete(&format!("/todo/{}", id), StatusMap::LOOKUP)
            .await?;
        Ok(())
    }
}
