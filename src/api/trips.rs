//! Trips service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::error::StatusMap;
use crate::models::{ApiMessage, Author, NewTrip, Trip, TripId, TripUpdate, User, UserId};
use crate::{JsonBody, Result};

/// Service for trip operations.
///
/// # Example
///
/// ```no_run
/// use septotrip::models::{Patch, TripId, TripUpdate};
///
/// # async fn example(client: septotrip::SeptotripClient) -> septotrip::Result<()> {
/// let trip = client.trips().get(TripId::new(42)).await?;
///
/// let renamed = client.trips().update(trip.id, &TripUpdate {
///     name: Patch::Set("Nordic loop".into()),
///     ..Default::default()
/// }).await?;
/// # Ok(())
/// # }
/// ```
pub struct TripsService {
    inner: Arc<ClientInner>,
}

impl TripsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a trip authored by the current user.
    pub async fn create(&self, trip: &NewTrip) -> Result<Trip> {
        self.inner
            .post("/trips", JsonBody::from_serialize(trip)?, StatusMap::CREATE)
            .await
    }

    /// All public trips.
    pub async fn public(&self) -> Result<Vec<Trip>> {
        self.inner.get("/trips", StatusMap::NONE).await
    }

    /// Trips the current user takes part in.
    pub async fn mine(&self) -> Result<Vec<Trip>> {
        self.inner.get("/trips/me", StatusMap::NONE).await
    }

    /// Get a trip by id.
    pub async fn get(&self, id: TripId) -> Result<Trip> {
        self.inner.get(&format!("/trips/{}", id), StatusMap::LOOKUP).await
    }

    /// Update a trip.
    pub async fn update(&self, id: TripId, update: &TripUpdate) -> Result<Trip> {
        self.inner
            .put(
                &format!("/trips/{}", id),
                JsonBody::from_serialize(update)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Delete a trip.
    pub async fn delete(&self, id: TripId) -> Result<ApiMessage> {
        self.inner.delete(&format!("/trips/{}", id), StatusMap::LOOKUP).await
    }

    /// Users taking part in a trip.
    pub async fn travelers(&self, id: TripId) -> Result<Vec<User>> {
        self.inner
            .get(&format!("/trips/{}/users", id), StatusMap::LOOKUP)
            .await
    }

    /// The user who created a trip.
    pub async fn author(&self, id: TripId) -> Result<Author> {
        self.inner
            .get(&format!("/trips/{}/author", id), StatusMap::LOOKUP)
            .await
    }

    /// Invite a registered user to a trip by email.
    pub async fn add_traveler(&self, id: TripId, email: &str) -> Result<ApiMessage> {
        self.inner
            .post(
                &format!("/trips/{}/users", id),
                JsonBody::new().field("email", email)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Remove a traveler from a trip.
    pub async fn remove_traveler(&self, id: TripId, user: UserId) -> Result<ApiMessage> {
        self.inner
            .delete(&format!("/trips/{}/users/{}", id, user), StatusMap::LOOKUP)
            .await
    }
}
