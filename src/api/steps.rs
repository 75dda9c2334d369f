//! Steps, paths, days and points of interest.

use std::sync::Arc;

use serde::de::IgnoredAny;

use crate::client::ClientInner;
use crate::error::StatusMap;
use crate::models::{
    Day, DayId, DayUpdate, NewPoint, NewStep, Path, PathId, PathUpdate, Point, Step, StepId,
    StepUpdate, TripId,
};
use crate::{JsonBody, Result};

/// Service for the steps of a trip.
///
/// # Example
///
/// ```no_run
/// use septotrip::models::{StepId, TripId};
///
/// # async fn example(client: septotrip::SeptotripClient) -> septotrip::Result<()> {
/// let steps = client.steps().list(TripId::new(42)).await?;
///
/// // move the last step to the front
/// if let Some(last) = steps.last() {
///     let reordered = client.steps().reorder(last.id, 0).await?;
///     assert_eq!(reordered[0].id, last.id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct StepsService {
    inner: Arc<ClientInner>,
}

impl StepsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Append a step to a trip.
    pub async fn add(&self, trip: TripId, step: &NewStep) -> Result<Step> {
        self.inner
            .post(
                &format!("/trips/{}/steps", trip),
                JsonBody::from_serialize(step)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// All steps of a trip, in order.
    pub async fn list(&self, trip: TripId) -> Result<Vec<Step>> {
        self.inner
            .get(&format!("/trips/{}/steps", trip), StatusMap::LOOKUP)
            .await
    }

    /// Get a step by id.
    pub async fn get(&self, id: StepId) -> Result<Step> {
        self.inner.get(&format!("/steps/{}", id), StatusMap::LOOKUP).await
    }

    /// Update a step.
    pub async fn update(&self, id: StepId, update: &StepUpdate) -> Result<Step> {
        self.inner
            .put(
                &format!("/steps/{}", id),
                JsonBody::from_serialize(update)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Delete a step.
    pub async fn delete(&self, id: StepId) -> Result<()> {
        let _: IgnoredAny = self
            .inner
            .delete(&format!("/steps/{}", id), StatusMap::LOOKUP)
            .await?;
        Ok(())
    }

    /// The days spent at a step.
    pub async fn days(&self, id: StepId) -> Result<Vec<Day>> {
        self.inner
            .get(&format!("/steps/{}/days", id), StatusMap::LOOKUP)
            .await
    }

    /// Move a step to `new_index` and return the trip's steps in their new
    /// order.
    pub async fn reorder(&self, id: StepId, new_index: u32) -> Result<Vec<Step>> {
        self.inner
            .put(
                &format!("/steps/{}/order", id),
                JsonBody::new().field("newOrder", new_index)?,
                StatusMap::WRITE,
            )
            .await
    }
}

/// Service for the paths leading to steps.
pub struct PathsService {
    inner: Arc<ClientInner>,
}

impl PathsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a path by id.
    pub async fn get(&self, id: PathId) -> Result<Path> {
        self.inner.get(&format!("/paths/{}", id), StatusMap::LOOKUP).await
    }

    /// Update a path.
    pub async fn update(&self, id: PathId, update: &PathUpdate) -> Result<Path> {
        self.inner
            .put(
                &format!("/paths/{}", id),
                JsonBody::from_serialize(update)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// The path that leads to a step.
    pub async fn to_step(&self, step: StepId) -> Result<Path> {
        self.inner
            .get(&format!("/steps/{}/path", step), StatusMap::LOOKUP)
            .await
    }
}

/// Service for the days of a step.
pub struct DaysService {
    inner: Arc<ClientInner>,
}

impl DaysService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a day by id.
    pub async fn get(&self, id: DayId) -> Result<Day> {
        self.inner.get(&format!("/dayId/{}", id), StatusMap::LOOKUP).await
    }

    /// Update a day.
    pub async fn update(&self, id: DayId, update: &DayUpdate) -> Result<Day> {
        self.inner
            .put(
                &format!("/dayId/{}", id),
                JsonBody::from_serialize(update)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Points of interest planned for a day.
    pub async fn points(&self, id: DayId) -> Result<Vec<Point>> {
        self.inner
            .get(&format!("/dayId/{}/points", id), StatusMap::LOOKUP)
            .await
    }
}

/// Service for points of interest.
pub struct PointsService {
    inner: Arc<ClientInner>,
}

impl PointsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Add a point of interest.
    pub async fn add(&self, point: &NewPoint) -> Result<Point> {
        self.inner
            .post("/points", JsonBody::from_serialize(point)?, StatusMap::CREATE)
            .await
    }

    /// Points of interest created by the current user.
    pub async fn mine(&self) -> Result<Vec<Point>> {
        self.inner.get("/points", StatusMap::NONE).await
    }
}
