//! Spends service.

use std::sync::Arc;

use serde::de::IgnoredAny;

use crate::client::ClientInner;
use crate::error::StatusMap;
use crate::models::{NewSpend, Spend, SpendId, SpendUpdate, TripId, User, UserId};
use crate::{JsonBody, Result};

/// Service for shared trip expenses.
///
/// # Example
///
/// ```no_run
/// use septotrip::models::{NewSpend, TripId, UserId};
/// use rust_decimal::Decimal;
///
/// # async fn example(client: septotrip::SeptotripClient) -> septotrip::Result<()> {
/// let spend = client.spends().create(&NewSpend {
///     trip_id: TripId::new(42),
///     title: "Ferry".into(),
///     amount: Decimal::new(4550, 2),
///     date: None,
///     beneficiaries: vec![UserId::new(1), UserId::new(2)],
/// }).await?;
/// # Ok(())
/// # }
/// ```
pub struct SpendsService {
    inner: Arc<ClientInner>,
}

impl SpendsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// All spends of a trip.
    pub async fn for_trip(&self, trip: TripId) -> Result<Vec<Spend>> {
        self.inner
            .get(&format!("/trips/{}/spents", trip), StatusMap::LOOKUP)
            .await
    }

    /// Record a spend.
    pub async fn create(&self, spend: &NewSpend) -> Result<Spend> {
        self.inner
            .post(
                &format!("/trips/{}/spents", spend.trip_id),
                JsonBody::from_serialize(spend)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Get a spend by id.
    pub async fn get(&self, id: SpendId) -> Result<Spend> {
        self.inner.get(&format!("/spents/{}", id), StatusMap::LOOKUP).await
    }

    /// Update a spend.
    pub async fn update(&self, id: SpendId, update: &SpendUpdate) -> Result<Spend> {
        self.inner
            .put(
                &format!("/spents/{}", id),
                JsonBody::from_serialize(update)?,
                StatusMap::WRITE,
            )
            .await
    }

    /// Delete a spend.
    pub async fn delete(&self, id: SpendId) -> Result<()> {
        let _: IgnoredAny = self
            .inner
            .delete(&format!("/spents/{}", id), StatusMap::LOOKUP)
            .await?;
        Ok(())
    }

    /// Users a spend is shared with.
    pub async fn beneficiaries(&self, id: SpendId) -> Result<Vec<User>> {
        self.inner
            .get(&format!("/spents/{}/beneficiaries", id), StatusMap::LOOKUP)
            .await
    }

    /// Replace the users a spend is shared with.
    pub async fn set_beneficiaries(&self, id: SpendId, users: &[UserId]) -> Result<Vec<User>> {
        self.inner
            .put(
                &format!("/spents/{}/beneficiaries", id),
                JsonBody::from_serialize(users)?,
                StatusMap::WRITE,
            )
            .await
    }
}
