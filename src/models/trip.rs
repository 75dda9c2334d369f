//! Trips, steps, paths, days and points of interest.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DayId, Patch, PathId, PointId, StepId, TripId, UserId};

/// A trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Trip id
    pub id: TripId,
    /// Display name
    pub name: String,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// First day
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Visible to everyone
    pub is_public: bool,
    /// Creator
    pub author_id: UserId,
}

/// Input for creating a trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    /// Display name
    pub name: String,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// First day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Visible to everyone
    pub is_public: bool,
}

/// Partial update of a trip.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub start_date: Patch<NaiveDate>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub end_date: Patch<NaiveDate>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub is_public: Patch<bool>,
}

/// A stop along a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step id
    pub id: StepId,
    /// Owning trip
    pub trip_id: TripId,
    /// Display name
    pub name: String,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Arrival
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Departure
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Position within the trip, starting at 0
    pub order: u32,
}

/// Input for adding a step to a trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStep {
    /// Display name
    pub name: String,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Arrival
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Departure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Partial update of a step.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpdate {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub latitude: Patch<f64>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub longitude: Patch<f64>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub start_date: Patch<NaiveDate>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub end_date: Patch<NaiveDate>,
}

/// How a traveler gets to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// Path id
    pub id: PathId,
    /// Destination step
    pub step_id: StepId,
    /// e.g. "train", "car"
    #[serde(default)]
    pub transport_mode: Option<String>,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update of a path.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathUpdate {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub transport_mode: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
}

/// One calendar day spent at a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Day id
    pub id: DayId,
    /// Owning step
    pub step_id: StepId,
    /// The date
    pub date: NaiveDate,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update of a day.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayUpdate {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
}

/// A point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Point id
    pub id: PointId,
    /// Display name
    pub title: String,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Day the point is planned for
    #[serde(default)]
    pub day_id: Option<DayId>,
    /// Creator
    pub author_id: UserId,
}

/// Input for adding a point of interest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoint {
    /// Display name
    pub title: String,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Day the point is planned for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_id: Option<DayId>,
}
