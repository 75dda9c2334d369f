//! Identifier newtypes and the partial-update field type.
//!
//! Every resource is keyed by a numeric id; wrapping each in its own type
//! keeps a `StepId` from being passed where a `TripId` is expected.

use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! id_type {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
            #[serde(transparent)]
            pub struct $name(u64);

            impl $name {
                /// Wrap a raw id.
                pub const fn new(id: u64) -> Self {
                    Self(id)
                }

                /// The raw id.
                pub const fn get(self) -> u64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<u64> for $name {
                fn from(id: u64) -> Self {
                    Self(id)
                }
            }
        )*
    };
}

id_type!(
    /// Identifies a user.
    UserId,
    /// Identifies a trip.
    TripId,
    /// Identifies a step of a trip.
    StepId,
    /// Identifies the path leading to a step.
    PathId,
    /// Identifies a day within a step.
    DayId,
    /// Identifies a point of interest.
    PointId,
    /// Identifies a logbook.
    LogbookId,
    /// Identifies a logbook entry.
    LogbookEntryId,
    /// Identifies a spend.
    SpendId,
    /// Identifies a todo entry.
    TodoId,
    /// Identifies an uploaded file.
    FileId,
);

/// One field of a partial update.
///
/// Update inputs mark every field with
/// `#[serde(skip_serializing_if = "Patch::is_keep")]`, so that:
///
/// - `Keep` leaves the field out and the server does not touch it,
/// - `Clear` sends `null`, which the server treats as "clear this field",
/// - `Set(v)` sends `v`.
///
/// ```
/// use septotrip::models::{Patch, TripUpdate};
/// use serde_json::json;
///
/// let update = TripUpdate {
///     name: Patch::Set("Iceland".into()),
///     description: Patch::Clear,
///     ..Default::default()
/// };
/// assert_eq!(
///     serde_json::to_value(&update).unwrap(),
///     json!({ "name": "Iceland", "description": null })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave unchanged
    Keep,
    /// Clear the stored value
    Clear,
    /// Replace the stored value
    Set(T),
}

impl<T> Patch<T> {
    /// Whether this field is left out of the body.
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Keep | Patch::Clear => serializer.serialize_none(),
            Patch::Set(value) => value.serialize(serializer),
        }
    }
}
