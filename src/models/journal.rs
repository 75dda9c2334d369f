//! Logbooks, spends, todo entries and uploaded files.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::{FileId, LogbookEntryId, LogbookId, Patch, SpendId, TodoId, TripId, UserId};

/// A travel journal attached to a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logbook {
    /// Logbook id
    pub id: LogbookId,
    /// Owning trip
    pub trip_id: TripId,
    /// Title
    pub title: String,
    /// Creator
    pub author_id: UserId,
}

/// Input for creating a logbook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogbook {
    /// Owning trip
    pub trip_id: TripId,
    /// Title
    pub title: String,
}

/// Partial update of a logbook.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogbookUpdate {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub title: Patch<String>,
}

/// One entry of a logbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogbookEntry {
    /// Entry id
    pub id: LogbookEntryId,
    /// Owning logbook
    pub logbook_id: LogbookId,
    /// Entry text
    pub content: String,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
}

/// Input for adding a logbook entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogbookEntry {
    /// Owning logbook
    pub logbook_id: LogbookId,
    /// Entry text
    pub content: String,
}

/// Money spent during a trip, shared among beneficiaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spend {
    /// Spend id
    pub id: SpendId,
    /// Owning trip
    pub trip_id: TripId,
    /// What was paid for
    pub title: String,
    /// Amount paid
    #[serde(deserialize_with = "json_number_amount")]
    pub amount: Decimal,
    /// Who paid
    pub author_id: UserId,
    /// When it was paid
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Reads an amount from a JSON number only; `"12.5"` is rejected.
fn json_number_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    let text = number.to_string();
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(D::Error::custom)
}

/// Input for recording a spend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpend {
    /// Owning trip
    pub trip_id: TripId,
    /// What was paid for
    pub title: String,
    /// Amount paid
    pub amount: Decimal,
    /// When it was paid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Travelers the spend is shared with
    pub beneficiaries: Vec<UserId>,
}

/// Partial update of a spend.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendUpdate {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub title: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub amount: Patch<Decimal>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub date: Patch<NaiveDate>,
}

/// Something left to do before or during a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoEntry {
    /// Entry id
    pub id: TodoId,
    /// Owning trip
    pub trip_id: TripId,
    /// What to do
    pub title: String,
    /// Details
    #[serde(default)]
    pub description: Option<String>,
    /// Whether it is done
    pub done: bool,
}

/// Input for adding a todo entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodoEntry {
    /// Owning trip
    pub trip_id: TripId,
    /// What to do
    pub title: String,
    /// Details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update of a todo entry.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub title: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub done: Patch<bool>,
}

/// Metadata sent alongside an uploaded file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFile {
    /// Trip the file belongs to
    pub trip_id: TripId,
    /// Free text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A file stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// File id
    pub id: FileId,
    /// Trip the file belongs to
    pub trip_id: TripId,
    /// Original file name
    pub name: String,
    /// MIME type
    pub mime_type: String,
    /// Where the file can be downloaded
    #[serde(default)]
    pub url: Option<String>,
}
