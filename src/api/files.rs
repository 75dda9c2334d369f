//! File uploads.

use std::sync::Arc;

use crate::client::{ClientInner, Method};
use crate::error::StatusMap;
use crate::models::{FileMetadata, NewFile};
use crate::{FileHandle, FormFields, Result};

/// Service for files attached to trips.
///
/// # Example
///
/// ```no_run
/// use septotrip::FileHandle;
/// use septotrip::models::{NewFile, TripId};
///
/// # async fn example(client: septotrip::SeptotripClient) -> septotrip::Result<()> {
/// let photo = FileHandle::mobile("file:///var/mobile/photo.jpg", "photo.jpg", "image/jpeg")?;
/// let stored = client.files().upload(
///     &NewFile { trip_id: TripId::new(42), description: None },
///     photo,
/// ).await?;
/// println!("{:?}", stored.url);
/// # Ok(())
/// # }
/// ```
pub struct FilesService {
    inner: Arc<ClientInner>,
}

impl FilesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Upload a file to a trip. The file is sent as the `file` part, the
    /// metadata fields as text parts.
    pub async fn upload(&self, metadata: &NewFile, file: FileHandle) -> Result<FileMetadata> {
        let fields = FormFields::new()
            .insert("file", file)
            .merge(FormFields::from_serialize(metadata)?);

        self.inner
            .call_upload(
                Method::Post,
                &format!("/trips/{}/file", metadata.trip_id),
                fields.into(),
                StatusMap::WRITE,
            )
            .await
    }
}
