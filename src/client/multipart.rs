//! Multipart form encoding for uploads.
//!
//! A [`FormFields`] map holds text-like values and file handles. Encoding it
//! yields a [`MultipartPayload`]: one text part per string, number or
//! boolean (stringified), one binary part per file. Values of any other
//! shape are rejected instead of being dropped.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::{Number, Value};
use url::Url;

use crate::{Error, Result};

const ANDROID_SCHEME: &str = "content://";
const IOS_SCHEME: &str = "file://";

/// A reference to a file on a mobile device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobileUri {
    /// `content://...`, resolved through the Android content resolver.
    Android(String),
    /// `file://...`, a path in the app sandbox.
    Ios(String),
}

impl MobileUri {
    /// Recognize a mobile file URI by its scheme.
    pub fn parse(uri: &str) -> Option<Self> {
        if uri.starts_with(ANDROID_SCHEME) {
            Some(MobileUri::Android(uri.to_string()))
        } else if uri.starts_with(IOS_SCHEME) {
            Some(MobileUri::Ios(uri.to_string()))
        } else {
            None
        }
    }

    /// The full URI.
    pub fn as_str(&self) -> &str {
        match self {
            MobileUri::Android(uri) | MobileUri::Ios(uri) => uri,
        }
    }
}

impl fmt::Display for MobileUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum FileHandle {
    /// In-memory file contents, as a web host holds them.
    Web {
        /// File name sent in the part's `Content-Disposition`
        name: String,
        /// MIME type, if known
        mime_type: Option<String>,
        /// File contents
        bytes: Bytes,
    },
    /// A mobile file reference, read at send time.
    Mobile {
        /// Where the file lives
        uri: MobileUri,
        /// File name sent in the part's `Content-Disposition`
        name: String,
        /// MIME type
        mime_type: String,
    },
}

impl FileHandle {
    /// A web blob.
    pub fn web(name: impl Into<String>, mime_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        FileHandle::Web {
            name: name.into(),
            mime_type: mime_type.map(String::from),
            bytes: bytes.into(),
        }
    }

    /// A mobile file reference. Fails unless `uri` is `content://` or
    /// `file://`.
    pub fn mobile(uri: &str, name: impl Into<String>, mime_type: impl Into<String>) -> Result<Self> {
        let uri = MobileUri::parse(uri)
            .ok_or_else(|| Error::Encode(format!("`{uri}` is not a content:// or file:// URI")))?;
        Ok(FileHandle::Mobile {
            uri,
            name: name.into(),
            mime_type: mime_type.into(),
        })
    }

    /// Recognize the `{ uri, name, type }` shape mobile hosts use.
    fn from_json(map: &serde_json::Map<String, Value>) -> Option<Self> {
        let uri = MobileUri::parse(map.get("uri")?.as_str()?)?;
        let name = map.get("name")?.as_str()?;
        let mime_type = map.get("type")?.as_str()?;
        Some(FileHandle::Mobile {
            uri,
            name: name.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    fn name(&self) -> &str {
        match self {
            FileHandle::Web { name, .. } | FileHandle::Mobile { name, .. } => name,
        }
    }
}

/// The value of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Sent as-is
    Text(String),
    /// Sent in its decimal representation
    Number(Number),
    /// Sent as `true` / `false`
    Bool(bool),
    /// Sent as a binary part
    File(FileHandle),
}

impl FieldValue {
    /// A floating point number. Fails for NaN and infinities.
    pub fn float(value: f64) -> Result<Self> {
        Number::from_f64(value)
            .map(FieldValue::Number)
            .ok_or_else(|| Error::Encode(format!("{value} is not a finite number")))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<FileHandle> for FieldValue {
    fn from(value: FileHandle) -> Self {
        FieldValue::File(value)
    }
}

macro_rules! number_field {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Number(Number::from(value))
                }
            }
        )*
    };
}

number_field!(i32, i64, u32, u64);

/// An ordered map of form fields.
///
/// ```
/// use septotrip::{FileHandle, FormFields};
///
/// let payload = FormFields::new()
///     .insert("file", FileHandle::web("photo.jpg", Some("image/jpeg"), vec![0xff, 0xd8]))
///     .insert("tripId", 7)
///     .encode()
///     .unwrap();
/// assert_eq!(payload.len(), 2);
/// assert_eq!(payload.text("tripId"), Some("7"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    entries: Vec<(String, FieldValue)>,
}

impl FormFields {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Tag the fields of a JSON object by their runtime type.
    ///
    /// Strings, numbers and booleans become text fields; objects of the
    /// shape `{ uri, name, type }` with a mobile URI become file fields;
    /// `null` fields are skipped. Arrays and other objects are rejected.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::Encode("form fields must be a JSON object".to_string()));
        };

        let mut fields = Self::new();
        for (key, value) in map {
            let field = match value {
                Value::Null => continue,
                Value::String(s) => FieldValue::Text(s),
                Value::Number(n) => FieldValue::Number(n),
                Value::Bool(b) => FieldValue::Bool(b),
                Value::Object(ref obj) => match FileHandle::from_json(obj) {
                    Some(file) => FieldValue::File(file),
                    None => {
                        return Err(Error::Encode(format!(
                            "field `{key}` is neither a text value nor a file"
                        )))
                    }
                },
                Value::Array(_) => {
                    return Err(Error::Encode(format!(
                        "field `{key}` is an array; only text values and files can be sent"
                    )))
                }
            };
            fields = fields.insert(key, field);
        }
        Ok(fields)
    }

    /// Serialize `value` and tag its fields, see [`FormFields::from_json`].
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Self::from_json(serde_json::to_value(value)?)
    }

    /// Append every field of `other`, replacing same-named ones.
    pub fn merge(self, other: FormFields) -> Self {
        other
            .entries
            .into_iter()
            .fold(self, |fields, (key, value)| fields.insert(key, value))
    }

    /// Encode into multipart parts, in insertion order.
    pub fn encode(self) -> Result<MultipartPayload> {
        let parts = self
            .entries
            .into_iter()
            .map(|(name, value)| {
                if name.is_empty() {
                    return Err(Error::Encode("form field names cannot be empty".to_string()));
                }
                let body = match value {
                    FieldValue::Text(s) => PartBody::Text(s),
                    FieldValue::Number(n) => PartBody::Text(n.to_string()),
                    FieldValue::Bool(b) => PartBody::Text(b.to_string()),
                    FieldValue::File(file) => {
                        if file.name().is_empty() {
                            return Err(Error::Encode(format!("file `{name}` has no file name")));
                        }
                        PartBody::Binary(file)
                    }
                };
                Ok(MultipartPart { name, body })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MultipartPayload { parts })
    }
}

/// One part of an encoded form.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    /// Field name
    pub name: String,
    /// Contents
    pub body: PartBody,
}

/// Contents of a [`MultipartPart`].
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    /// A text part
    Text(String),
    /// A binary part
    Binary(FileHandle),
}

/// An encoded multipart form, ready to send.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    parts: Vec<MultipartPart>,
}

impl MultipartPayload {
    /// The parts, in order.
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the form has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The value of the text part `name`, if there is one.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.body {
            PartBody::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Build the reqwest form, reading mobile files through `resolver`.
    pub(crate) async fn into_form(self, resolver: &dyn FileResolver) -> Result<Form> {
        let mut form = Form::new();
        for MultipartPart { name, body } in self.parts {
            let part = match body {
                PartBody::Text(value) => Part::text(value),
                PartBody::Binary(FileHandle::Web {
                    name: file_name,
                    mime_type,
                    bytes,
                }) => {
                    let part = Part::bytes(bytes.to_vec()).file_name(file_name);
                    match mime_type {
                        Some(mime) => part.mime_str(&mime)?,
                        None => part,
                    }
                }
                PartBody::Binary(FileHandle::Mobile {
                    uri,
                    name: file_name,
                    mime_type,
                }) => {
                    let bytes = resolver.read(&uri).await?;
                    Part::bytes(bytes.to_vec())
                        .file_name(file_name)
                        .mime_str(&mime_type)?
                }
            };
            form = form.part(name, part);
        }
        Ok(form)
    }
}

impl From<FormFields> for UploadBody {
    fn from(fields: FormFields) -> Self {
        UploadBody::Fields(fields)
    }
}

impl From<MultipartPayload> for UploadBody {
    fn from(payload: MultipartPayload) -> Self {
        UploadBody::Encoded(payload)
    }
}

/// What [`upload`](crate::SeptotripClient::upload) accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadBody {
    /// A field map, encoded before sending
    Fields(FormFields),
    /// An already encoded form, sent verbatim
    Encoded(MultipartPayload),
}

impl UploadBody {
    pub(crate) fn encode(self) -> Result<MultipartPayload> {
        match self {
            UploadBody::Fields(fields) => fields.encode(),
            UploadBody::Encoded(payload) => Ok(payload),
        }
    }
}

/// Reads the contents of a mobile file reference.
#[async_trait]
pub trait FileResolver: Send + Sync {
    /// Return the file's bytes.
    async fn read(&self, uri: &MobileUri) -> Result<Bytes>;
}

/// Resolves `file://` URIs from the local filesystem.
///
/// `content://` URIs only mean something to the Android content resolver;
/// hosts that upload them must install their own [`FileResolver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FsResolver;

#[async_trait]
impl FileResolver for FsResolver {
    async fn read(&self, uri: &MobileUri) -> Result<Bytes> {
        match uri {
            MobileUri::Ios(raw) => {
                let path = Url::parse(raw)?
                    .to_file_path()
                    .map_err(|_| Error::Encode(format!("`{raw}` is not a local file path")))?;
                Ok(Bytes::from(tokio::fs::read(path).await?))
            }
            MobileUri::Android(raw) => Err(Error::Encode(format!(
                "`{raw}` needs a content resolver; install a FileResolver for Android uploads"
            ))),
        }
    }
}
