//! Record and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, ServiceError};

use super::Fields;

/// One row of hosted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Service-assigned identifier, unique within a response.
    pub id: String,

    /// When the service created this row.
    ///
    /// `None` if the service omitted it or sent something unparseable.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<DateTime<Utc>>,

    /// Named attributes; any of them may be missing.
    #[serde(default)]
    pub fields: Fields,
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// A file attached to a record field (video, cover image, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Address of the attached resource.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// MIME type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// The document returned by the list-records endpoint.
///
/// Both `records` and `error` are optional on the wire. A present `error`
/// means the request failed even if the HTTP status said otherwise.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordsPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Record>>,

    /// Cursor for the next page; stitch never follows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceErrorBody>,
}

/// The `error` member of a response body.
///
/// The service uses either an object (`{"type": .., "message": ..}`) or a
/// bare code string (`"NOT_FOUND"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceErrorBody {
    Detailed {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Code(String),
}

impl ServiceErrorBody {
    /// Read an `error` member of any shape.
    ///
    /// Shapes other than an object or a string keep their JSON text as the
    /// message.
    pub fn from_value(value: Value) -> Self {
        match Self::deserialize(&value) {
            Ok(body) => body,
            Err(_) => ServiceErrorBody::Code(value.to_string()),
        }
    }

    /// Returns the error type and the message shown to users.
    pub fn into_parts(self) -> (Option<String>, String) {
        match self {
            ServiceErrorBody::Detailed { kind, message } => {
                let message = message
                    .or_else(|| kind.clone())
                    .unwrap_or_else(|| "unknown service error".to_string());
                (kind, message)
            }
            ServiceErrorBody::Code(code) => (None, code),
        }
    }
}

impl From<ServiceErrorBody> for ServiceError {
    fn from(body: ServiceErrorBody) -> Self {
        let (kind, message) = body.into_parts();
        ServiceError::new(kind, message)
    }
}

impl RecordsPage {
    /// Wrap a record list as a successful page.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: Some(records),
            offset: None,
            error: None,
        }
    }

    /// Decode a response body.
    ///
    /// The `error` member is read before anything else, so an error payload
    /// is reported even when the rest of the body is malformed. Records that
    /// cannot be decoded are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not a JSON object, or if it
    /// carries no error and `records` is not a list.
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(body).map_err(|e| Error::Decode {
            message: e.to_string(),
        })?;

        let Value::Object(mut body) = value else {
            return Err(Error::Decode {
                message: "expected a JSON object".to_string(),
            });
        };

        let error = match body.remove("error") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(ServiceErrorBody::from_value(raw)),
        };

        let offset = match body.remove("offset") {
            Some(Value::String(offset)) => Some(offset),
            _ => None,
        };

        let records = match body.remove("records") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(decode_records(items)),
            Some(_) if error.is_some() => None,
            Some(_) => {
                return Err(Error::Decode {
                    message: "`records` is not a list".to_string(),
                });
            }
        };

        Ok(Self {
            records,
            offset,
            error,
        })
    }

    /// Resolve the page into its records.
    ///
    /// A service-reported error wins over any records in the same body;
    /// a missing record list is an empty one.
    pub fn into_records(self) -> Result<Vec<Record>, Error> {
        if let Some(error) = self.error {
            return Err(ServiceError::from(error).into());
        }

        if self.offset.is_some() {
            warn!("Table has more records than one page; only the first page is shown");
        }

        Ok(self.records.unwrap_or_default())
    }
}

fn decode_records(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match Record::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}
