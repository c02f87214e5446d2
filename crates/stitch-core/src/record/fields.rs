//! Record field access.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::Attachment;

/// Named attributes of a record, as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    /// Returns a field as display text.
    ///
    /// Non-empty strings are returned as-is, numbers and booleans in their
    /// JSON form. Empty strings, arrays and objects count as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns the first attachment in a field.
    ///
    /// Only the first element is considered; if it is malformed or carries
    /// an empty URL the field counts as empty.
    pub fn first_attachment(&self, name: &str) -> Option<Attachment> {
        let first = self.0.get(name)?.as_array()?.first()?;
        Attachment::deserialize(first)
            .ok()
            .filter(|attachment| !attachment.url.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // The service sends `{}` for rows with no values. Anything that is
        // not an object reads as no values at all.
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Ok(Self::default()),
        }
    }
}

/// Names of the table columns the view model reads.
///
/// Defaults to the column names of the school's content table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldNames {
    pub title: String,
    pub body: String,
    pub media: String,
    pub cover: String,
    pub published_at: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            title: "标题".to_string(),
            body: "内容".to_string(),
            media: "视频".to_string(),
            cover: "封面图".to_string(),
            published_at: "发布时间".to_string(),
        }
    }
}
