//! View model: what a page shows for each loader state and each record.
//!
//! Every optional record field has a fallback here, so a view never shows
//! an empty or undefined slot.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::loader::LoadState;
use crate::record::{FieldNames, Record};

/// Title shown when a record has none.
pub const UNTITLED: &str = "Untitled";

/// Body shown when a record has none.
pub const NO_CONTENT: &str = "No content";

/// Timestamp shown when neither the published field nor the creation time is usable.
pub const UNKNOWN_DATE: &str = "Unknown date";

pub const PAGE_HEADING: &str = "My content";

pub const LOADING_NOTICE: &str = "Loading...";

pub const EMPTY_NOTICE: &str = "No data yet. Add rows to the table to see them here.";

/// Hint for terminal failures.
pub const CONFIG_HINT: &str = "Check that the access token and base ID are correct.";

/// Hint for failures where the service rejected the credentials.
pub const AUTH_HINT: &str =
    "The access token was rejected. Check that it is valid and can read this base.";

/// Hint for failures that may clear up on their own.
pub const RETRY_HINT: &str = "The service may be temporarily unavailable. Try again later.";

/// `toLocaleString` layout of the en-US locale.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Zone used to display creation timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    #[default]
    Utc,
    Local,
}

/// Options for building record views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub fields: FieldNames,
    pub time_zone: TimeZoneMode,
}

/// Inline media player source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaView {
    /// The one playable source.
    pub src: String,
    /// Preview image shown before playback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// A record with every fallback applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordView {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaView>,
    pub published: String,
}

impl RecordView {
    pub fn build(record: &Record, options: &ViewOptions) -> Self {
        let names = &options.fields;
        let fields = &record.fields;

        let media = fields.first_attachment(&names.media).map(|video| MediaView {
            src: video.url,
            poster: fields.first_attachment(&names.cover).map(|cover| cover.url),
        });

        let published = fields.text(&names.published_at).unwrap_or_else(|| {
            record
                .created_time
                .map(|created| format_timestamp(created, options.time_zone))
                .unwrap_or_else(|| UNKNOWN_DATE.to_string())
        });

        Self {
            id: record.id.clone(),
            title: fields
                .text(&names.title)
                .unwrap_or_else(|| UNTITLED.to_string()),
            body: fields
                .text(&names.body)
                .unwrap_or_else(|| NO_CONTENT.to_string()),
            media,
            published,
        }
    }
}

/// Format a timestamp the way `en-US` `toLocaleString` does.
pub fn format_timestamp(at: DateTime<Utc>, zone: TimeZoneMode) -> String {
    match zone {
        TimeZoneMode::Utc => at.format(TIMESTAMP_FORMAT).to_string(),
        TimeZoneMode::Local => at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// What the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PageView {
    Loading,
    Error { message: String, hint: String },
    /// Loaded, but the table has no rows.
    Empty,
    Items { items: Vec<RecordView> },
}

impl PageView {
    pub fn from_state(state: &LoadState, options: &ViewOptions) -> Self {
        match state {
            LoadState::Loading => PageView::Loading,
            LoadState::Failed(failure) => PageView::Error {
                message: failure.message.clone(),
                hint: if failure.retryable {
                    RETRY_HINT
                } else if failure.auth {
                    AUTH_HINT
                } else {
                    CONFIG_HINT
                }
                .to_string(),
            },
            LoadState::Loaded { records } if records.is_empty() => PageView::Empty,
            LoadState::Loaded { records } => PageView::Items {
                items: records
                    .iter()
                    .map(|record| RecordView::build(record, options))
                    .collect(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PageView::Error { .. })
    }
}
