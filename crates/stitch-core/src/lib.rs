//! stitch-core - Core types, loader and view model for hosted table content.

pub mod error;
pub mod loader;
pub mod record;
pub mod token;
pub mod traits;
pub mod types;
pub mod view;

pub use error::Error;
pub use loader::{ContentLoader, FailureKind, LoadFailure, LoadState, Mounted};
pub use record::{Attachment, FieldNames, Fields, Record, RecordsPage};
pub use token::ApiToken;
pub use traits::ContentSource;
pub use types::{BaseId, ServiceUrl, TableName, TableRef};
pub use view::{MediaView, PageView, RecordView, TimeZoneMode, ViewOptions};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
