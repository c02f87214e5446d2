//! Records of the hosted table and the response document that carries them.
//!
//! Records are read-only snapshots. Everything except the record ID may be
//! missing, so field access goes through [`Fields`] accessors that return
//! `Option`s instead of failing.

mod fields;
mod types;

pub use fields::{FieldNames, Fields};
pub use types::{Attachment, Record, RecordsPage, ServiceErrorBody};
