//! Content source trait.

use async_trait::async_trait;

use crate::Result;
use crate::record::Record;
use crate::types::TableRef;

/// Something that can produce a snapshot of a table's records.
///
/// Implementations issue exactly one read per call and never retry.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Returns the table this source reads.
    fn table(&self) -> &TableRef;

    /// Fetch every record of the table in one read.
    async fn fetch_records(&self) -> Result<Vec<Record>>;
}
