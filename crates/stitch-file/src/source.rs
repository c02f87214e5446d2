//! File-backed content source.

use async_trait::async_trait;
use tracing::{debug, instrument};

use stitch_core::error::InvalidInputError;
use stitch_core::{ContentSource, Record, Result, TableRef};

use crate::store::SnapshotStore;

/// Reads a table from a snapshot directory addressed by a `file://` URL.
#[derive(Debug, Clone)]
pub struct FileSource {
    table: TableRef,
    store: SnapshotStore,
}

impl FileSource {
    /// Create a source for a table on a `file://` service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service URL is not a local path.
    pub fn new(table: TableRef) -> Result<Self> {
        let root = table
            .service
            .to_file_path()
            .ok_or_else(|| InvalidInputError::ServiceUrl {
                value: table.service.to_string(),
                reason: "file source needs a file:// URL".to_string(),
            })?;

        Ok(Self {
            store: SnapshotStore::new(root),
            table,
        })
    }

    /// Access the underlying snapshot store.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }
}

#[async_trait]
impl ContentSource for FileSource {
    fn table(&self) -> &TableRef {
        &self.table
    }

    #[instrument(skip(self), fields(table = %self.table))]
    async fn fetch_records(&self) -> Result<Vec<Record>> {
        debug!("Fetching records from snapshot");
        self.store
            .read_page(&self.table.base, &self.table.table)
            .await?
            .into_records()
    }
}
