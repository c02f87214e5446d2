//! Filesystem storage for table snapshots.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<base>/<table>.json
//! ```
//!
//! Each file holds the same document the service returns for a list
//! request, so a snapshot and a live response decode the same way.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use uuid::Uuid;

use stitch_core::error::Error;
use stitch_core::{BaseId, Record, RecordsPage, Result, TableName};

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Storage {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Replace characters that are not allowed in file names.
///
/// `.` and `..` are prefixed so a name never refers to a directory above
/// the store root.
fn safe_file_name(name: &str) -> String {
    let name: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();

    match name.as_str() {
        "." | ".." => format!("_{}", name),
        _ => name,
    }
}

/// Snapshot directory for a `file://` service.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Create a new store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the path of the snapshot for one table.
    pub fn snapshot_path(&self, base: &BaseId, table: &TableName) -> PathBuf {
        self.root
            .join(safe_file_name(base.as_str()))
            .join(format!("{}.json", safe_file_name(table.as_str())))
    }

    /// Read and decode the snapshot for one table.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn read_page(&self, base: &BaseId, table: &TableName) -> Result<RecordsPage> {
        let path = self.snapshot_path(base, table);
        debug!(path = %path.display(), "Reading snapshot");

        let body = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::Storage {
                path: path.clone(),
                message: format!("no snapshot of table '{}'", table),
            },
            _ => map_io(&path, e),
        })?;

        RecordsPage::from_slice(&body)
    }

    /// Save a snapshot of one table, replacing any previous one.
    ///
    /// The file is written under a temporary name and renamed into place,
    /// so readers never see a partial snapshot.
    #[instrument(skip(self, records), fields(root = %self.root.display(), count = records.len()))]
    pub async fn write_snapshot(
        &self,
        base: &BaseId,
        table: &TableName,
        records: &[Record],
    ) -> Result<PathBuf> {
        let path = self.snapshot_path(base, table);
        let dir = path.parent().unwrap_or(&self.root).to_path_buf();

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| map_io(&dir, e))?;

        let page = RecordsPage::from_records(records.to_vec());
        let json = serde_json::to_vec_pretty(&page).map_err(|e| Error::Storage {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let tmp = dir.join(format!(".{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| map_io(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(map_io(&path, e));
        }

        debug!(path = %path.display(), "Snapshot written");
        Ok(path)
    }
}
