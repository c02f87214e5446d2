//! stitch-file - Filesystem-backed content source for offline snapshots.

mod source;
mod store;

pub use source::FileSource;
pub use store::SnapshotStore;
