use crate::error::Result;

/// Raw persistence for named blobs.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::FilterStore`] handles the "what" (criteria state, notification).
pub trait StorageBackend {
    /// Read a blob. Returns `Ok(None)` when nothing has been saved under `name` yet.
    fn load(&self, name: &str) -> Result<Option<String>>;

    /// Write a blob, replacing any previous value.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, name: &str, blob: &str) -> Result<()>;
}
