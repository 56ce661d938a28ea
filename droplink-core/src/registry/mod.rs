pub mod memory;

use crate::error::Result;
use crate::share::ShareRecord;
use async_trait::async_trait;

/// The id -> ShareRecord mapping shared by all request handlers.
///
/// Behind a trait so the in-memory backend can be swapped for a persistent
/// store without touching the relay operations, and so tests can
/// instantiate isolated registries per case. There is deliberately no
/// removal, no capacity bound, and no expiry: the mapping lives exactly as
/// long as the process.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Insert or overwrite the entry keyed by `record.id`. The id format is
    /// decided by the caller; a same-id race is last write wins.
    async fn put(&self, record: ShareRecord) -> Result<()>;

    /// Look up a record by identifier. Absence is not an error.
    async fn get(&self, id: &str) -> Result<Option<ShareRecord>>;
}
