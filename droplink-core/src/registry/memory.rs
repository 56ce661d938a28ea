use crate::error::Result;
use crate::registry::Registry;
use crate::share::ShareRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory registry backend. All state is lost on restart, which
/// invalidates every previously issued identifier.
#[derive(Default)]
pub struct MemoryRegistry {
    records: RwLock<HashMap<String, ShareRecord>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    async fn put(&self, record: ShareRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<ShareRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }
}
