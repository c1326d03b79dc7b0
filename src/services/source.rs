use std::{fmt, sync::Arc};

use async_trait::async_trait;
use tracing::warn;

use crate::{models::menu::MenuDocument, services::store::OutletStore};

/// Where a resolved menu came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Store,
    Snapshot,
    Default,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Store => "store",
            Tier::Snapshot => "snapshot",
            Tier::Default => "default",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One link of the read fallback chain.
///
/// `try_load` never errors: a tier that cannot answer logs why and returns
/// `None` so the next tier gets a chance.
#[async_trait]
pub trait MenuSource: Send + Sync {
    fn tier(&self) -> Tier;

    async fn try_load(&self, outlet_id: i64) -> Option<MenuDocument>;
}

/// Reads the latest stored record for the outlet.
pub struct StoreSource {
    store: Arc<dyn OutletStore>,
}

impl StoreSource {
    pub fn new(store: Arc<dyn OutletStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MenuSource for StoreSource {
    fn tier(&self) -> Tier {
        Tier::Store
    }

    async fn try_load(&self, outlet_id: i64) -> Option<MenuDocument> {
        if outlet_id == 0 {
            return None;
        }

        let record = match self.store.find_latest(outlet_id).await {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                warn!(outlet_id, "outlet_food lookup failed: {}", e);
                return None;
            }
        };

        match serde_json::from_value::<MenuDocument>(record.data) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(outlet_id, record_id = record.id, "db json unmarshal error: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::outlet::OutletRecord, services::store::MemoryOutletStore};
    use chrono::Utc;
    use serde_json::{json, Value};

    struct BrokenStore;

    #[async_trait]
    impl OutletStore for BrokenStore {
        async fn find_latest(&self, _: i64) -> anyhow::Result<Option<OutletRecord>> {
            anyhow::bail!("connection reset")
        }
        async fn upsert(&self, _: i64, _: &Value) -> anyhow::Result<OutletRecord> {
            anyhow::bail!("connection reset")
        }
        async fn count(&self) -> anyhow::Result<i64> {
            anyhow::bail!("connection reset")
        }
        async fn ping(&self) -> anyhow::Result<()> {
            anyhow::bail!("connection reset")
        }
    }

    #[tokio::test]
    async fn test_loads_stored_document() {
        let store = Arc::new(MemoryOutletStore::new());
        store
            .upsert(5, &json!({ "status": 200, "output": { "outletName": "PVR" } }))
            .await
            .unwrap();

        let doc = StoreSource::new(store).try_load(5).await.unwrap();
        assert_eq!(doc.output.outlet_name, "PVR");
    }

    #[tokio::test]
    async fn test_corrupt_row_is_a_miss() {
        let store = Arc::new(MemoryOutletStore::new());
        let now = Utc::now();
        store.insert_raw(OutletRecord {
            id: 1,
            outlet_id: 5,
            data: json!({ "status": "not a number" }),
            created_at: now,
            updated_at: now,
        });

        assert!(StoreSource::new(store).try_load(5).await.is_none());
    }

    #[tokio::test]
    async fn test_store_error_is_a_miss() {
        assert!(StoreSource::new(Arc::new(BrokenStore)).try_load(5).await.is_none());
    }

    #[tokio::test]
    async fn test_zero_outlet_skips_lookup() {
        let source = StoreSource::new(Arc::new(BrokenStore));
        assert!(source.try_load(0).await.is_none());
        assert_eq!(source.tier(), Tier::Store);
    }
}
