use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    error::OutletFoodError,
    models::{menu::MenuDocument, outlet::ReadRequest},
    services::{
        holder::MenuHolder,
        metrics::{READS_COUNTER, WRITES_COUNTER},
        snapshot::SnapshotCache,
        source::{MenuSource, StoreSource, Tier},
        store::OutletStore,
    },
};

/// A menu together with the tier that produced it.
#[derive(Debug, Clone)]
pub struct ResolvedMenu {
    pub tier: Tier,
    pub document: MenuDocument,
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    pub outlet_id: i64,
    /// False when no store is configured and only the snapshot and holder were updated.
    pub persisted: bool,
}

pub struct OutletFoodService {
    store: Option<Arc<dyn OutletStore>>,
    snapshot: SnapshotCache,
    holder: MenuHolder,
    /// Read chain, consulted in order: store (when configured), then snapshot.
    /// The holder answers whatever the chain leaves unanswered.
    tiers: Vec<Arc<dyn MenuSource>>,
    /// Serializes writes so store, holder and snapshot observe the same order.
    write_lock: Mutex<()>,
}

impl OutletFoodService {
    pub fn new(store: Option<Arc<dyn OutletStore>>, snapshot: SnapshotCache) -> Self {
        let holder = MenuHolder::new();

        let mut tiers: Vec<Arc<dyn MenuSource>> = Vec::with_capacity(2);
        if let Some(store) = &store {
            tiers.push(Arc::new(StoreSource::new(store.clone())));
        }
        tiers.push(Arc::new(snapshot.clone()));

        Self {
            store,
            snapshot,
            holder,
            tiers,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> Option<&Arc<dyn OutletStore>> {
        self.store.as_ref()
    }

    pub fn snapshot(&self) -> &SnapshotCache {
        &self.snapshot
    }

    pub fn holder(&self) -> &MenuHolder {
        &self.holder
    }

    /// Answer a read from the first tier that has a usable document.
    ///
    /// Only request validation can fail; every tier failure downgrades to the next one.
    pub async fn resolve(&self, req: &ReadRequest) -> Result<ResolvedMenu, OutletFoodError> {
        req.validate()?;

        for source in &self.tiers {
            if let Some(document) = source.try_load(req.outlet_id).await {
                return Ok(self.resolved(source.tier(), req.outlet_id, document));
            }
        }

        let document = self.holder.current().await;
        Ok(self.resolved(Tier::Default, req.outlet_id, document))
    }

    fn resolved(&self, tier: Tier, outlet_id: i64, document: MenuDocument) -> ResolvedMenu {
        READS_COUNTER.with_label_values(&[tier.as_str()]).inc();
        info!(outlet_id, %tier, "outlet food resolved");
        ResolvedMenu { tier, document }
    }

    /// Store `payload` as the menu of its outlet, then mirror it to the holder
    /// and the snapshot file.
    ///
    /// The outlet comes from `query_outlet_id` when non-zero, else from
    /// `output.city.id`. A store failure aborts before the holder or snapshot
    /// are touched; a snapshot failure is only logged.
    pub async fn upsert(
        &self,
        payload: MenuDocument,
        query_outlet_id: Option<i64>,
    ) -> Result<WriteAck, OutletFoodError> {
        let outlet_id = match query_outlet_id
            .filter(|id| *id != 0)
            .or_else(|| payload.embedded_outlet_id())
        {
            Some(id) => id,
            None => {
                WRITES_COUNTER.with_label_values(&["rejected"]).inc();
                return Err(OutletFoodError::MissingOutletId);
            }
        };

        let data = serde_json::to_value(&payload).map_err(|e| {
            WRITES_COUNTER.with_label_values(&["failed"]).inc();
            OutletFoodError::Serialization(e)
        })?;

        let _guard = self.write_lock.lock().await;

        let persisted = match &self.store {
            Some(store) => {
                let record = store.upsert(outlet_id, &data).await.map_err(|e| {
                    warn!(outlet_id, "outlet_food upsert failed: {}", e);
                    WRITES_COUNTER.with_label_values(&["failed"]).inc();
                    OutletFoodError::StoreWrite(e)
                })?;
                info!(outlet_id, record_id = record.id, "outlet food stored");
                true
            }
            None => false,
        };

        self.holder.replace(payload.clone()).await;

        if let Err(e) = self.snapshot.store(&payload).await {
            warn!(path = %self.snapshot.path().display(), "snapshot write failed: {}", e);
        }

        let outcome = if persisted { "stored" } else { "memory_only" };
        WRITES_COUNTER.with_label_values(&[outcome]).inc();

        Ok(WriteAck { outlet_id, persisted })
    }
}
