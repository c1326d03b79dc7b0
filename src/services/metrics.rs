use std::sync::Arc;

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge, CounterVec, Gauge};
use tracing::{debug, warn};

use crate::services::store::OutletStore;

lazy_static! {
    pub static ref READS_COUNTER: CounterVec = register_counter_vec!(
        "outlet_food_reads_total",
        "Menu reads by the tier that answered",
        &["tier"]
    ).unwrap();

    pub static ref WRITES_COUNTER: CounterVec = register_counter_vec!(
        "outlet_food_writes_total",
        "Menu writes by outcome (stored, memory_only, rejected, failed)",
        &["outcome"]
    ).unwrap();

    pub static ref RECORDS_GAUGE: Gauge = register_gauge!(
        "outlet_food_records",
        "Outlet menu records in the store"
    ).unwrap();
}

/// Spawn the background record-count collector (refreshes every 5 minutes).
pub fn start(store: Arc<dyn OutletStore>) {
    tokio::spawn(async move {
        loop {
            match store.count().await {
                Ok(count) => {
                    RECORDS_GAUGE.set(count as f64);
                    debug!("Metrics: {} outlet record(s)", count);
                }
                Err(e) => warn!("Metrics: collection failed: {}", e),
            }
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
        }
    });
}
