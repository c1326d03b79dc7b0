use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;

use crate::models::outlet::OutletRecord;

/// Durable home of the per-outlet menu documents.
#[async_trait]
pub trait OutletStore: Send + Sync {
    /// Most recently updated record for the outlet, if any.
    async fn find_latest(&self, outlet_id: i64) -> anyhow::Result<Option<OutletRecord>>;

    /// Create the record for `outlet_id`, or replace its payload and bump `updated_at`.
    async fn upsert(&self, outlet_id: i64, data: &Value) -> anyhow::Result<OutletRecord>;

    async fn count(&self) -> anyhow::Result<i64>;

    /// Round-trip check used by the health endpoint.
    async fn ping(&self) -> anyhow::Result<()>;
}

pub struct PgOutletStore {
    pool: PgPool,
}

impl PgOutletStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutletStore for PgOutletStore {
    async fn find_latest(&self, outlet_id: i64) -> anyhow::Result<Option<OutletRecord>> {
        let record = sqlx::query_as::<_, OutletRecord>(
            r#"SELECT id, outlet_id, data, created_at, updated_at
               FROM outlet_food
               WHERE outlet_id = $1
               ORDER BY updated_at DESC
               LIMIT 1"#,
        )
        .bind(outlet_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn upsert(&self, outlet_id: i64, data: &Value) -> anyhow::Result<OutletRecord> {
        let record = sqlx::query_as::<_, OutletRecord>(
            r#"INSERT INTO outlet_food (outlet_id, data)
               VALUES ($1, $2)
               ON CONFLICT (outlet_id) DO UPDATE SET
                   data = EXCLUDED.data,
                   updated_at = NOW()
               RETURNING id, outlet_id, data, created_at, updated_at"#,
        )
        .bind(outlet_id)
        .bind(data)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM outlet_food")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// In-process store with the same create-or-update semantics as Postgres.
/// Backs the service in tests that run without a database.
#[derive(Default)]
pub struct MemoryOutletStore {
    records: Mutex<Vec<OutletRecord>>,
}

impl MemoryOutletStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<OutletRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All records stored for `outlet_id`, oldest first.
    #[cfg(test)]
    pub fn records_for(&self, outlet_id: i64) -> Vec<OutletRecord> {
        self.lock()
            .iter()
            .filter(|r| r.outlet_id == outlet_id)
            .cloned()
            .collect()
    }

    /// Insert a row verbatim, bypassing upsert. Models rows written by older
    /// deployments (duplicates, hand-edited payloads).
    #[cfg(test)]
    pub fn insert_raw(&self, record: OutletRecord) {
        self.lock().push(record);
    }
}

#[async_trait]
impl OutletStore for MemoryOutletStore {
    async fn find_latest(&self, outlet_id: i64) -> anyhow::Result<Option<OutletRecord>> {
        Ok(self
            .lock()
            .iter()
            .filter(|r| r.outlet_id == outlet_id)
            .max_by_key(|r| r.updated_at)
            .cloned())
    }

    async fn upsert(&self, outlet_id: i64, data: &Value) -> anyhow::Result<OutletRecord> {
        let mut records = self.lock();
        let now = Utc::now();

        if let Some(existing) = records.iter_mut().find(|r| r.outlet_id == outlet_id) {
            existing.data = data.clone();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let record = OutletRecord {
            id: records.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            outlet_id,
            data: data.clone(),
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.lock().len() as i64)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let store = MemoryOutletStore::new();

        let created = store.upsert(42, &json!({ "v": 1 })).await.unwrap();
        let updated = store.upsert(42, &json!({ "v": 2 })).await.unwrap();

        assert_eq!(created.id, updated.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let rows = store.records_for(42);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].data, json!({ "v": 2 }));
    }

    #[tokio::test]
    async fn test_outlets_are_kept_apart() {
        let store = MemoryOutletStore::new();
        store.upsert(1, &json!("a")).await.unwrap();
        store.upsert(2, &json!("b")).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.find_latest(1).await.unwrap().unwrap().data, json!("a"));
        assert_eq!(store.find_latest(2).await.unwrap().unwrap().data, json!("b"));
        assert!(store.find_latest(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_latest_prefers_most_recent_update() {
        let store = MemoryOutletStore::new();
        let now = Utc::now();
        store.insert_raw(OutletRecord {
            id: 1,
            outlet_id: 9,
            data: json!("newer"),
            created_at: now - Duration::hours(2),
            updated_at: now,
        });
        store.insert_raw(OutletRecord {
            id: 2,
            outlet_id: 9,
            data: json!("older"),
            created_at: now - Duration::hours(1),
            updated_at: now - Duration::minutes(30),
        });

        let latest = store.find_latest(9).await.unwrap().unwrap();
        assert_eq!(latest.data, json!("newer"));
    }
}
