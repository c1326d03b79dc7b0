use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outlet_food_api::{
    config::Config,
    db, router,
    services::{
        metrics,
        outlet_food::OutletFoodService,
        snapshot::{SnapshotCache, SNAPSHOT_FILE},
        store::{OutletStore, PgOutletStore},
    },
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Option<Arc<dyn OutletStore>> = db::connect(&config)
        .await
        .map(|pool| Arc::new(PgOutletStore::new(pool)) as Arc<dyn OutletStore>);
    if let Some(store) = &store {
        metrics::start(store.clone());
    }

    let outlet_food = OutletFoodService::new(store, SnapshotCache::new(SNAPSHOT_FILE));

    let addr = format!("{}:{}", config.host, config.port);
    let app = router(AppState::new(config, outlet_food));

    info!("outlet food API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
